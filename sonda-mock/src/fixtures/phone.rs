use sonda_core::{Field, FieldMap};

use super::fields;

pub fn by_number(number: &str) -> Option<FieldMap> {
    match number {
        "+14155552671" => Some(fields([
            (Field::Valid, true.into()),
            (Field::CountryCode, "US".into()),
            (Field::Country, "United States".into()),
            (Field::Region, "California".into()),
            (Field::Carrier, "Acme Wireless".into()),
            (Field::LineType, "mobile".into()),
            (Field::InternationalFormat, "+1 415-555-2671".into()),
            (Field::LocalFormat, "(415) 555-2671".into()),
        ])),
        "+442071838750" => Some(fields([
            (Field::Valid, true.into()),
            (Field::CountryCode, "GB".into()),
            (Field::Country, "United Kingdom".into()),
            (Field::Region, "London".into()),
            (Field::Carrier, "Vodafone UK".into()),
            (Field::LineType, "landline".into()),
            (Field::InternationalFormat, "+44 20 7183 8750".into()),
            (Field::LocalFormat, "020 7183 8750".into()),
        ])),
        _ => None,
    }
}
