use sonda_core::{Field, FieldMap, FieldValue};

use super::fields;

pub fn by_ip(ip: &str) -> Option<FieldMap> {
    match ip {
        "8.8.8.8" => Some(fields([
            (Field::City, "Mountain View".into()),
            (Field::Region, "California".into()),
            (Field::Country, "United States".into()),
            (Field::CountryCode, "US".into()),
            (Field::Timezone, "America/Los_Angeles".into()),
            (Field::Latitude, FieldValue::Number(37.386)),
            (Field::Longitude, FieldValue::Number(-122.0838)),
            (Field::Isp, "Google LLC".into()),
            (Field::Org, "Google Public DNS".into()),
            (Field::Asn, "AS15169".into()),
            (Field::Hostname, "dns.google".into()),
            (Field::IsProxy, false.into()),
            (Field::IsHosting, true.into()),
        ])),
        "1.1.1.1" => Some(fields([
            (Field::City, "Brisbane".into()),
            (Field::Region, "Queensland".into()),
            (Field::Country, "Australia".into()),
            (Field::CountryCode, "AU".into()),
            (Field::Latitude, FieldValue::Number(-27.4679)),
            (Field::Longitude, FieldValue::Number(153.0281)),
            (Field::Isp, "Cloudflare, Inc.".into()),
            (Field::Asn, "AS13335".into()),
            (Field::Hostname, "one.one.one.one".into()),
            (Field::IsHosting, true.into()),
        ])),
        _ => None,
    }
}
