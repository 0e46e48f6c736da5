use sonda_core::{Field, FieldMap, FieldValue};

use super::fields;

pub fn by_address(address: &str) -> Option<FieldMap> {
    match address {
        "alice@example.com" => Some(fields([
            (Field::IsDisposable, false.into()),
            (Field::BreachCount, FieldValue::Number(2.0)),
            (
                Field::BreachNames,
                FieldValue::list(["Adobe", "LinkedIn"]),
            ),
            (Field::Reputation, "high".into()),
            (Field::Suspicious, false.into()),
            (Field::References, FieldValue::Number(14.0)),
        ])),
        "throwaway@mailinator.com" => Some(fields([
            (Field::IsDisposable, true.into()),
            (Field::Reputation, "none".into()),
            (Field::Suspicious, true.into()),
        ])),
        _ => None,
    }
}
