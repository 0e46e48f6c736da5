use sonda_core::{Field, FieldMap};

use super::fields;

pub fn by_name(name: &str) -> Option<FieldMap> {
    match name {
        "Ada Lovelace" => Some(fields([
            (Field::LinkedinUrl, "https://www.linkedin.com/in/ada-lovelace".into()),
            (Field::TwitterUrl, "https://x.com/adalovelace".into()),
        ])),
        _ => None,
    }
}
