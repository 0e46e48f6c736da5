use sonda_core::{Field, FieldMap, FieldValue};

use super::fields;

pub fn by_domain(domain: &str) -> Option<FieldMap> {
    match domain {
        "example.com" => Some(fields([
            (
                Field::Subdomains,
                FieldValue::list(["mail.example.com", "www.example.com"]),
            ),
            (Field::ARecords, FieldValue::list(["93.184.215.14"])),
            (Field::NsRecords, FieldValue::list(["a.iana-servers.net", "b.iana-servers.net"])),
            (Field::Created, "1995-08-14".into()),
            (Field::Expires, "2025-08-13".into()),
            (Field::DomainStatus, FieldValue::list(["client delete prohibited"])),
        ])),
        _ => None,
    }
}
