use sonda_types::{Field, FieldMap, FieldValue};

use super::dedupe;

pub(super) fn refine(fields: &mut FieldMap) {
    if let Some(FieldValue::List(names)) = fields.get_mut(&Field::Subdomains) {
        let mut clean: Vec<String> = names
            .iter()
            .flat_map(|entry| entry.split('\n'))
            .map(|n| {
                n.trim()
                    .trim_start_matches("*.")
                    .trim_end_matches('.')
                    .to_ascii_lowercase()
            })
            .filter(|n| !n.is_empty() && !n.contains(char::is_whitespace) && !n.contains('@'))
            .collect();
        clean.sort();
        clean.dedup();
        *names = clean;
    }

    for field in [Field::ARecords, Field::MxRecords, Field::NsRecords] {
        if let Some(FieldValue::List(records)) = fields.get_mut(&field) {
            for r in records.iter_mut() {
                *r = r.trim().trim_end_matches('.').to_ascii_lowercase();
            }
            records.retain(|r| !r.is_empty());
            dedupe(records);
        }
    }

    if let Some(FieldValue::List(status)) = fields.get_mut(&Field::DomainStatus) {
        for s in status.iter_mut() {
            *s = s.trim().to_ascii_lowercase();
        }
        dedupe(status);
    }

    for field in [Field::Created, Field::Expires] {
        if let Some(FieldValue::Text(date)) = fields.get_mut(&field) {
            *date = date_part(date);
        }
    }
}

/// `2030-08-13T04:00:00Z` → `2030-08-13`; other shapes pass through trimmed.
fn date_part(raw: &str) -> String {
    let t = raw.trim();
    let bytes = t.as_bytes();
    let looks_iso = bytes.len() >= 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes[..4].iter().all(u8::is_ascii_digit);
    match t.get(..10) {
        Some(day) if looks_iso => day.to_string(),
        _ => t.to_string(),
    }
}
