use sonda_types::{Field, FieldMap, FieldValue};

pub(super) fn refine(fields: &mut FieldMap) {
    split_org_asn(fields);

    if let Some(FieldValue::Text(asn)) = fields.get_mut(&Field::Asn) {
        let digits = asn.trim_start_matches(['A', 'S', 'a', 's']).to_string();
        *asn = format!("AS{digits}");
    }

    keep_in_range(fields, Field::Latitude, 90.0);
    keep_in_range(fields, Field::Longitude, 180.0);

    if let Some(FieldValue::Text(cc)) = fields.get_mut(&Field::CountryCode) {
        *cc = cc.trim().to_ascii_uppercase();
    }
}

/// `"AS15169 Google LLC"` carries both the ASN and the organization.
fn split_org_asn(fields: &mut FieldMap) {
    let Some(FieldValue::Text(org)) = fields.get(&Field::Org) else {
        return;
    };
    let Some((head, rest)) = org.trim().split_once(char::is_whitespace) else {
        return;
    };
    let Some(digits) = head.strip_prefix("AS") else {
        return;
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return;
    }
    let asn = format!("AS{digits}");
    let name = rest.trim().to_string();
    fields
        .entry(Field::Asn)
        .or_insert_with(|| FieldValue::Text(asn));
    fields.insert(Field::Org, FieldValue::Text(name));
}

fn keep_in_range(fields: &mut FieldMap, field: Field, bound: f64) {
    let ok = matches!(fields.get(&field), Some(FieldValue::Number(n)) if n.abs() <= bound);
    if !ok {
        fields.remove(&field);
    }
}
