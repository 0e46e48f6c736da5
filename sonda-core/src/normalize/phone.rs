use sonda_types::{Field, FieldMap, FieldValue};

pub(super) fn refine(fields: &mut FieldMap) {
    if let Some(FieldValue::Text(lt)) = fields.get_mut(&Field::LineType) {
        *lt = canonical_line_type(lt);
    }
    if let Some(FieldValue::Text(cc)) = fields.get_mut(&Field::CountryCode) {
        *cc = cc.trim().to_ascii_uppercase();
    }
}

fn canonical_line_type(raw: &str) -> String {
    let key = raw.trim().to_ascii_lowercase().replace([' ', '-'], "_");
    match key.as_str() {
        "mobile" | "cell" | "cellular" | "wireless" => "mobile".to_string(),
        "landline" | "fixed_line" | "fixed" => "landline".to_string(),
        "voip" | "non_fixed_voip" | "fixed_voip" => "voip".to_string(),
        "toll_free" | "tollfree" => "toll_free".to_string(),
        _ => key,
    }
}
