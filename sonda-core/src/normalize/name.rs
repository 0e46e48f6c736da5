use sonda_types::{FieldMap, FieldValue};

pub(super) fn refine(fields: &mut FieldMap) {
    for v in fields.values_mut() {
        if let FieldValue::Text(s) = v {
            *s = s.trim().to_string();
        }
    }
}
