use sonda_types::{Field, FieldMap, FieldValue};

use super::dedupe;

pub(super) fn refine(fields: &mut FieldMap) {
    if let Some(FieldValue::List(names)) = fields.get_mut(&Field::BreachNames) {
        for n in names.iter_mut() {
            *n = n.trim().to_string();
        }
        names.retain(|n| !n.is_empty());
        dedupe(names);
    }

    #[allow(clippy::cast_precision_loss)]
    let derived = match fields.get(&Field::BreachNames) {
        Some(FieldValue::List(names)) if !names.is_empty() => Some(names.len() as f64),
        _ => None,
    };
    if let Some(n) = derived {
        fields.entry(Field::BreachCount).or_insert(FieldValue::Number(n));
    }

    if let Some(FieldValue::Text(r)) = fields.get_mut(&Field::Reputation) {
        *r = r.trim().to_ascii_lowercase();
    }
}
