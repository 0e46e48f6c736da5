//! Conversion of raw provider responses into canonical partial records.
//!
//! Provider quirks live in data: a [`Schema`] lists, per canonical field, the
//! paths a provider may use and how to read them. After alias extraction each
//! subject type applies a small refinement pass (ASN splitting, coordinate
//! ranges, subdomain cleanup, ...). Everything here is pure; malformed values
//! are dropped rather than reported.

mod domain;
mod email;
mod ip;
mod name;
mod phone;
mod schema;

pub use schema::{BodyRule, Extract, FieldAlias, Match, RuleOutcome, Schema};

use serde_json::Value;
use sonda_types::{FieldMap, SubjectType};

/// Normalize one parsed response for `subject_type` using `schema`.
///
/// Deterministic and side-effect free. Fields whose value is empty after
/// refinement are omitted.
#[must_use]
pub fn normalize(subject_type: SubjectType, schema: &Schema, raw: &Value) -> FieldMap {
    let mut fields = FieldMap::new();
    for alias in schema.aliases {
        if fields.contains_key(&alias.field) {
            continue;
        }
        if let Some(v) = alias.resolve(raw) {
            fields.insert(alias.field, v);
        }
    }

    match subject_type {
        SubjectType::Ip => ip::refine(&mut fields),
        SubjectType::Phone => phone::refine(&mut fields),
        SubjectType::Email => email::refine(&mut fields),
        SubjectType::Domain => domain::refine(&mut fields),
        SubjectType::Name => name::refine(&mut fields),
        _ => {}
    }

    fields.retain(|_, v| !v.is_empty());
    fields
}

/// Parse `body` as JSON and normalize it. A body that is not JSON yields an
/// empty map.
#[must_use]
pub fn normalize_body(subject_type: SubjectType, schema: &Schema, body: &str) -> FieldMap {
    serde_json::from_str::<Value>(body)
        .map(|raw| normalize(subject_type, schema, &raw))
        .unwrap_or_default()
}

pub(crate) fn dedupe(items: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    items.retain(|s| seen.insert(s.clone()));
}
