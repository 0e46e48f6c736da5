use std::collections::BTreeSet;

use sonda_types::{Field, FinalRecord, PartialRecord, Sourced};

/// Merge partial records into one final record by field precedence.
///
/// `partials` must be in chain order. For every field any record mentions:
///
/// - only usable records (`Ok` or `NotFound`) with a non-empty value count;
/// - the first such record that is authoritative for the field wins;
/// - otherwise the first such record in chain order wins.
///
/// The result depends only on the order of `partials`, never on arrival time.
/// Fields nobody supplied are absent from the result.
#[must_use]
pub fn merge(partials: &[PartialRecord]) -> FinalRecord {
    let candidates: BTreeSet<Field> = partials
        .iter()
        .filter(|p| p.is_usable())
        .flat_map(|p| p.fields.keys().copied())
        .collect();

    let mut out = FinalRecord::default();
    for field in candidates {
        let winner = partials
            .iter()
            .find(|p| p.is_authoritative_for(field) && p.value(field).is_some())
            .or_else(|| partials.iter().find(|p| p.value(field).is_some()));

        if let Some(p) = winner
            && let Some(v) = p.value(field)
        {
            out.fields.insert(
                field,
                Sourced {
                    value: v.clone(),
                    provider: p.provider.clone(),
                },
            );
        }
    }
    out
}
