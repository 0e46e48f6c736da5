use sonda_types::{PartialRecord, SondaError, SubjectType};

/// Decide whether a finished chain amounts to a total failure.
///
/// Rules:
/// - An empty chain is not a failure; the caller gets an empty record.
/// - Any `Ok` or `NotFound` record means the chain produced a usable answer.
/// - Otherwise every provider was skipped or failed →
///   `NoProvidersAvailable` carrying their errors in chain order.
#[must_use]
pub fn collapse_failures(
    subject_type: SubjectType,
    records: &[PartialRecord],
) -> Option<SondaError> {
    if records.is_empty() || records.iter().any(PartialRecord::is_usable) {
        return None;
    }
    Some(SondaError::NoProvidersAvailable {
        subject_type: subject_type.to_string(),
        errors: records.iter().filter_map(|r| r.error().cloned()).collect(),
    })
}

/// Errors from skipped and failed records, in chain order.
pub(crate) fn warnings_from(records: &[PartialRecord]) -> Vec<SondaError> {
    records.iter().filter_map(|r| r.error().cloned()).collect()
}
