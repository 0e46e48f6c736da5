//! Report envelopes produced by the orchestrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SondaError;
use crate::record::{FinalRecord, PartialRecord, RecordStatus};
use crate::subject::Subject;

/// Coarse outcome of one provider attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// Returned data.
    Ok,
    /// Returned "no data".
    NotFound,
    /// Not invoked.
    Skipped,
    /// Invoked and failed.
    Failed,
}

/// Audit line for one provider in the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    /// Provider name.
    pub provider: String,
    /// How the attempt ended.
    pub outcome: AttemptOutcome,
    /// Number of fields the provider returned.
    pub fields: usize,
}

impl From<&PartialRecord> for Attempt {
    fn from(r: &PartialRecord) -> Self {
        let outcome = match r.status {
            RecordStatus::Ok => AttemptOutcome::Ok,
            RecordStatus::NotFound => AttemptOutcome::NotFound,
            RecordStatus::Skipped(_) => AttemptOutcome::Skipped,
            RecordStatus::Failed(_) => AttemptOutcome::Failed,
        };
        Self {
            provider: r.provider.clone(),
            outcome,
            fields: r.fields.len(),
        }
    }
}

/// Summary of one subject lookup.
///
/// Carries the normalized `subject`, the merged `record`, one audit line per
/// provider in chain order, and the non-fatal issues encountered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupReport {
    /// Normalized subject.
    pub subject: Subject,
    /// Merged record.
    pub record: FinalRecord,
    /// Provider attempts in chain order.
    pub attempts: Vec<Attempt>,
    /// Non-fatal issues encountered while building the report.
    pub warnings: Vec<SondaError>,
    /// When the report was assembled.
    pub generated_at: DateTime<Utc>,
}
