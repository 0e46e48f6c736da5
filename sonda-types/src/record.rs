//! Per-provider partial records and the merged final record.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::SondaError;
use crate::field::{Field, FieldValue};
use crate::probe::ProbeResult;

/// Sparse mapping from canonical field to value.
pub type FieldMap = BTreeMap<Field, FieldValue>;

/// How one provider invocation ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum RecordStatus {
    /// The provider answered with data.
    Ok,
    /// The provider answered "no data". Usable for merge purposes.
    NotFound,
    /// The provider was not invoked (credential missing).
    Skipped(SondaError),
    /// The provider was invoked and failed.
    Failed(SondaError),
}

/// The sparse field set one provider produced for one subject.
///
/// Immutable once returned by the adapter boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialRecord {
    /// Name of the provider that produced this record.
    pub provider: String,
    /// Outcome of the invocation.
    pub status: RecordStatus,
    /// Normalized fields. Empty unless `status` is `Ok`.
    pub fields: FieldMap,
    /// Fields this provider is authoritative for.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub authoritative: BTreeSet<Field>,
}

impl PartialRecord {
    /// Successful record with data.
    pub fn ok(provider: impl Into<String>, fields: FieldMap) -> Self {
        Self {
            provider: provider.into(),
            status: RecordStatus::Ok,
            fields,
            authoritative: BTreeSet::new(),
        }
    }

    /// Record asserting that the provider has no data for the subject.
    pub fn not_found(provider: impl Into<String>) -> Self {
        Self::without_fields(provider, RecordStatus::NotFound)
    }

    /// Record for a provider that was not invoked.
    pub fn skipped(provider: impl Into<String>, reason: SondaError) -> Self {
        Self::without_fields(provider, RecordStatus::Skipped(reason))
    }

    /// Record for a provider that failed.
    pub fn failed(provider: impl Into<String>, error: SondaError) -> Self {
        Self::without_fields(provider, RecordStatus::Failed(error))
    }

    fn without_fields(provider: impl Into<String>, status: RecordStatus) -> Self {
        Self {
            provider: provider.into(),
            status,
            fields: FieldMap::new(),
            authoritative: BTreeSet::new(),
        }
    }

    /// Attach the provider's authoritative field set.
    #[must_use]
    pub fn with_authoritative<I: IntoIterator<Item = Field>>(mut self, fields: I) -> Self {
        self.authoritative = fields.into_iter().collect();
        self
    }

    /// True for `Ok` and `NotFound` records.
    #[must_use]
    pub const fn is_usable(&self) -> bool {
        matches!(self.status, RecordStatus::Ok | RecordStatus::NotFound)
    }

    /// The error carried by a skipped or failed record.
    #[must_use]
    pub const fn error(&self) -> Option<&SondaError> {
        match &self.status {
            RecordStatus::Skipped(e) | RecordStatus::Failed(e) => Some(e),
            RecordStatus::Ok | RecordStatus::NotFound => None,
        }
    }

    /// Non-empty value for `field`, if this record is usable and carries one.
    #[must_use]
    pub fn value(&self, field: Field) -> Option<&FieldValue> {
        if !self.is_usable() {
            return None;
        }
        self.fields.get(&field).filter(|v| !v.is_empty())
    }

    /// True when the provider is authoritative for `field`.
    #[must_use]
    pub fn is_authoritative_for(&self, field: Field) -> bool {
        self.authoritative.contains(&field)
    }
}

/// A merged value together with the provider that supplied it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sourced {
    /// Winning value.
    pub value: FieldValue,
    /// Provider that supplied `value`.
    pub provider: String,
}

/// One merged record per subject.
///
/// Absent fields are simply missing from `fields`; consumers render them as
/// "not available" rather than as empty strings or zeroes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FinalRecord {
    /// Merged fields with provenance.
    pub fields: BTreeMap<Field, Sourced>,
    /// Capability probe results attached by the caller.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub probes: Vec<ProbeResult>,
}

impl FinalRecord {
    /// Value and provenance for `field`.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&Sourced> {
        self.fields.get(&field)
    }

    /// Value for `field`.
    #[must_use]
    pub fn value(&self, field: Field) -> Option<&FieldValue> {
        self.fields.get(&field).map(|s| &s.value)
    }

    /// Provider that supplied `field`.
    #[must_use]
    pub fn provider_of(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(|s| s.provider.as_str())
    }

    /// True when no field was populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of populated fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Attach probe results as the auxiliary section.
    #[must_use]
    pub fn with_probes(mut self, probes: Vec<ProbeResult>) -> Self {
        self.probes = probes;
        self
    }
}
