//! Sonda-specific data transfer objects and configuration primitives.
//!
//! Everything here is plain data: subjects and their normalization rules,
//! canonical fields, per-provider partial records, merged final records,
//! probe results, credentials, and the shared error taxonomy.
#![warn(missing_docs)]

mod config;
mod credentials;
mod error;
mod field;
mod probe;
mod provider;
mod record;
mod reports;
mod subject;

pub use config::{ChainStrategy, SondaConfig};
pub use credentials::{Credential, CredentialSet};
pub use error::SondaError;
pub use field::{Field, FieldValue};
pub use probe::{ProbeResult, ProbeStatus};
pub use provider::{CredentialRequirement, ProviderKey, ProviderSpec};
pub use record::{FieldMap, FinalRecord, PartialRecord, RecordStatus, Sourced};
pub use reports::{Attempt, AttemptOutcome, LookupReport};
pub use subject::{Subject, SubjectType};
