//! sonda-core
//!
//! Core traits and pure algorithms shared across the sonda ecosystem.
//!
//! - `provider`: the `Provider` trait and the `invoke` adapter boundary.
//! - `probe`: the `Probe` and `PageChecker` traits used by capability probing.
//! - `normalize`: declarative field-alias schemas and per-subject normalizers.
//! - `merge`: the field-precedence merger.
//! - `disposable`: the static disposable-mail domain set.
//!
//! Async runtime (Tokio)
//! ---------------------
//! `invoke` bounds each provider call with `tokio::time::timeout`, so callers
//! must run under a Tokio 1.x runtime with the time driver enabled.
#![warn(missing_docs)]

/// Static disposable-mail domain list.
pub mod disposable;
/// Field-precedence merge of partial records.
pub mod merge;
/// Declarative response normalization.
pub mod normalize;
/// Capability probe traits.
pub mod probe;
/// Provider trait and adapter boundary.
pub mod provider;

pub use merge::merge;
pub use normalize::{BodyRule, Extract, FieldAlias, Match, RuleOutcome, Schema, normalize, normalize_body};
pub use probe::{PageChecker, Probe};
pub use provider::{Provider, invoke};
pub use sonda_types::*;
