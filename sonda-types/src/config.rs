//! Configuration types shared across the orchestrator and its callers.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::subject::SubjectType;

/// How the chain runner schedules provider invocations.
///
/// Either way every provider is attempted and merge precedence follows the
/// configured order, not completion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ChainStrategy {
    /// Invoke all providers concurrently.
    #[default]
    Concurrent,
    /// Invoke providers one after another in rank order.
    Sequential,
}

/// Global configuration for the `Sonda` orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SondaConfig {
    /// Scheduling of provider invocations within one lookup.
    pub chain_strategy: ChainStrategy,
    /// Preferred provider order per subject type. Listed providers run first,
    /// in list order; unlisted providers follow by rank.
    pub per_subject_priority: HashMap<SubjectType, Vec<String>>,
    /// Budget for a single capability probe.
    pub probe_timeout: Duration,
    /// Upper bound on concurrently running probes; `None` runs one worker per service.
    pub max_concurrent_probes: Option<usize>,
}

impl Default for SondaConfig {
    fn default() -> Self {
        Self {
            chain_strategy: ChainStrategy::default(),
            per_subject_priority: HashMap::new(),
            probe_timeout: Duration::from_secs(10),
            max_concurrent_probes: None,
        }
    }
}
