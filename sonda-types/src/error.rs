use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the sonda workspace.
///
/// Provider-level variants describe why a single adapter produced no data.
/// They are recovered locally by the chain runner and only surface to callers
/// inside [`SondaError::NoProvidersAvailable`] or as report warnings.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SondaError {
    /// The provider requires a credential that was not supplied.
    #[error("{provider}: credential missing")]
    CredentialMissing {
        /// Provider name.
        provider: String,
    },

    /// The provider rejected the supplied credential (HTTP 401/403).
    #[error("{provider}: credential rejected (HTTP {status})")]
    CredentialInvalid {
        /// Provider name.
        provider: String,
        /// HTTP status returned by the provider.
        status: u16,
    },

    /// The provider throttled the request (HTTP 429 or a body marker).
    #[error("{provider}: rate limited: {msg}")]
    RateLimited {
        /// Provider name.
        provider: String,
        /// Human-readable detail.
        msg: String,
    },

    /// Connection failure or timeout.
    #[error("{provider}: network error: {msg}")]
    Network {
        /// Provider name.
        provider: String,
        /// Human-readable detail.
        msg: String,
    },

    /// A valid "no data" answer. Success-class for aggregation purposes.
    #[error("not found: {what}")]
    NotFound {
        /// Description of what was looked up, e.g. "breaches for a@b.c".
        what: String,
    },

    /// The response parsed but the expected fields were absent or malformed.
    #[error("{provider}: unexpected response: {msg}")]
    Schema {
        /// Provider name.
        provider: String,
        /// Human-readable detail.
        msg: String,
    },

    /// Any other non-success answer from the provider.
    #[error("{provider}: upstream error (HTTP {status}): {msg}")]
    Upstream {
        /// Provider name.
        provider: String,
        /// HTTP status, or 200 when the failure was signalled in the body.
        status: u16,
        /// Human-readable detail.
        msg: String,
    },

    /// Every configured provider failed and none returned usable data.
    #[error("no providers available for {subject_type}: {errors:?}")]
    NoProvidersAvailable {
        /// Subject type label (e.g. "phone").
        subject_type: String,
        /// The individual provider failures, in chain order.
        errors: Vec<SondaError>,
    },

    /// The raw subject string could not be normalized for its type.
    #[error("invalid {subject_type} subject: {msg}")]
    InvalidSubject {
        /// Subject type label.
        subject_type: String,
        /// Why normalization rejected the input.
        msg: String,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The caller abandoned the operation.
    #[error("cancelled")]
    Cancelled,
}

impl SondaError {
    /// Helper: build a `CredentialMissing` error.
    pub fn credential_missing(provider: impl Into<String>) -> Self {
        Self::CredentialMissing {
            provider: provider.into(),
        }
    }

    /// Helper: build a `CredentialInvalid` error.
    pub fn credential_invalid(provider: impl Into<String>, status: u16) -> Self {
        Self::CredentialInvalid {
            provider: provider.into(),
            status,
        }
    }

    /// Helper: build a `RateLimited` error.
    pub fn rate_limited(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::RateLimited {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Network` error.
    pub fn network(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Network {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build the `Network` error used when a provider call exceeds its budget.
    pub fn provider_timeout(provider: impl Into<String>, timeout: std::time::Duration) -> Self {
        Self::Network {
            provider: provider.into(),
            msg: format!("timed out after {}ms", timeout.as_millis()),
        }
    }

    /// A `NotFound` for `what`, e.g. `"hibp bob@example.com"`.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `Schema` error.
    pub fn schema(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Schema {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build an `Upstream` error.
    pub fn upstream(provider: impl Into<String>, status: u16, msg: impl Into<String>) -> Self {
        Self::Upstream {
            provider: provider.into(),
            status,
            msg: msg.into(),
        }
    }

    /// Helper: build an `InvalidSubject` error.
    pub fn invalid_subject(subject_type: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::InvalidSubject {
            subject_type: subject_type.into(),
            msg: msg.into(),
        }
    }

    /// True for outcomes that count as a successful answer ("confirmed no data").
    #[must_use]
    pub const fn is_success_class(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether the user can fix this, e.g. by supplying or renewing a key.
    ///
    /// A not-found answer or a provider the user simply has no key for is
    /// not actionable. Aggregates are classified based on their contents.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        match self {
            Self::NotFound { .. } | Self::CredentialMissing { .. } => false,
            Self::NoProvidersAvailable { errors, .. } => errors.iter().any(Self::is_actionable),
            _ => true,
        }
    }

    /// Provider name attached to a provider-level error, if any.
    #[must_use]
    pub fn provider(&self) -> Option<&str> {
        match self {
            Self::CredentialMissing { provider }
            | Self::CredentialInvalid { provider, .. }
            | Self::RateLimited { provider, .. }
            | Self::Network { provider, .. }
            | Self::Schema { provider, .. }
            | Self::Upstream { provider, .. } => Some(provider),
            _ => None,
        }
    }

    /// Flatten nested `NoProvidersAvailable` structures into a plain vector.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::NoProvidersAvailable { errors, .. } => {
                errors.into_iter().flat_map(Self::flatten).collect()
            }
            other => vec![other],
        }
    }
}
