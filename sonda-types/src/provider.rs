//! Provider metadata types usable across crates.

use std::time::Duration;

use crate::field::Field;
use crate::subject::SubjectType;

/// Typed key for identifying providers in priority configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProviderKey(pub &'static str);

impl ProviderKey {
    /// Construct a new typed provider key from a static name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The key as a `&'static str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl From<ProviderKey> for &'static str {
    fn from(k: ProviderKey) -> Self {
        k.0
    }
}

/// Whether a provider needs an API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialRequirement {
    /// Anonymous endpoint.
    #[default]
    None,
    /// A key raises limits or unlocks fields but is not needed.
    Optional,
    /// Without a key the provider is skipped and never called.
    Required,
}

/// Static description of one external data source for one subject type.
///
/// Specs are defined once at startup and never mutated. The `endpoint` is a
/// template; adapters substitute placeholders such as `{subject}` and `{key}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSpec {
    /// Unique provider name; also the key looked up in a `CredentialSet`.
    pub name: &'static str,
    /// Subject type this provider answers for.
    pub subject_type: SubjectType,
    /// Endpoint template.
    pub endpoint: String,
    /// Budget for one invocation.
    pub timeout: Duration,
    /// Credential requirement.
    pub credential: CredentialRequirement,
    /// Ordering rank; lower ranks run first and win merge ties.
    pub rank: u32,
    /// Fields for which this provider beats earlier-ranked providers.
    pub authoritative: Vec<Field>,
}

impl ProviderSpec {
    /// Default per-invocation budget.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// New spec with the default timeout, no credential, rank 100.
    pub fn new(name: &'static str, subject_type: SubjectType, endpoint: impl Into<String>) -> Self {
        Self {
            name,
            subject_type,
            endpoint: endpoint.into(),
            timeout: Self::DEFAULT_TIMEOUT,
            credential: CredentialRequirement::None,
            rank: 100,
            authoritative: Vec::new(),
        }
    }

    /// Set the per-invocation timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the ordering rank.
    #[must_use]
    pub const fn rank(mut self, rank: u32) -> Self {
        self.rank = rank;
        self
    }

    /// Mark the provider as requiring a credential.
    #[must_use]
    pub const fn requires_credential(mut self) -> Self {
        self.credential = CredentialRequirement::Required;
        self
    }

    /// Mark the provider as accepting an optional credential.
    #[must_use]
    pub const fn optional_credential(mut self) -> Self {
        self.credential = CredentialRequirement::Optional;
        self
    }

    /// Declare the fields this provider is authoritative for.
    #[must_use]
    pub fn authoritative_for(mut self, fields: &[Field]) -> Self {
        self.authoritative = fields.to_vec();
        self
    }

    /// Typed key for this spec.
    #[must_use]
    pub const fn key(&self) -> ProviderKey {
        ProviderKey::new(self.name)
    }
}
