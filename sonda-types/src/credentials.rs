//! Explicit credential input.

use core::fmt;
use std::collections::HashMap;

/// A secret string. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Borrow the secret for request construction.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Mapping from provider name to credential.
///
/// Absent entries simply disable providers that require a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialSet {
    entries: HashMap<String, Credential>,
}

impl CredentialSet {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, provider: impl Into<String>, secret: impl Into<String>) -> Self {
        self.insert(provider, secret);
        self
    }

    /// Insert or replace the credential for `provider`. Blank secrets are ignored.
    pub fn insert(&mut self, provider: impl Into<String>, secret: impl Into<String>) {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return;
        }
        self.entries
            .insert(provider.into(), Credential::new(secret.trim()));
    }

    /// Credential for `provider`, if any.
    #[must_use]
    pub fn get(&self, provider: &str) -> Option<&Credential> {
        self.entries.get(provider)
    }

    /// True when a credential for `provider` is present.
    #[must_use]
    pub fn contains(&self, provider: &str) -> bool {
        self.entries.contains_key(provider)
    }

    /// Number of credentials held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no credentials are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Populate from environment variables, one `(provider, VAR)` pair per entry.
    ///
    /// Unset or blank variables are skipped.
    #[must_use]
    pub fn from_env_vars(pairs: &[(&str, &str)]) -> Self {
        let mut set = Self::new();
        for (provider, var) in pairs {
            if let Ok(v) = std::env::var(var) {
                set.insert(*provider, v);
            }
        }
        set
    }
}
