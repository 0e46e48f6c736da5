use async_trait::async_trait;

use sonda_types::{
    Credential, CredentialRequirement, CredentialSet, FieldMap, PartialRecord, ProviderKey,
    ProviderSpec, SondaError, Subject,
};

/// One external data source for one subject type.
///
/// Implementations perform a single outbound request per `fetch` and turn the
/// response into canonical fields. They report "no data for this subject" as
/// `SondaError::NotFound`; every other problem maps to one of the provider-level
/// error variants. Callers go through [`invoke`], which enforces the spec's
/// credential requirement and timeout.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Static description of this provider.
    fn spec(&self) -> &ProviderSpec;

    /// Provider name, taken from the spec.
    fn name(&self) -> &'static str {
        self.spec().name
    }

    /// Typed key for priority configuration.
    fn key(&self) -> ProviderKey {
        ProviderKey::new(self.name())
    }

    /// Query the provider for `subject`.
    ///
    /// `credential` is `Some` whenever the caller holds a key for this provider.
    async fn fetch(
        &self,
        subject: &Subject,
        credential: Option<&Credential>,
    ) -> Result<FieldMap, SondaError>;
}

/// Invoke `provider` for `subject` at the adapter boundary.
///
/// - A subject of the wrong type is rejected with `InvalidArg`.
/// - A required but absent credential fails fast with `CredentialMissing`;
///   `fetch` is not called.
/// - `fetch` is bounded by the spec timeout; expiry maps to a `Network` error.
/// - `NotFound` becomes a successful record that asserts zero results.
///
/// # Errors
/// Returns the provider-level failure for every other outcome.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "sonda_core::invoke",
        skip(provider, subject, credentials),
        fields(provider = provider.name(), subject_type = %subject.kind()),
    )
)]
pub async fn invoke(
    provider: &dyn Provider,
    subject: &Subject,
    credentials: &CredentialSet,
) -> Result<PartialRecord, SondaError> {
    let spec = provider.spec();
    if spec.subject_type != subject.kind() {
        return Err(SondaError::InvalidArg(format!(
            "{} handles {} subjects, got {}",
            spec.name,
            spec.subject_type,
            subject.kind()
        )));
    }

    let credential = credentials.get(spec.name);
    if spec.credential == CredentialRequirement::Required && credential.is_none() {
        return Err(SondaError::credential_missing(spec.name));
    }

    let res = tokio::time::timeout(spec.timeout, provider.fetch(subject, credential))
        .await
        .unwrap_or_else(|_| Err(SondaError::provider_timeout(spec.name, spec.timeout)));

    match res {
        Ok(fields) => {
            Ok(PartialRecord::ok(spec.name, fields)
                .with_authoritative(spec.authoritative.iter().copied()))
        }
        Err(SondaError::NotFound { .. }) => Ok(PartialRecord::not_found(spec.name)),
        Err(e) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(provider = spec.name, error = %e, "provider failed");
            Err(e)
        }
    }
}
