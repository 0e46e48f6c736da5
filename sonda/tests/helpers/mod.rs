
pub use mock_provider::{MockProbe, MockProvider, ProbeAnswer};

use std::sync::Arc;

use sonda::{CredentialSet, Provider, Subject, SubjectType};



/// Common subject constants used across tests.
pub const UK_PHONE: &str = "+442071838750";
pub const US_PHONE: &str = "+14155552671";
pub const GOOGLE_DNS: &str = "8.8.8.8";
#[allow(dead_code)]
pub const EMAIL: &str = "alice@example.com";

/// Parse a subject, panicking on invalid fixtures.
#[allow(dead_code)]
pub fn subject(kind: SubjectType, raw: &str) -> Subject {
    Subject::parse(kind, raw).expect("valid fixture subject")
}

/// Credential set from `(provider, secret)` pairs.
#[allow(dead_code)]
pub fn creds(pairs: &[(&str, &str)]) -> CredentialSet {
    pairs
        .iter()
        .fold(CredentialSet::new(), |set, (p, s)| set.with(*p, *s))
}

/// Upcast a concrete mock to the trait object the builder takes.
#[allow(dead_code)]
pub fn dynp(p: &Arc<MockProvider>) -> Arc<dyn Provider> {
    p.clone()
}
