use std::sync::Arc;

use async_trait::async_trait;
use sonda_core::{
    Credential, FieldMap, Probe, ProbeResult, Provider, ProviderSpec, SondaError, Subject,
    SubjectType,
};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockProbe, DynamicMockProvider, MockBehavior};

/// IP subject that makes every mock provider fail.
pub const FAIL_IP: &str = "203.0.113.1";
/// IP subject that makes every mock provider stall briefly.
pub const TIMEOUT_IP: &str = "203.0.113.2";
/// Phone subject that makes every mock provider fail.
pub const FAIL_PHONE: &str = "+15550000001";
/// Phone subject that makes every mock provider stall briefly.
pub const TIMEOUT_PHONE: &str = "+15550000002";

/// Mock provider for CI-safe examples. Provides deterministic data from static fixtures.
///
/// Subjects whose text starts with `fail` (or equals [`FAIL_IP`] / [`FAIL_PHONE`])
/// produce a network error; `timeout` subjects sleep for 200ms first. Unknown
/// subjects are reported as not found.
pub struct MockProvider {
    spec: ProviderSpec,
}

impl MockProvider {
    /// Mock provider for one subject type, named `sonda-mock-<type>`.
    #[must_use]
    pub fn new(subject_type: SubjectType) -> Self {
        let name = match subject_type {
            SubjectType::Ip => "sonda-mock-ip",
            SubjectType::Phone => "sonda-mock-phone",
            SubjectType::Email => "sonda-mock-email",
            SubjectType::Domain => "sonda-mock-domain",
            SubjectType::Name => "sonda-mock-name",
            SubjectType::Username => "sonda-mock-username",
            _ => unreachable!("unhandled SubjectType variant"),
        };
        Self {
            spec: ProviderSpec::new(name, subject_type, "mock://fixtures").rank(50),
        }
    }

    /// One mock provider per subject type.
    #[must_use]
    pub fn all() -> Vec<Arc<dyn Provider>> {
        SubjectType::ALL
            .into_iter()
            .map(|t| Arc::new(Self::new(t)) as Arc<dyn Provider>)
            .collect()
    }

    async fn maybe_fail_or_timeout(&self, subject: &Subject) -> Result<(), SondaError> {
        let s = subject.as_str();
        if s == FAIL_IP || s == FAIL_PHONE || s.starts_with("fail") {
            return Err(SondaError::network(self.spec.name, "forced failure"));
        }
        if s == TIMEOUT_IP || s == TIMEOUT_PHONE || s.starts_with("timeout") {
            // Short on purpose; callers decide whether it counts as a timeout.
            tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        }
        Ok(())
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn spec(&self) -> &ProviderSpec {
        &self.spec
    }

    async fn fetch(
        &self,
        subject: &Subject,
        _credential: Option<&Credential>,
    ) -> Result<FieldMap, SondaError> {
        self.maybe_fail_or_timeout(subject).await?;
        let s = subject.as_str();
        let found = match subject.kind() {
            SubjectType::Ip => fixtures::ip::by_ip(s),
            SubjectType::Phone => fixtures::phone::by_number(s),
            SubjectType::Email => fixtures::email::by_address(s),
            SubjectType::Domain => fixtures::domain::by_domain(s),
            SubjectType::Name => fixtures::name::by_name(s),
            SubjectType::Username => None,
            _ => unreachable!("unhandled SubjectType variant"),
        };
        found.ok_or_else(|| SondaError::not_found(format!("{} {s}", subject.kind())))
    }
}

/// Registration probe answering from a fixed list of known accounts.
pub struct MockProbe {
    service: &'static str,
    known: &'static [&'static str],
}

impl MockProbe {
    /// Probe for `service` that reports `known` usernames as registered.
    #[must_use]
    pub const fn new(service: &'static str, known: &'static [&'static str]) -> Self {
        Self { service, known }
    }

    /// A small set of username probes with deterministic answers.
    #[must_use]
    pub fn defaults() -> Vec<Arc<dyn Probe>> {
        vec![
            Arc::new(Self::new("github", &["octocat", "torvalds"])),
            Arc::new(Self::new("gitlab", &["torvalds"])),
            Arc::new(Self::new("keybase", &[])),
        ]
    }
}

#[async_trait]
impl Probe for MockProbe {
    fn service(&self) -> &'static str {
        self.service
    }

    fn supports(&self, subject_type: SubjectType) -> bool {
        subject_type == SubjectType::Username
    }

    async fn check(&self, subject: &Subject) -> Result<ProbeResult, SondaError> {
        let s = subject.as_str();
        if s.starts_with("fail") {
            return Err(SondaError::network(self.service, "forced failure"));
        }
        let url = format!("https://{}.example/{s}", self.service);
        Ok(if self.known.contains(&s) {
            ProbeResult::found(self.service, url)
        } else {
            ProbeResult::absent(self.service, url)
        })
    }
}
