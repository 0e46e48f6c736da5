use async_trait::async_trait;

use sonda_types::{ProbeResult, SondaError, Subject, SubjectType};

/// A check of whether a subject is registered on one external service.
///
/// Probes are independent and share no mutable state. A probe that cannot
/// positively confirm registration returns `Absent` only when the service
/// gave a definite negative answer and `Inconclusive` otherwise. Errors
/// returned here are downgraded to `Inconclusive` by the orchestrator.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Service name, e.g. "github".
    fn service(&self) -> &'static str;

    /// Whether this probe applies to subjects of `subject_type`.
    fn supports(&self, subject_type: SubjectType) -> bool;

    /// Check `subject` against the service.
    async fn check(&self, subject: &Subject) -> Result<ProbeResult, SondaError>;
}

/// Narrow "does this page exist" capability.
///
/// Backed by plain HTTP, a headless browser, or a test double; probes only
/// depend on this answer.
#[async_trait]
pub trait PageChecker: Send + Sync {
    /// `Ok(true)` when a profile exists at `url`, `Ok(false)` when the
    /// service says it does not.
    async fn exists(&self, url: &str) -> Result<bool, SondaError>;
}
