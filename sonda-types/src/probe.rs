use serde::{Deserialize, Serialize};

/// Epistemic state of a capability probe.
///
/// `Absent` means the service positively answered "no such account";
/// `Inconclusive` means the probe could not tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    /// Registration confirmed.
    Found,
    /// Absence confirmed.
    Absent,
    /// Timeout, error, or manual verification required.
    Inconclusive,
}

/// Outcome of checking one service for one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    /// Service name, e.g. "whatsapp".
    pub service: String,
    /// True only when registration was positively confirmed.
    pub found: bool,
    /// Three-way state behind `found`.
    pub status: ProbeStatus,
    /// Human-readable status line.
    pub message: String,
}

impl ProbeResult {
    /// Registration confirmed.
    pub fn found(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_status(service, ProbeStatus::Found, message)
    }

    /// Absence confirmed.
    pub fn absent(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_status(service, ProbeStatus::Absent, message)
    }

    /// Could not tell.
    pub fn inconclusive(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_status(service, ProbeStatus::Inconclusive, message)
    }

    fn with_status(
        service: impl Into<String>,
        status: ProbeStatus,
        message: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            found: status == ProbeStatus::Found,
            status,
            message: message.into(),
        }
    }

    /// True when the result is neither confirmed found nor confirmed absent.
    #[must_use]
    pub fn is_inconclusive(&self) -> bool {
        self.status == ProbeStatus::Inconclusive
    }
}
