use std::sync::Arc;

use futures::StreamExt;
use sonda_core::{Probe, SondaError};
use sonda_types::{ProbeResult, Subject};
use tokio_util::sync::CancellationToken;

use crate::Sonda;

impl Sonda {
    /// Check `subject` against each of `services`.
    ///
    /// Behavior and trade-offs:
    /// - Probes run concurrently, at most `max_concurrent_probes` at a time
    ///   (one worker per service by default), so total latency tracks the
    ///   slowest probe rather than the sum.
    /// - Results come back in the order of `services`, one per service.
    /// - Errors, timeouts and probes that do not support the subject type are
    ///   reported as `Inconclusive`, never as `Absent`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "sonda::router::probe",
            skip(self, services),
            fields(subject_type = %subject.kind(), services = services.len()),
        )
    )]
    pub async fn probe(&self, subject: &Subject, services: &[Arc<dyn Probe>]) -> Vec<ProbeResult> {
        let width = self
            .cfg
            .max_concurrent_probes
            .unwrap_or(services.len())
            .max(1);
        let timeout = self.cfg.probe_timeout;

        futures::stream::iter(services.iter().cloned())
            .map(|probe| async move {
                let service = probe.service();
                if !probe.supports(subject.kind()) {
                    return ProbeResult::inconclusive(
                        service,
                        format!("{} subjects are not supported", subject.kind()),
                    );
                }
                Self::probe_call_with_timeout(service, timeout, probe.check(subject)).await
            })
            .buffered(width)
            .collect()
            .await
    }

    /// Run every registered probe that supports the subject's type.
    pub async fn probe_registered(&self, subject: &Subject) -> Vec<ProbeResult> {
        let services: Vec<Arc<dyn Probe>> = self
            .probes
            .iter()
            .filter(|p| p.supports(subject.kind()))
            .cloned()
            .collect();
        self.probe(subject, &services).await
    }

    /// [`Sonda::probe`] that stops as soon as `cancel` fires.
    ///
    /// # Errors
    /// `Cancelled` when the token fires before every probe has answered.
    pub async fn probe_with_cancel(
        &self,
        subject: &Subject,
        services: &[Arc<dyn Probe>],
        cancel: &CancellationToken,
    ) -> Result<Vec<ProbeResult>, SondaError> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                #[cfg(feature = "tracing")]
                tracing::debug!("probing cancelled");
                Err(SondaError::Cancelled)
            }
            results = self.probe(subject, services) => Ok(results),
        }
    }
}
