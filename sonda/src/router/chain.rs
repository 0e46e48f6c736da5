use std::sync::Arc;

use sonda_core::{Provider, SondaError, invoke};
use sonda_types::{ChainStrategy, CredentialSet, PartialRecord, Subject};

use crate::Sonda;

impl Sonda {
    /// Run the fallback chain for `subject` and collect one record per provider.
    ///
    /// Behavior and trade-offs:
    /// - Records come back in chain order regardless of completion order, so
    ///   merging them is deterministic under both strategies.
    /// - A provider that needs a credential the set does not hold is recorded
    ///   as `Skipped` without being called.
    /// - Any other provider error becomes a `Failed` record; the chain always
    ///   continues with the next provider.
    /// - A subject type with no registered providers yields an empty list.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "sonda::router::run_chain",
            skip(self, subject, credentials),
            fields(subject_type = %subject.kind(), strategy = ?self.cfg.chain_strategy),
        )
    )]
    pub async fn run_chain(
        &self,
        subject: &Subject,
        credentials: &CredentialSet,
    ) -> Vec<PartialRecord> {
        let chain = self.ordered(subject.kind());
        match self.cfg.chain_strategy {
            ChainStrategy::Concurrent => {
                let tasks = chain
                    .iter()
                    .map(|p| Self::attempt(Arc::clone(p), subject, credentials));
                futures::future::join_all(tasks).await
            }
            ChainStrategy::Sequential => {
                let mut out = Vec::with_capacity(chain.len());
                for p in &chain {
                    out.push(Self::attempt(Arc::clone(p), subject, credentials).await);
                }
                out
            }
            _ => unreachable!("unhandled ChainStrategy variant"),
        }
    }

    async fn attempt(
        provider: Arc<dyn Provider>,
        subject: &Subject,
        credentials: &CredentialSet,
    ) -> PartialRecord {
        match invoke(provider.as_ref(), subject, credentials).await {
            Ok(record) => record,
            Err(e @ SondaError::CredentialMissing { .. }) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(provider = provider.name(), "skipped: credential missing");
                PartialRecord::skipped(provider.name(), e)
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(provider = provider.name(), error = %e, "provider failed");
                PartialRecord::failed(provider.name(), e)
            }
        }
    }
}
