use chrono::Utc;
use sonda_core::merge;
use sonda_types::{Attempt, CredentialSet, LookupReport, SondaError, Subject, SubjectType};
use tokio_util::sync::CancellationToken;

use crate::Sonda;
use crate::router::util::{collapse_failures, warnings_from};

impl Sonda {
    /// Normalize `raw` as a `subject_type` subject, run its provider chain and
    /// merge the answers into a report.
    ///
    /// Behavior and trade-offs:
    /// - `credentials = None` is the same as an empty set: providers that
    ///   require a key are skipped and listed in `warnings`.
    /// - Individual provider failures never abort the lookup; they surface as
    ///   warnings and missing fields.
    /// - A subject type without providers yields an empty record, not an error.
    ///
    /// # Errors
    /// - `InvalidSubject` if `raw` does not normalize.
    /// - `NoProvidersAvailable` if every provider was skipped or failed. A
    ///   chain where everyone answered "not found" is a success with an
    ///   empty record.
    pub async fn lookup(
        &self,
        subject_type: SubjectType,
        raw: &str,
        credentials: Option<&CredentialSet>,
    ) -> Result<LookupReport, SondaError> {
        let subject = Subject::parse(subject_type, raw)?;
        let empty = CredentialSet::new();
        self.lookup_subject(&subject, credentials.unwrap_or(&empty)).await
    }

    /// Same as [`Sonda::lookup`] for an already normalized subject.
    ///
    /// # Errors
    /// `NoProvidersAvailable` if every provider was skipped or failed.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "sonda::router::lookup",
            skip(self, credentials),
            fields(subject_type = %subject.kind()),
        )
    )]
    pub async fn lookup_subject(
        &self,
        subject: &Subject,
        credentials: &CredentialSet,
    ) -> Result<LookupReport, SondaError> {
        let records = self.run_chain(subject, credentials).await;
        if let Some(err) = collapse_failures(subject.kind(), &records) {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %err, "no provider produced a usable answer");
            return Err(err);
        }

        Ok(LookupReport {
            subject: subject.clone(),
            record: merge(&records),
            attempts: records.iter().map(Attempt::from).collect(),
            warnings: warnings_from(&records),
            generated_at: Utc::now(),
        })
    }

    /// [`Sonda::lookup`] that stops as soon as `cancel` fires.
    ///
    /// In-flight provider calls are dropped, not awaited, and nothing is
    /// retried.
    ///
    /// # Errors
    /// `Cancelled` when the token fires first; otherwise as [`Sonda::lookup`].
    pub async fn lookup_with_cancel(
        &self,
        subject_type: SubjectType,
        raw: &str,
        credentials: Option<&CredentialSet>,
        cancel: &CancellationToken,
    ) -> Result<LookupReport, SondaError> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                #[cfg(feature = "tracing")]
                tracing::debug!(subject_type = %subject_type, "lookup cancelled");
                Err(SondaError::Cancelled)
            }
            res = self.lookup(subject_type, raw, credentials) => res,
        }
    }

    /// Look a subject up and probe the registered services at the same time.
    ///
    /// The probe results are attached to the merged record. Probes never make
    /// the call fail; a lookup error discards them.
    ///
    /// # Errors
    /// As [`Sonda::lookup`].
    pub async fn investigate(
        &self,
        subject_type: SubjectType,
        raw: &str,
        credentials: Option<&CredentialSet>,
    ) -> Result<LookupReport, SondaError> {
        let subject = Subject::parse(subject_type, raw)?;
        let empty = CredentialSet::new();
        let creds = credentials.unwrap_or(&empty);

        let (report, probes) = tokio::join!(
            self.lookup_subject(&subject, creds),
            self.probe_registered(&subject),
        );
        let mut report = report?;
        report.record = report.record.with_probes(probes);
        Ok(report)
    }
}
