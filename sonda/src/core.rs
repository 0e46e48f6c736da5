use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use sonda_core::{Probe, Provider, SondaError};
use sonda_types::{ChainStrategy, ProbeResult, SondaConfig, SubjectType};

/// Orchestrator that fans a subject out to registered providers and probes.
pub struct Sonda {
    pub(crate) providers: Vec<Arc<dyn Provider>>,
    pub(crate) probes: Vec<Arc<dyn Probe>>,
    pub(crate) cfg: SondaConfig,
}

/// Builder for constructing a `Sonda` orchestrator with custom configuration.
pub struct SondaBuilder {
    providers: Vec<Arc<dyn Provider>>,
    probes: Vec<Arc<dyn Probe>>,
    cfg: SondaConfig,
}

impl Default for SondaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SondaBuilder {
    /// Start a builder: no providers, no credentials, concurrent probing.
    ///
    /// Behavior and trade-offs:
    /// - Starts with no providers or probes. A subject type without providers
    ///   produces an empty record rather than an error.
    /// - Defaults: concurrent chain execution, 10s probe timeout, one probe
    ///   worker per service.
    #[must_use]
    pub fn new() -> Self {
        Self {
            providers: vec![],
            probes: vec![],
            cfg: SondaConfig::default(),
        }
    }

    /// Register a provider.
    ///
    /// Behavior and trade-offs:
    /// - Providers are grouped by their spec's subject type and ordered by rank.
    ///   Registration order only breaks rank ties.
    /// - Provider names must be unique; `build` rejects duplicates.
    #[must_use]
    pub fn with_provider(mut self, p: Arc<dyn Provider>) -> Self {
        self.providers.push(p);
        self
    }

    /// Register several providers at once, preserving their order.
    #[must_use]
    pub fn with_providers<I>(mut self, ps: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Provider>>,
    {
        self.providers.extend(ps);
        self
    }

    /// Register a capability probe.
    #[must_use]
    pub fn with_probe(mut self, p: Arc<dyn Probe>) -> Self {
        self.probes.push(p);
        self
    }

    /// Register several probes at once, preserving their order.
    #[must_use]
    pub fn with_probes<I>(mut self, ps: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Probe>>,
    {
        self.probes.extend(ps);
        self
    }

    /// Set preferred providers for a subject type using provider instances.
    ///
    /// Behavior and trade-offs:
    /// - Listed providers run first, in list order, and therefore win merge
    ///   ties. Unlisted providers still run afterwards by rank.
    /// - Takes provider handles rather than names, so a renamed provider cannot
    ///   silently fall out of the list.
    #[must_use]
    pub fn prefer_for_subject(
        mut self,
        subject_type: SubjectType,
        providers_desc: &[Arc<dyn Provider>],
    ) -> Self {
        let names: Vec<String> = providers_desc
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        self.cfg.per_subject_priority.insert(subject_type, names);
        self
    }

    /// Select how the chain runner schedules provider calls.
    ///
    /// Behavior and trade-offs:
    /// - `Concurrent`: all providers for the subject run at once; latency is
    ///   bounded by the slowest provider.
    /// - `Sequential`: one call at a time in chain order; gentler on shared
    ///   rate limits, latency is the sum of all calls.
    /// - Merge results are identical either way.
    #[must_use]
    pub const fn chain_strategy(mut self, strategy: ChainStrategy) -> Self {
        self.cfg.chain_strategy = strategy;
        self
    }

    /// Set the per-probe timeout. A probe that exceeds it is reported as inconclusive.
    #[must_use]
    pub const fn probe_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.probe_timeout = timeout;
        self
    }

    /// Cap the number of probes running at once.
    ///
    /// Total probe latency grows once the cap is below the number of services.
    #[must_use]
    pub const fn max_concurrent_probes(mut self, n: usize) -> Self {
        self.cfg.max_concurrent_probes = Some(n);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: SondaConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the `Sonda` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if two providers or two probes share a name, or if
    /// `max_concurrent_probes` is zero.
    pub fn build(mut self) -> Result<Sonda, SondaError> {
        let mut seen: HashSet<&'static str> = HashSet::new();
        for p in &self.providers {
            if !seen.insert(p.name()) {
                return Err(SondaError::InvalidArg(format!(
                    "duplicate provider name: {}",
                    p.name()
                )));
            }
        }
        let mut seen_probes: HashSet<&'static str> = HashSet::new();
        for p in &self.probes {
            if !seen_probes.insert(p.service()) {
                return Err(SondaError::InvalidArg(format!(
                    "duplicate probe service: {}",
                    p.service()
                )));
            }
        }
        if self.cfg.max_concurrent_probes == Some(0) {
            return Err(SondaError::InvalidArg(
                "max_concurrent_probes must be at least 1".to_string(),
            ));
        }

        // Validate preference keys against registered providers; drop unknowns and dedup.
        for names in self.cfg.per_subject_priority.values_mut() {
            let mut kept: HashSet<String> = HashSet::new();
            names.retain(|n| seen.contains(n.as_str()) && kept.insert(n.clone()));
        }

        Ok(Sonda {
            providers: self.providers,
            probes: self.probes,
            cfg: self.cfg,
        })
    }
}

impl Sonda {
    /// Start building a new `Sonda` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use sonda::{Sonda, SubjectType};
    ///
    /// let numverify = Arc::new(sonda_providers::phone::numverify(&client));
    /// let veriphone = Arc::new(sonda_providers::phone::veriphone(&client));
    ///
    /// let sonda = Sonda::builder()
    ///     .with_provider(numverify.clone())
    ///     .with_provider(veriphone.clone())
    ///     .prefer_for_subject(SubjectType::Phone, &[veriphone, numverify])
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> SondaBuilder {
        SondaBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &SondaConfig {
        &self.cfg
    }

    /// Providers for `subject_type` in chain order.
    ///
    /// Order key: position in the subject's preference list (unlisted last),
    /// then spec rank, then registration index.
    pub(crate) fn ordered(&self, subject_type: SubjectType) -> Vec<Arc<dyn Provider>> {
        let mut out: Vec<(usize, Arc<dyn Provider>)> = self
            .providers
            .iter()
            .filter(|p| p.spec().subject_type == subject_type)
            .cloned()
            .enumerate()
            .collect();

        let pos: HashMap<&str, usize> = self
            .cfg
            .per_subject_priority
            .get(&subject_type)
            .map(|pref| {
                pref.iter()
                    .enumerate()
                    .map(|(i, n)| (n.as_str(), i))
                    .collect()
            })
            .unwrap_or_default();

        out.sort_by_key(|(orig_i, p)| {
            (
                pos.get(p.name()).copied().unwrap_or(usize::MAX),
                p.spec().rank,
                *orig_i,
            )
        });
        out.into_iter().map(|(_, p)| p).collect()
    }

    /// Names of the providers that would run for `subject_type`, in chain order.
    #[must_use]
    pub fn chain_for(&self, subject_type: SubjectType) -> Vec<&'static str> {
        self.ordered(subject_type)
            .iter()
            .map(|p| p.name())
            .collect()
    }

    /// Wrap a probe future with a timeout and standardized inconclusive mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "sonda::core::probe_call_with_timeout",
            skip(fut),
            fields(
                service = service,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn probe_call_with_timeout<Fut>(
        service: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> ProbeResult
    where
        Fut: core::future::Future<Output = Result<ProbeResult, SondaError>>,
    {
        match tokio::time::timeout(timeout, fut).await {
            Ok(Ok(r)) => r,
            Ok(Err(e)) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(service, error = %e, "probe failed");
                ProbeResult::inconclusive(service, format!("check failed: {e}"))
            }
            Err(_) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(service, "probe timed out");
                ProbeResult::inconclusive(
                    service,
                    format!("timed out after {}ms", timeout.as_millis()),
                )
            }
        }
    }
}
