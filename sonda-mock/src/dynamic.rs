use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use sonda_core::{
    Credential, FieldMap, Probe, ProbeResult, Provider, ProviderSpec, SondaError, Subject,
    SubjectType,
};

/// Scripted outcome of one mocked call.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Answer with this value.
    Return(T),
    /// Answer with this error.
    Fail(SondaError),
    /// Never answer, so the caller's deadline fires.
    Hang,
}

#[derive(Default)]
struct Script {
    fetch_rules: HashMap<String, MockBehavior<FieldMap>>,
    fetch_default: Option<MockBehavior<FieldMap>>,
    probe_rules: HashMap<String, MockBehavior<ProbeResult>>,
    requests: Vec<(Subject, bool)>,
}

/// Test-side handle that scripts a dynamic mock and inspects its calls.
#[derive(Clone)]
pub struct DynamicMockController {
    script: Arc<Mutex<Script>>,
}

impl DynamicMockController {
    /// Set the behavior of `fetch` for one normalized subject value.
    pub async fn set_behavior(&self, subject: &str, behavior: MockBehavior<FieldMap>) {
        let mut s = self.script.lock().await;
        s.fetch_rules.insert(subject.to_string(), behavior);
    }

    /// Set the behavior of `fetch` for subjects without a specific rule.
    pub async fn set_default_behavior(&self, behavior: MockBehavior<FieldMap>) {
        let mut s = self.script.lock().await;
        s.fetch_default = Some(behavior);
    }

    /// Set the behavior of `check` for one normalized subject value.
    pub async fn set_probe_behavior(&self, subject: &str, behavior: MockBehavior<ProbeResult>) {
        let mut s = self.script.lock().await;
        s.probe_rules.insert(subject.to_string(), behavior);
    }

    /// Subjects seen so far, in call order, with whether a credential was passed.
    pub async fn requests(&self) -> Vec<(Subject, bool)> {
        let s = self.script.lock().await;
        s.requests.clone()
    }

    /// Forget every scripted outcome and the request log.
    pub async fn reset(&self) {
        let mut s = self.script.lock().await;
        s.fetch_rules.clear();
        s.fetch_default = None;
        s.probe_rules.clear();
        s.requests.clear();
    }
}

async fn play<T>(behavior: Option<MockBehavior<T>>, what: &str) -> Result<T, SondaError> {
    match behavior {
        Some(MockBehavior::Return(v)) => Ok(v),
        Some(MockBehavior::Fail(e)) => Err(e),
        Some(MockBehavior::Hang) => {
            std::future::pending::<()>().await;
            unreachable!()
        }
        None => Err(SondaError::not_found(what.to_string())),
    }
}

/// A provider that defers all behavior to an external controller.
///
/// Subjects without a rule (and no default) answer "not found".
pub struct DynamicMockProvider {
    spec: ProviderSpec,
    script: Arc<Mutex<Script>>,
}

impl DynamicMockProvider {
    /// Create a new dynamic mock provider and its controller.
    #[must_use]
    pub fn new_with_controller(
        spec: ProviderSpec,
    ) -> (Arc<dyn Provider>, DynamicMockController) {
        let script = Arc::<Mutex<Script>>::default();
        let controller = DynamicMockController {
            script: Arc::clone(&script),
        };
        let me = Arc::new(Self { spec, script });
        (me as Arc<dyn Provider>, controller)
    }
}

#[async_trait]
impl Provider for DynamicMockProvider {
    fn spec(&self) -> &ProviderSpec {
        &self.spec
    }

    async fn fetch(
        &self,
        subject: &Subject,
        credential: Option<&Credential>,
    ) -> Result<FieldMap, SondaError> {
        // The lock is released before the outcome plays out.
        let behavior = {
            let mut s = self.script.lock().await;
            s.requests.push((subject.clone(), credential.is_some()));
            s.fetch_rules
                .get(subject.as_str())
                .or(s.fetch_default.as_ref())
                .cloned()
        };
        play(behavior, &format!("{} {subject}", self.spec.name)).await
    }
}

/// A probe that defers all behavior to an external controller.
///
/// Subjects without a rule are reported as inconclusive.
pub struct DynamicMockProbe {
    service: &'static str,
    supports: Vec<SubjectType>,
    script: Arc<Mutex<Script>>,
}

impl DynamicMockProbe {
    /// Create a new dynamic mock probe for `supports` and its controller.
    #[must_use]
    pub fn new_with_controller(
        service: &'static str,
        supports: &[SubjectType],
    ) -> (Arc<dyn Probe>, DynamicMockController) {
        let script = Arc::<Mutex<Script>>::default();
        let controller = DynamicMockController {
            script: Arc::clone(&script),
        };
        let me = Arc::new(Self {
            service,
            supports: supports.to_vec(),
            script,
        });
        (me as Arc<dyn Probe>, controller)
    }
}

#[async_trait]
impl Probe for DynamicMockProbe {
    fn service(&self) -> &'static str {
        self.service
    }

    fn supports(&self, subject_type: SubjectType) -> bool {
        self.supports.contains(&subject_type)
    }

    async fn check(&self, subject: &Subject) -> Result<ProbeResult, SondaError> {
        let behavior = {
            let mut s = self.script.lock().await;
            s.requests.push((subject.clone(), false));
            s.probe_rules.get(subject.as_str()).cloned()
        };
        match behavior {
            None => Ok(ProbeResult::inconclusive(self.service, "no rule configured")),
            some => play(some, self.service).await,
        }
    }
}
