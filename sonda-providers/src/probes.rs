//! Registration probes: URL-backed username probes and manual phone probes.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use sonda_core::{PageChecker, Probe, ProbeResult, SondaError, Subject, SubjectType};

use crate::http;

/// [`PageChecker`] over plain HTTP GET.
///
/// 200 means the page exists, 404 and 410 mean it does not; anything else
/// (redirects to a login wall, 429, 5xx) is an error, which probes report
/// as inconclusive.
pub struct HttpPageChecker {
    client: Client,
    timeout: Duration,
}

impl HttpPageChecker {
    /// Checker with a per-request `timeout`.
    #[must_use]
    pub fn new(client: &Client, timeout: Duration) -> Self {
        Self {
            client: client.clone(),
            timeout,
        }
    }
}

#[async_trait]
impl PageChecker for HttpPageChecker {
    async fn exists(&self, url: &str) -> Result<bool, SondaError> {
        let resp = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SondaError::provider_timeout(url, self.timeout)
                } else {
                    SondaError::network(url, e.to_string())
                }
            })?;
        match resp.status().as_u16() {
            200 => Ok(true),
            404 | 410 => Ok(false),
            status => Err(SondaError::upstream(url, status, "unexpected status")),
        }
    }
}

/// Username probe that asks a [`PageChecker`] whether a profile page exists.
pub struct UrlProbe {
    service: &'static str,
    template: &'static str,
    checker: Arc<dyn PageChecker>,
}

impl UrlProbe {
    /// Probe for `service` whose profile URL is `template` with `{subject}`
    /// replaced by the username.
    #[must_use]
    pub fn new(
        service: &'static str,
        template: &'static str,
        checker: Arc<dyn PageChecker>,
    ) -> Self {
        Self {
            service,
            template,
            checker,
        }
    }
}

#[async_trait]
impl Probe for UrlProbe {
    fn service(&self) -> &'static str {
        self.service
    }

    fn supports(&self, subject_type: SubjectType) -> bool {
        subject_type == SubjectType::Username
    }

    async fn check(&self, subject: &Subject) -> Result<ProbeResult, SondaError> {
        let url = http::render(self.template, subject, None);
        Ok(if self.checker.exists(&url).await? {
            ProbeResult::found(self.service, url)
        } else {
            ProbeResult::absent(self.service, url)
        })
    }
}

/// Phone probe for services with no public lookup.
///
/// Always inconclusive; the message carries a deep link or instructions so
/// an analyst can verify by hand.
pub struct ManualProbe {
    service: &'static str,
    hint: &'static str,
}

impl ManualProbe {
    /// Probe for `service`; `{digits}` in `hint` is replaced by the number.
    #[must_use]
    pub const fn new(service: &'static str, hint: &'static str) -> Self {
        Self { service, hint }
    }
}

#[async_trait]
impl Probe for ManualProbe {
    fn service(&self) -> &'static str {
        self.service
    }

    fn supports(&self, subject_type: SubjectType) -> bool {
        subject_type == SubjectType::Phone
    }

    async fn check(&self, subject: &Subject) -> Result<ProbeResult, SondaError> {
        Ok(ProbeResult::inconclusive(
            self.service,
            format!(
                "manual verification required: {}",
                http::render(self.hint, subject, None)
            ),
        ))
    }
}

const MESSAGING: &[(&str, &str)] = &[
    ("whatsapp", "https://wa.me/{digits}"),
    ("telegram", "https://t.me/+{digits}"),
    ("signal", "https://signal.me/#p/+{digits}"),
    ("viber", "viber://chat?number=%2B{digits}"),
    ("wechat", "search +{digits} under Add Contacts in WeChat"),
    ("line", "search +{digits} under Add Friends in LINE"),
];

const PROFILES: &[(&str, &str)] = &[
    ("github", "https://github.com/{subject}"),
    ("gitlab", "https://gitlab.com/{subject}"),
    ("reddit", "https://www.reddit.com/user/{subject}"),
    ("keybase", "https://keybase.io/{subject}"),
    ("dev.to", "https://dev.to/{subject}"),
    ("medium", "https://medium.com/@{subject}"),
];

/// Manual probes for the common messaging apps.
#[must_use]
pub fn phone_probes() -> Vec<Arc<dyn Probe>> {
    MESSAGING
        .iter()
        .map(|&(service, hint)| Arc::new(ManualProbe::new(service, hint)) as Arc<dyn Probe>)
        .collect()
}

/// Profile-page probes for common developer and social sites.
#[must_use]
pub fn username_probes(checker: &Arc<dyn PageChecker>) -> Vec<Arc<dyn Probe>> {
    PROFILES
        .iter()
        .map(|&(service, template)| {
            Arc::new(UrlProbe::new(service, template, Arc::clone(checker))) as Arc<dyn Probe>
        })
        .collect()
}
