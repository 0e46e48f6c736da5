//! Email breach, reputation, and avatar providers.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use sha2::{Digest, Sha256};
use sonda_core::{
    BodyRule, Credential, Extract, Field, FieldAlias, FieldMap, FieldValue, Match, Provider,
    ProviderKey, ProviderSpec, RuleOutcome, Schema, SondaError, Subject, SubjectType,
};

use crate::adapter::{Auth, HttpProvider};
use crate::http;

/// Key of the Have I Been Pwned provider.
pub const HIBP: ProviderKey = ProviderKey::new("hibp");
/// Key of the emailrep.io provider.
pub const EMAILREP: ProviderKey = ProviderKey::new("emailrep");
/// Key of the Gravatar provider.
pub const GRAVATAR: ProviderKey = ProviderKey::new("gravatar");

// The breachedaccount endpoint answers with a bare array of breach objects.
static HIBP_SCHEMA: Schema = Schema {
    aliases: &[
        FieldAlias::new(Field::BreachNames, &[""], Extract::ListOf("Name")),
        FieldAlias::new(Field::BreachCount, &[""], Extract::Count),
    ],
    rules: &[BodyRule::new("0", Match::Missing, RuleOutcome::NotFound)],
};

static EMAILREP_SCHEMA: Schema = Schema {
    aliases: &[
        FieldAlias::text(Field::Reputation, &["reputation"]),
        FieldAlias::new(Field::Suspicious, &["suspicious"], Extract::Flag),
        FieldAlias::new(Field::References, &["references"], Extract::Number),
        FieldAlias::new(Field::IsDisposable, &["details.disposable"], Extract::Flag),
    ],
    rules: &[
        BodyRule::new("reason", Match::Contains("exceeded"), RuleOutcome::RateLimited),
        BodyRule::new("reason", Match::Contains("invalid api key"), RuleOutcome::CredentialInvalid),
        BodyRule::new("status", Match::Equals("fail"), RuleOutcome::Upstream),
    ],
};

/// Have I Been Pwned v3 breached-account endpoint. Requires a key.
///
/// A 404 means the address appears in no breach, which is a valid "no data"
/// answer. Authoritative for breach data.
#[must_use]
pub fn hibp(client: &Client) -> HttpProvider {
    HttpProvider::new(
        ProviderSpec::new(HIBP.as_str(), SubjectType::Email, "")
            .rank(10)
            .timeout(Duration::from_secs(8))
            .requires_credential()
            .authoritative_for(&[Field::BreachCount, Field::BreachNames]),
        client,
        "https://haveibeenpwned.com",
        "/api/v3/breachedaccount/{subject}?truncateResponse=false",
        &HIBP_SCHEMA,
    )
    .auth(Auth::Header("hibp-api-key"))
}

/// emailrep.io reputation endpoint. Works without a key at a low rate.
#[must_use]
pub fn emailrep(client: &Client) -> HttpProvider {
    HttpProvider::new(
        ProviderSpec::new(EMAILREP.as_str(), SubjectType::Email, "")
            .rank(20)
            .optional_credential(),
        client,
        "https://emailrep.io",
        "/{subject}",
        &EMAILREP_SCHEMA,
    )
    .auth(Auth::Header("Key"))
}

/// Gravatar avatar lookup.
///
/// Gravatar addresses avatars by the SHA-256 of the trimmed, lowercased
/// address; `d=404` makes missing avatars answer 404 instead of a default
/// image. The response body is an image and is never read.
pub struct GravatarProvider {
    spec: ProviderSpec,
    client: Client,
    base_url: String,
}

impl GravatarProvider {
    /// Provider against the public Gravatar host.
    #[must_use]
    pub fn new(client: &Client) -> Self {
        let mut me = Self {
            spec: ProviderSpec::new(GRAVATAR.as_str(), SubjectType::Email, "").rank(30),
            client: client.clone(),
            base_url: String::new(),
        };
        me.set_base_url("https://gravatar.com");
        me
    }

    /// Point the provider at another host, e.g. a local mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.set_base_url(base_url);
        self
    }

    fn set_base_url(&mut self, base_url: &str) {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self.spec.endpoint = format!("{}/avatar/{{sha256}}?d=404", self.base_url);
    }

    fn avatar_url(&self, subject: &Subject) -> String {
        let hash = Sha256::digest(subject.as_str().as_bytes());
        format!("{}/avatar/{hash:x}", self.base_url)
    }
}

#[async_trait]
impl Provider for GravatarProvider {
    fn spec(&self) -> &ProviderSpec {
        &self.spec
    }

    async fn fetch(
        &self,
        subject: &Subject,
        _credential: Option<&Credential>,
    ) -> Result<FieldMap, SondaError> {
        let spec = &self.spec;
        let url = self.avatar_url(subject);
        let resp = self
            .client
            .get(format!("{url}?d=404"))
            .timeout(spec.timeout)
            .send()
            .await
            .map_err(|e| http::transport_error(spec, &e))?;
        let status = resp.status().as_u16();
        if !(200..300).contains(&status) {
            let body = resp.text().await.unwrap_or_default();
            if let Some(err) = http::classify_status(spec, status, &body) {
                return Err(err);
            }
        }

        let mut fields = FieldMap::new();
        fields.insert(Field::GravatarUrl, FieldValue::text(url));
        Ok(fields)
    }
}
