use async_trait::async_trait;
use reqwest::Client;
use sonda_core::{Credential, FieldMap, Provider, ProviderSpec, Schema, SondaError, Subject};

use crate::http;

/// Where a provider expects its API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    /// No key, or the key is spliced into the URL through `{key}`.
    Url,
    /// Sent in the named request header.
    Header(&'static str),
}

/// A provider backed by one JSON-over-HTTP GET endpoint.
///
/// The endpoint is `base_url` followed by a path template whose `{subject}`,
/// `{digits}` and `{key}` placeholders are percent-encoded on substitution.
/// Responses go through status mapping, the schema's body rules, and then
/// the normalizer. A 2xx body that yields no canonical field at all is a
/// schema error.
pub struct HttpProvider {
    spec: ProviderSpec,
    schema: &'static Schema,
    auth: Auth,
    headers: &'static [(&'static str, &'static str)],
    client: Client,
    base_url: String,
    path: &'static str,
}

impl HttpProvider {
    /// Create a provider; `spec.endpoint` is overwritten with the full template.
    #[must_use]
    pub fn new(
        spec: ProviderSpec,
        client: &Client,
        base_url: &str,
        path: &'static str,
        schema: &'static Schema,
    ) -> Self {
        let mut me = Self {
            spec,
            schema,
            auth: Auth::Url,
            headers: &[],
            client: client.clone(),
            base_url: String::new(),
            path,
        };
        me.set_base_url(base_url);
        me
    }

    /// Send the credential in a header instead of the URL.
    #[must_use]
    pub const fn auth(mut self, auth: Auth) -> Self {
        self.auth = auth;
        self
    }

    /// Static headers added to every request.
    #[must_use]
    pub const fn headers(mut self, headers: &'static [(&'static str, &'static str)]) -> Self {
        self.headers = headers;
        self
    }

    /// Point the provider at another host, e.g. a local mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.set_base_url(base_url);
        self
    }

    fn set_base_url(&mut self, base_url: &str) {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self.spec.endpoint = format!("{}{}", self.base_url, self.path);
    }

    fn url(&self, subject: &Subject, credential: Option<&Credential>) -> String {
        let key = match self.auth {
            Auth::Url => credential.map(Credential::expose),
            Auth::Header(_) => None,
        };
        http::render(&self.spec.endpoint, subject, key)
    }
}

#[async_trait]
impl Provider for HttpProvider {
    fn spec(&self) -> &ProviderSpec {
        &self.spec
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "sonda_providers::http_fetch",
            skip(self, subject, credential),
            fields(provider = self.spec.name),
        )
    )]
    async fn fetch(
        &self,
        subject: &Subject,
        credential: Option<&Credential>,
    ) -> Result<FieldMap, SondaError> {
        let spec = &self.spec;
        let mut req = self
            .client
            .get(self.url(subject, credential))
            .timeout(spec.timeout);
        for (name, value) in self.headers {
            req = req.header(*name, *value);
        }
        if let (Auth::Header(name), Some(c)) = (self.auth, credential) {
            req = req.header(name, c.expose());
        }

        let resp = req
            .send()
            .await
            .map_err(|e| http::transport_error(spec, &e))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| http::transport_error(spec, &e))?;

        if let Some(err) = http::classify_status(spec, status, &body) {
            return Err(err);
        }
        let raw: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| SondaError::schema(spec.name, format!("invalid JSON: {e}")))?;
        if let Some(err) = self.schema.classify(spec.name, status, &raw) {
            return Err(err);
        }

        let fields = sonda_core::normalize(spec.subject_type, self.schema, &raw);
        if fields.is_empty() {
            return Err(SondaError::schema(
                spec.name,
                "response carried none of the expected fields",
            ));
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(provider = spec.name, fields = fields.len(), "normalized response");
        Ok(fields)
    }
}
