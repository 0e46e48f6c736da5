//! Shared HTTP plumbing: client construction, status mapping, and URL templating.

use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Client;
use sonda_core::{CredentialRequirement, ProviderSpec, SondaError, Subject};

/// Characters escaped when a value is spliced into a URL template.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const BODY_SNIPPET: usize = 200;

/// Build the HTTP client shared by all providers and page checkers.
///
/// Per-request timeouts come from each provider's spec; the client only
/// bounds connection setup.
///
/// # Errors
/// Returns `Network` if the TLS backend cannot be initialised.
pub fn build_http_client() -> Result<Client, SondaError> {
    Client::builder()
        .user_agent(concat!("sonda/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .map_err(|e| SondaError::network("http-client", e.to_string()))
}

/// Percent-encode one URL component.
pub(crate) fn encode(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Fill the `{subject}`, `{digits}` and `{key}` placeholders of a URL template.
///
/// Every substituted value is percent-encoded.
pub(crate) fn render(template: &str, subject: &Subject, key: Option<&str>) -> String {
    let mut url = template.replace("{subject}", &encode(subject.as_str()));
    if url.contains("{digits}") {
        url = url.replace("{digits}", &encode(subject.digits()));
    }
    if url.contains("{key}") {
        url = url.replace("{key}", &encode(key.unwrap_or_default()));
    }
    url
}

/// Map a non-2xx status to the provider error taxonomy.
///
/// Returns `None` for success statuses. A 401/403 from a provider that takes
/// no credential is an ordinary upstream refusal, not a key problem.
pub(crate) fn classify_status(spec: &ProviderSpec, status: u16, body: &str) -> Option<SondaError> {
    if (200..300).contains(&status) {
        return None;
    }
    let name = spec.name;
    Some(match status {
        401 | 403 if spec.credential != CredentialRequirement::None => {
            SondaError::credential_invalid(name, status)
        }
        429 => SondaError::rate_limited(name, format!("HTTP 429: {}", snippet(body))),
        404 => SondaError::not_found(format!("{name}: HTTP 404")),
        _ => SondaError::upstream(name, status, snippet(body)),
    })
}

/// Map a transport failure, distinguishing timeouts.
pub(crate) fn transport_error(spec: &ProviderSpec, err: &reqwest::Error) -> SondaError {
    if err.is_timeout() {
        SondaError::provider_timeout(spec.name, spec.timeout)
    } else {
        SondaError::network(spec.name, err.to_string())
    }
}

fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(BODY_SNIPPET) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}
