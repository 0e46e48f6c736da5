//! Subjects under investigation and their normalization rules.

use core::fmt;
use std::net::IpAddr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::SondaError;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9._%+-]+@[a-z0-9-]+(\.[a-z0-9-]+)*\.[a-z]{2,}$").expect("valid email regex")
});

static DOMAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z][a-z0-9-]{0,62}$")
        .expect("valid domain regex")
});

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._-]{1,64}$").expect("valid username regex"));

/// Kind of identifier being investigated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum SubjectType {
    /// IPv4 or IPv6 address.
    Ip,
    /// Telephone number, E.164 shaped.
    Phone,
    /// Email address.
    Email,
    /// Registrable domain name.
    Domain,
    /// Person's full name.
    Name,
    /// Online handle.
    Username,
}

impl SubjectType {
    /// All subject types, in display order.
    pub const ALL: [Self; 6] = [
        Self::Ip,
        Self::Phone,
        Self::Email,
        Self::Domain,
        Self::Name,
        Self::Username,
    ];

    /// Stable lowercase identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ip => "ip",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Domain => "domain",
            Self::Name => "name",
            Self::Username => "username",
        }
    }
}

impl fmt::Display for SubjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for SubjectType {
    type Err = SondaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SondaError::InvalidArg(format!("unknown subject type: {s}")))
    }
}

/// A normalized identifier tagged with its type.
///
/// The only way to build one is [`Subject::parse`], so every `Subject` in the
/// system has already been trimmed and canonicalized for its kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subject {
    kind: SubjectType,
    value: String,
}

impl Subject {
    /// Normalize `raw` for `kind`.
    ///
    /// Rules:
    /// - ip: must parse as an IPv4/IPv6 address; canonical textual form.
    /// - domain: scheme, path, port and trailing dot removed; lowercased.
    /// - phone: separators dropped, `00` prefix becomes `+`, `+` added when missing;
    ///   8 to 15 digits.
    /// - email: lowercased and shape-checked.
    /// - name: internal whitespace collapsed.
    /// - username: one leading `@` removed.
    ///
    /// # Errors
    /// Returns `InvalidSubject` when the input cannot be normalized.
    pub fn parse(kind: SubjectType, raw: &str) -> Result<Self, SondaError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SondaError::invalid_subject(kind.as_str(), "empty input"));
        }
        let value = match kind {
            SubjectType::Ip => normalize_ip(trimmed)?,
            SubjectType::Domain => normalize_domain(trimmed)?,
            SubjectType::Phone => normalize_phone(trimmed)?,
            SubjectType::Email => normalize_email(trimmed)?,
            SubjectType::Name => trimmed.split_whitespace().collect::<Vec<_>>().join(" "),
            SubjectType::Username => normalize_username(trimmed)?,
        };
        Ok(Self { kind, value })
    }

    /// Subject type tag.
    #[must_use]
    pub const fn kind(&self) -> SubjectType {
        self.kind
    }

    /// Normalized identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Phone digits without the leading `+`; the plain value for other kinds.
    #[must_use]
    pub fn digits(&self) -> &str {
        self.value.strip_prefix('+').unwrap_or(&self.value)
    }

    /// Domain part of an email subject.
    #[must_use]
    pub fn email_domain(&self) -> Option<&str> {
        if self.kind != SubjectType::Email {
            return None;
        }
        self.value.rsplit_once('@').map(|(_, d)| d)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

fn normalize_ip(s: &str) -> Result<String, SondaError> {
    s.parse::<IpAddr>()
        .map(|ip| ip.to_string())
        .map_err(|_| SondaError::invalid_subject("ip", format!("not an IP address: {s}")))
}

fn normalize_domain(s: &str) -> Result<String, SondaError> {
    let lowered = s.to_ascii_lowercase();
    let host = if lowered.contains("://") {
        url::Url::parse(&lowered)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .ok_or_else(|| SondaError::invalid_subject("domain", format!("no host in {s}")))?
    } else {
        let end = lowered.find(['/', '?', '#']).unwrap_or(lowered.len());
        let authority = &lowered[..end];
        authority
            .rsplit_once(':')
            .map_or(authority, |(h, _)| h)
            .to_string()
    };
    let host = host.trim_end_matches('.').to_string();
    if !DOMAIN_RE.is_match(&host) {
        return Err(SondaError::invalid_subject(
            "domain",
            format!("not a domain name: {s}"),
        ));
    }
    Ok(host)
}

fn normalize_phone(s: &str) -> Result<String, SondaError> {
    let compact: String = s
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')' | '\t'))
        .collect();
    let digits = if let Some(rest) = compact.strip_prefix('+') {
        rest
    } else if let Some(rest) = compact.strip_prefix("00") {
        rest
    } else {
        compact.as_str()
    };
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(SondaError::invalid_subject(
            "phone",
            format!("unexpected characters in {s}"),
        ));
    }
    if !(8..=15).contains(&digits.len()) {
        return Err(SondaError::invalid_subject(
            "phone",
            format!("expected 8-15 digits, got {}", digits.len()),
        ));
    }
    Ok(format!("+{digits}"))
}

fn normalize_email(s: &str) -> Result<String, SondaError> {
    let lowered = s.to_lowercase();
    if EMAIL_RE.is_match(&lowered) {
        Ok(lowered)
    } else {
        Err(SondaError::invalid_subject(
            "email",
            format!("not an email address: {s}"),
        ))
    }
}

fn normalize_username(s: &str) -> Result<String, SondaError> {
    let handle = s.strip_prefix('@').unwrap_or(s);
    if USERNAME_RE.is_match(handle) {
        Ok(handle.to_string())
    } else {
        Err(SondaError::invalid_subject(
            "username",
            format!("not a username: {s}"),
        ))
    }
}
