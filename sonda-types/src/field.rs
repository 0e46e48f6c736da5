use core::fmt;
use serde::{Deserialize, Serialize};

use crate::subject::SubjectType;

/// Canonical field names shared by every provider of a subject type.
///
/// Providers disagree on key names, nesting and units; normalizers map their
/// responses onto these names so the merger can compare like with like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Field {
    // Location and network (ip, shared by phone for country data).
    /// City name.
    City,
    /// Region, state or province.
    Region,
    /// Country display name.
    Country,
    /// ISO 3166-1 alpha-2 country code.
    CountryCode,
    /// Postal or ZIP code.
    PostalCode,
    /// IANA timezone name.
    Timezone,
    /// Latitude in decimal degrees.
    Latitude,
    /// Longitude in decimal degrees.
    Longitude,
    /// Internet service provider.
    Isp,
    /// Organization owning the address block.
    Org,
    /// Autonomous system number, e.g. `AS15169`.
    Asn,
    /// Reverse DNS hostname.
    Hostname,
    /// Address is a known proxy or VPN exit.
    IsProxy,
    /// Address belongs to a hosting provider.
    IsHosting,
    /// Abuse confidence score (0-100).
    AbuseScore,
    /// Number of abuse reports.
    TotalReports,
    /// Usage classification (e.g. "Data Center/Web Hosting/Transit").
    UsageType,

    // Phone.
    /// Whether the number or address is valid.
    Valid,
    /// Carrier or operator name.
    Carrier,
    /// Line type (mobile, landline, voip, ...).
    LineType,
    /// International format of the number.
    InternationalFormat,
    /// National format of the number.
    LocalFormat,

    // Email.
    /// Address belongs to a disposable-mail domain.
    IsDisposable,
    /// Number of known breaches.
    BreachCount,
    /// Names of known breaches.
    BreachNames,
    /// Gravatar image URL.
    GravatarUrl,
    /// Reputation label reported by a reputation service.
    Reputation,
    /// Reputation service flags the address as suspicious.
    Suspicious,
    /// Number of references found on the web.
    References,

    // Domain.
    /// Subdomains seen in certificate transparency logs.
    Subdomains,
    /// IPv4 address records.
    ARecords,
    /// Mail exchanger records.
    MxRecords,
    /// Name server records.
    NsRecords,
    /// Registration date.
    Created,
    /// Expiration date.
    Expires,
    /// Registry status codes.
    DomainStatus,

    // Name.
    /// LinkedIn people-search URL.
    LinkedinUrl,
    /// Facebook people-search URL.
    FacebookUrl,
    /// Twitter/X user-search URL.
    TwitterUrl,
    /// Instagram search URL.
    InstagramUrl,
}

const IP_FIELDS: &[Field] = &[
    Field::City,
    Field::Region,
    Field::Country,
    Field::CountryCode,
    Field::PostalCode,
    Field::Timezone,
    Field::Latitude,
    Field::Longitude,
    Field::Isp,
    Field::Org,
    Field::Asn,
    Field::Hostname,
    Field::IsProxy,
    Field::IsHosting,
    Field::AbuseScore,
    Field::TotalReports,
    Field::UsageType,
];

const PHONE_FIELDS: &[Field] = &[
    Field::Valid,
    Field::CountryCode,
    Field::Country,
    Field::Region,
    Field::Carrier,
    Field::LineType,
    Field::InternationalFormat,
    Field::LocalFormat,
];

const EMAIL_FIELDS: &[Field] = &[
    Field::IsDisposable,
    Field::BreachCount,
    Field::BreachNames,
    Field::GravatarUrl,
    Field::Reputation,
    Field::Suspicious,
    Field::References,
];

const DOMAIN_FIELDS: &[Field] = &[
    Field::Subdomains,
    Field::ARecords,
    Field::MxRecords,
    Field::NsRecords,
    Field::Created,
    Field::Expires,
    Field::DomainStatus,
];

const NAME_FIELDS: &[Field] = &[
    Field::LinkedinUrl,
    Field::FacebookUrl,
    Field::TwitterUrl,
    Field::InstagramUrl,
];

impl Field {
    /// Stable snake_case identifier for logs, errors and serialized output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::City => "city",
            Self::Region => "region",
            Self::Country => "country",
            Self::CountryCode => "country_code",
            Self::PostalCode => "postal_code",
            Self::Timezone => "timezone",
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
            Self::Isp => "isp",
            Self::Org => "org",
            Self::Asn => "asn",
            Self::Hostname => "hostname",
            Self::IsProxy => "is_proxy",
            Self::IsHosting => "is_hosting",
            Self::AbuseScore => "abuse_score",
            Self::TotalReports => "total_reports",
            Self::UsageType => "usage_type",
            Self::Valid => "valid",
            Self::Carrier => "carrier",
            Self::LineType => "line_type",
            Self::InternationalFormat => "international_format",
            Self::LocalFormat => "local_format",
            Self::IsDisposable => "is_disposable",
            Self::BreachCount => "breach_count",
            Self::BreachNames => "breach_names",
            Self::GravatarUrl => "gravatar_url",
            Self::Reputation => "reputation",
            Self::Suspicious => "suspicious",
            Self::References => "references",
            Self::Subdomains => "subdomains",
            Self::ARecords => "a_records",
            Self::MxRecords => "mx_records",
            Self::NsRecords => "ns_records",
            Self::Created => "created",
            Self::Expires => "expires",
            Self::DomainStatus => "domain_status",
            Self::LinkedinUrl => "linkedin_url",
            Self::FacebookUrl => "facebook_url",
            Self::TwitterUrl => "twitter_url",
            Self::InstagramUrl => "instagram_url",
        }
    }

    /// Human-readable label for reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::City => "City",
            Self::Region => "Region",
            Self::Country => "Country",
            Self::CountryCode => "Country Code",
            Self::PostalCode => "Postal Code",
            Self::Timezone => "Timezone",
            Self::Latitude => "Latitude",
            Self::Longitude => "Longitude",
            Self::Isp => "ISP",
            Self::Org => "Organization",
            Self::Asn => "ASN",
            Self::Hostname => "Hostname",
            Self::IsProxy => "Proxy/VPN",
            Self::IsHosting => "Hosting",
            Self::AbuseScore => "Abuse Score",
            Self::TotalReports => "Abuse Reports",
            Self::UsageType => "Usage Type",
            Self::Valid => "Valid",
            Self::Carrier => "Carrier",
            Self::LineType => "Line Type",
            Self::InternationalFormat => "International Format",
            Self::LocalFormat => "Local Format",
            Self::IsDisposable => "Disposable",
            Self::BreachCount => "Breach Count",
            Self::BreachNames => "Breaches",
            Self::GravatarUrl => "Gravatar",
            Self::Reputation => "Reputation",
            Self::Suspicious => "Suspicious",
            Self::References => "References",
            Self::Subdomains => "Subdomains",
            Self::ARecords => "A Records",
            Self::MxRecords => "MX Records",
            Self::NsRecords => "NS Records",
            Self::Created => "Created",
            Self::Expires => "Expires",
            Self::DomainStatus => "Status",
            Self::LinkedinUrl => "LinkedIn",
            Self::FacebookUrl => "Facebook",
            Self::TwitterUrl => "Twitter/X",
            Self::InstagramUrl => "Instagram",
        }
    }

    /// Canonical field set for a subject type, in report order.
    #[must_use]
    pub const fn canonical(subject_type: SubjectType) -> &'static [Self] {
        match subject_type {
            SubjectType::Ip => IP_FIELDS,
            SubjectType::Phone => PHONE_FIELDS,
            SubjectType::Email => EMAIL_FIELDS,
            SubjectType::Domain => DOMAIN_FIELDS,
            SubjectType::Name => NAME_FIELDS,
            SubjectType::Username => &[],
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single normalized value.
///
/// Serialized untagged so reports read naturally as JSON scalars and arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Boolean flag.
    Flag(bool),
    /// Numeric value; coordinates and scores are 64-bit floats.
    Number(f64),
    /// Free text.
    Text(String),
    /// Ordered list of strings.
    List(Vec<String>),
}

impl FieldValue {
    /// Convenience constructor for text values.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Convenience constructor for list values.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// True when the value carries no information: blank text, an empty
    /// list, or a non-finite number. Flags are never empty and `0.0` is a
    /// real value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Flag(_) => false,
            Self::Number(n) => !n.is_finite(),
            Self::Text(s) => s.trim().is_empty(),
            Self::List(v) => v.iter().all(|s| s.trim().is_empty()),
        }
    }

    /// Text view, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view, if this is a number.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Flag view, if this is a boolean.
    #[must_use]
    pub const fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            _ => None,
        }
    }

    /// List view, if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(true) => f.write_str("yes"),
            Self::Flag(false) => f.write_str("no"),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{n:.0}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::List(v) => f.write_str(&v.join(", ")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(v: Vec<String>) -> Self {
        Self::List(v)
    }
}
