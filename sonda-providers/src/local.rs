//! Providers that answer from static data, without any network access.

use async_trait::async_trait;
use sonda_core::{
    Credential, Field, FieldMap, FieldValue, Provider, ProviderKey, ProviderSpec, SondaError,
    Subject, SubjectType, disposable::is_disposable_domain,
};

use crate::http::encode;

/// Key of the offline disposable-domain classifier.
pub const DISPOSABLE_DOMAINS: ProviderKey = ProviderKey::new("disposable-domains");
/// Key of the offline calling-code classifier.
pub const PHONE_PREFIX: ProviderKey = ProviderKey::new("phone-prefix");
/// Key of the offline social search link builder.
pub const SOCIAL_SEARCH: ProviderKey = ProviderKey::new("social-search");

/// Flags addresses whose domain is on the disposable-mail list.
///
/// Always answers, so `is_disposable` is known even when every network
/// provider fails. Authoritative for that field.
pub struct DisposableDomainsProvider {
    spec: ProviderSpec,
}

impl DisposableDomainsProvider {
    /// Create the provider.
    #[must_use]
    pub fn new() -> Self {
        Self {
            spec: ProviderSpec::new(
                DISPOSABLE_DOMAINS.as_str(),
                SubjectType::Email,
                "local://disposable-domains",
            )
                .rank(5)
                .authoritative_for(&[Field::IsDisposable]),
        }
    }
}

impl Default for DisposableDomainsProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for DisposableDomainsProvider {
    fn spec(&self) -> &ProviderSpec {
        &self.spec
    }

    async fn fetch(
        &self,
        subject: &Subject,
        _credential: Option<&Credential>,
    ) -> Result<FieldMap, SondaError> {
        let domain = subject
            .email_domain()
            .ok_or_else(|| SondaError::schema(self.spec.name, "subject has no domain part"))?;
        let mut fields = FieldMap::new();
        fields.insert(Field::IsDisposable, FieldValue::Flag(is_disposable_domain(domain)));
        Ok(fields)
    }
}

/// ITU calling code, ISO 3166 alpha-2 code, country name.
///
/// `1` resolves to the United States; the NANP shares it with Canada and
/// the Caribbean, which cannot be told apart without area-code tables.
const CALLING_CODES: &[(&str, &str, &str)] = &[
    ("1", "US", "United States"),
    ("7", "RU", "Russia"),
    ("20", "EG", "Egypt"),
    ("27", "ZA", "South Africa"),
    ("30", "GR", "Greece"),
    ("31", "NL", "Netherlands"),
    ("32", "BE", "Belgium"),
    ("33", "FR", "France"),
    ("34", "ES", "Spain"),
    ("36", "HU", "Hungary"),
    ("39", "IT", "Italy"),
    ("40", "RO", "Romania"),
    ("41", "CH", "Switzerland"),
    ("43", "AT", "Austria"),
    ("44", "GB", "United Kingdom"),
    ("45", "DK", "Denmark"),
    ("46", "SE", "Sweden"),
    ("47", "NO", "Norway"),
    ("48", "PL", "Poland"),
    ("49", "DE", "Germany"),
    ("51", "PE", "Peru"),
    ("52", "MX", "Mexico"),
    ("54", "AR", "Argentina"),
    ("55", "BR", "Brazil"),
    ("56", "CL", "Chile"),
    ("57", "CO", "Colombia"),
    ("60", "MY", "Malaysia"),
    ("61", "AU", "Australia"),
    ("62", "ID", "Indonesia"),
    ("63", "PH", "Philippines"),
    ("64", "NZ", "New Zealand"),
    ("65", "SG", "Singapore"),
    ("66", "TH", "Thailand"),
    ("81", "JP", "Japan"),
    ("82", "KR", "South Korea"),
    ("84", "VN", "Vietnam"),
    ("86", "CN", "China"),
    ("90", "TR", "Turkey"),
    ("91", "IN", "India"),
    ("92", "PK", "Pakistan"),
    ("98", "IR", "Iran"),
    ("212", "MA", "Morocco"),
    ("234", "NG", "Nigeria"),
    ("254", "KE", "Kenya"),
    ("351", "PT", "Portugal"),
    ("353", "IE", "Ireland"),
    ("358", "FI", "Finland"),
    ("380", "UA", "Ukraine"),
    ("420", "CZ", "Czech Republic"),
    ("852", "HK", "Hong Kong"),
    ("886", "TW", "Taiwan"),
    ("966", "SA", "Saudi Arabia"),
    ("971", "AE", "United Arab Emirates"),
    ("972", "IL", "Israel"),
];

/// Longest calling-code prefix of `digits` (three, then two, then one digit).
fn calling_code(digits: &str) -> Option<(&'static str, &'static str, &'static str)> {
    (1..=3).rev().find_map(|len| {
        let prefix = digits.get(..len)?;
        CALLING_CODES.iter().copied().find(|(code, _, _)| *code == prefix)
    })
}

/// Derives country and international format from the calling code alone.
pub struct PhonePrefixProvider {
    spec: ProviderSpec,
}

impl PhonePrefixProvider {
    /// Create the provider. Ranked last so any live carrier lookup wins.
    #[must_use]
    pub fn new() -> Self {
        Self {
            spec: ProviderSpec::new(
                PHONE_PREFIX.as_str(),
                SubjectType::Phone,
                "local://calling-codes",
            )
                .rank(90),
        }
    }
}

impl Default for PhonePrefixProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for PhonePrefixProvider {
    fn spec(&self) -> &ProviderSpec {
        &self.spec
    }

    async fn fetch(
        &self,
        subject: &Subject,
        _credential: Option<&Credential>,
    ) -> Result<FieldMap, SondaError> {
        let digits = subject.digits();
        let (code, iso, country) = calling_code(digits).ok_or_else(|| {
            SondaError::not_found(format!("{}: no calling code for {subject}", self.spec.name))
        })?;

        let mut fields = FieldMap::new();
        fields.insert(Field::CountryCode, FieldValue::text(iso));
        fields.insert(Field::Country, FieldValue::text(country));
        fields.insert(
            Field::InternationalFormat,
            FieldValue::text(format!("+{code} {}", &digits[code.len()..])),
        );
        Ok(fields)
    }
}

/// Builds people-search links on the major social networks for a name.
///
/// Nothing is fetched; the links are for an analyst to follow.
pub struct SocialSearchProvider {
    spec: ProviderSpec,
}

impl SocialSearchProvider {
    /// Create the provider.
    #[must_use]
    pub fn new() -> Self {
        Self {
            spec: ProviderSpec::new(
                SOCIAL_SEARCH.as_str(),
                SubjectType::Name,
                "local://social-search",
            )
                .rank(10),
        }
    }
}

impl Default for SocialSearchProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for SocialSearchProvider {
    fn spec(&self) -> &ProviderSpec {
        &self.spec
    }

    async fn fetch(
        &self,
        subject: &Subject,
        _credential: Option<&Credential>,
    ) -> Result<FieldMap, SondaError> {
        let q = encode(subject.as_str());
        let links = [
            (
                Field::LinkedinUrl,
                format!("https://www.linkedin.com/search/results/people/?keywords={q}"),
            ),
            (
                Field::FacebookUrl,
                format!("https://www.facebook.com/search/people/?q={q}"),
            ),
            (Field::TwitterUrl, format!("https://x.com/search?q={q}&f=user")),
            (
                Field::InstagramUrl,
                format!("https://www.instagram.com/explore/search/keyword/?q={q}"),
            ),
        ];
        Ok(links
            .into_iter()
            .map(|(field, url)| (field, FieldValue::Text(url)))
            .collect())
    }
}
