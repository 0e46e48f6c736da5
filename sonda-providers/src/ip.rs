//! IP geolocation and reputation providers.

use reqwest::Client;
use sonda_core::{
    BodyRule, Extract, Field, FieldAlias, Match, ProviderKey, ProviderSpec, RuleOutcome, Schema,
    SubjectType,
};

use crate::adapter::{Auth, HttpProvider};

/// Key of the ip-api.com provider.
pub const IP_API: ProviderKey = ProviderKey::new("ip-api");
/// Key of the ipapi.co provider.
pub const IPAPI_CO: ProviderKey = ProviderKey::new("ipapi-co");
/// Key of the ipinfo.io provider.
pub const IPINFO: ProviderKey = ProviderKey::new("ipinfo");
/// Key of the AbuseIPDB provider.
pub const ABUSEIPDB: ProviderKey = ProviderKey::new("abuseipdb");

static IP_API_SCHEMA: Schema = Schema {
    aliases: &[
        FieldAlias::text(Field::City, &["city"]),
        FieldAlias::text(Field::Region, &["regionName", "region"]),
        FieldAlias::text(Field::Country, &["country"]),
        FieldAlias::text(Field::CountryCode, &["countryCode"]),
        FieldAlias::text(Field::PostalCode, &["zip"]),
        FieldAlias::text(Field::Timezone, &["timezone"]),
        FieldAlias::new(Field::Latitude, &["lat"], Extract::Number),
        FieldAlias::new(Field::Longitude, &["lon"], Extract::Number),
        FieldAlias::text(Field::Isp, &["isp"]),
        FieldAlias::text(Field::Org, &["org"]),
        FieldAlias::new(Field::Asn, &["as"], Extract::Asn),
        FieldAlias::text(Field::Hostname, &["reverse"]),
        FieldAlias::new(Field::IsProxy, &["proxy"], Extract::Flag),
        FieldAlias::new(Field::IsHosting, &["hosting"], Extract::Flag),
    ],
    rules: &[
        BodyRule::new("message", Match::Contains("range"), RuleOutcome::NotFound),
        BodyRule::new("status", Match::Equals("fail"), RuleOutcome::Upstream),
    ],
};

static IPAPI_CO_SCHEMA: Schema = Schema {
    aliases: &[
        FieldAlias::text(Field::City, &["city"]),
        FieldAlias::text(Field::Region, &["region"]),
        FieldAlias::text(Field::Country, &["country_name"]),
        FieldAlias::text(Field::CountryCode, &["country_code", "country"]),
        FieldAlias::text(Field::PostalCode, &["postal"]),
        FieldAlias::text(Field::Timezone, &["timezone"]),
        FieldAlias::new(Field::Latitude, &["latitude"], Extract::Number),
        FieldAlias::new(Field::Longitude, &["longitude"], Extract::Number),
        FieldAlias::text(Field::Org, &["org"]),
        FieldAlias::new(Field::Asn, &["asn"], Extract::Asn),
    ],
    rules: &[
        BodyRule::new("reserved", Match::Equals("true"), RuleOutcome::NotFound),
        BodyRule::new("reason", Match::Contains("ratelimit"), RuleOutcome::RateLimited),
        BodyRule::new("reason", Match::Contains("quota"), RuleOutcome::RateLimited),
        BodyRule::new("error", Match::Equals("true"), RuleOutcome::Upstream),
    ],
};

static IPINFO_SCHEMA: Schema = Schema {
    aliases: &[
        FieldAlias::text(Field::City, &["city"]),
        FieldAlias::text(Field::Region, &["region"]),
        FieldAlias::text(Field::CountryCode, &["country"]),
        FieldAlias::text(Field::PostalCode, &["postal"]),
        FieldAlias::text(Field::Timezone, &["timezone"]),
        FieldAlias::new(Field::Latitude, &["loc"], Extract::LocPart(0)),
        FieldAlias::new(Field::Longitude, &["loc"], Extract::LocPart(1)),
        // "AS15169 Google LLC": the refinement step splits ASN from the name.
        FieldAlias::text(Field::Org, &["org"]),
        FieldAlias::text(Field::Hostname, &["hostname"]),
    ],
    rules: &[
        BodyRule::new("bogon", Match::Equals("true"), RuleOutcome::NotFound),
        BodyRule::new("error.title", Match::Contains("rate"), RuleOutcome::RateLimited),
        BodyRule::new("error", Match::Present, RuleOutcome::Upstream),
    ],
};

static ABUSEIPDB_SCHEMA: Schema = Schema {
    aliases: &[
        FieldAlias::new(Field::AbuseScore, &["data.abuseConfidenceScore"], Extract::Number),
        FieldAlias::new(Field::TotalReports, &["data.totalReports"], Extract::Number),
        FieldAlias::text(Field::UsageType, &["data.usageType"]),
        FieldAlias::text(Field::Isp, &["data.isp"]),
        FieldAlias::text(Field::CountryCode, &["data.countryCode"]),
        FieldAlias::text(Field::Hostname, &["data.hostnames.0", "data.domain"]),
    ],
    rules: &[BodyRule::new("errors.0.detail", Match::Present, RuleOutcome::Upstream)],
};

/// ip-api.com JSON endpoint. Free tier, no key.
#[must_use]
pub fn ip_api(client: &Client) -> HttpProvider {
    HttpProvider::new(
        ProviderSpec::new(IP_API.as_str(), SubjectType::Ip, "").rank(10),
        client,
        "http://ip-api.com",
        "/json/{subject}?fields=status,message,country,countryCode,regionName,city,zip,lat,lon,timezone,isp,org,as,reverse,proxy,hosting",
        &IP_API_SCHEMA,
    )
}

/// ipapi.co JSON endpoint. Free tier, no key.
#[must_use]
pub fn ipapi_co(client: &Client) -> HttpProvider {
    HttpProvider::new(
        ProviderSpec::new(IPAPI_CO.as_str(), SubjectType::Ip, "").rank(20),
        client,
        "https://ipapi.co",
        "/{subject}/json/",
        &IPAPI_CO_SCHEMA,
    )
}

/// ipinfo.io JSON endpoint. Works without a token at a low rate.
#[must_use]
pub fn ipinfo(client: &Client) -> HttpProvider {
    HttpProvider::new(
        ProviderSpec::new(IPINFO.as_str(), SubjectType::Ip, "").rank(30),
        client,
        "https://ipinfo.io",
        "/{subject}/json",
        &IPINFO_SCHEMA,
    )
}

/// AbuseIPDB check endpoint. Requires a key; authoritative for abuse data.
#[must_use]
pub fn abuseipdb(client: &Client) -> HttpProvider {
    HttpProvider::new(
        ProviderSpec::new(ABUSEIPDB.as_str(), SubjectType::Ip, "")
            .rank(40)
            .requires_credential()
            .authoritative_for(&[Field::AbuseScore, Field::TotalReports, Field::UsageType]),
        client,
        "https://api.abuseipdb.com",
        "/api/v2/check?ipAddress={subject}&maxAgeInDays=90",
        &ABUSEIPDB_SCHEMA,
    )
    .auth(Auth::Header("Key"))
    .headers(&[("Accept", "application/json")])
}
