//! Phone number validation and carrier providers.

use std::time::Duration;

use reqwest::Client;
use sonda_core::{
    BodyRule, Extract, Field, FieldAlias, Match, ProviderKey, ProviderSpec, RuleOutcome, Schema,
    SubjectType,
};

use crate::adapter::HttpProvider;

/// Key of the numverify provider.
pub const NUMVERIFY: ProviderKey = ProviderKey::new("numverify");
/// Key of the veriphone provider.
pub const VERIPHONE: ProviderKey = ProviderKey::new("veriphone");

static NUMVERIFY_SCHEMA: Schema = Schema {
    aliases: &[
        FieldAlias::new(Field::Valid, &["valid"], Extract::Flag),
        FieldAlias::text(Field::CountryCode, &["country_code"]),
        FieldAlias::text(Field::Country, &["country_name"]),
        FieldAlias::text(Field::Region, &["location"]),
        FieldAlias::text(Field::Carrier, &["carrier"]),
        FieldAlias::text(Field::LineType, &["line_type"]),
        FieldAlias::text(Field::InternationalFormat, &["international_format"]),
        FieldAlias::text(Field::LocalFormat, &["local_format"]),
    ],
    rules: &[
        // 101: missing or invalid access key; 104: monthly quota reached.
        BodyRule::new("error.code", Match::Equals("101"), RuleOutcome::CredentialInvalid),
        BodyRule::new("error.code", Match::Equals("104"), RuleOutcome::RateLimited),
        BodyRule::new("success", Match::Equals("false"), RuleOutcome::Upstream),
    ],
};

static VERIPHONE_SCHEMA: Schema = Schema {
    aliases: &[
        FieldAlias::new(Field::Valid, &["phone_valid"], Extract::Flag),
        FieldAlias::text(Field::CountryCode, &["country_code"]),
        FieldAlias::text(Field::Country, &["country"]),
        FieldAlias::text(Field::Region, &["phone_region"]),
        FieldAlias::text(Field::Carrier, &["carrier"]),
        FieldAlias::text(Field::LineType, &["phone_type"]),
        FieldAlias::text(Field::InternationalFormat, &["international_number"]),
        FieldAlias::text(Field::LocalFormat, &["local_number"]),
    ],
    rules: &[
        BodyRule::new("code", Match::Equals("401"), RuleOutcome::CredentialInvalid),
        BodyRule::new("status", Match::Equals("error"), RuleOutcome::Upstream),
    ],
};

/// numverify (apilayer) validation endpoint. Requires a key.
#[must_use]
pub fn numverify(client: &Client) -> HttpProvider {
    HttpProvider::new(
        ProviderSpec::new(NUMVERIFY.as_str(), SubjectType::Phone, "")
            .rank(10)
            .timeout(Duration::from_secs(15))
            .requires_credential(),
        client,
        "http://apilayer.net",
        "/api/validate?access_key={key}&number={digits}",
        &NUMVERIFY_SCHEMA,
    )
}

/// veriphone verification endpoint. Requires a key.
#[must_use]
pub fn veriphone(client: &Client) -> HttpProvider {
    HttpProvider::new(
        ProviderSpec::new(VERIPHONE.as_str(), SubjectType::Phone, "")
            .rank(20)
            .requires_credential(),
        client,
        "https://api.veriphone.io",
        "/v2/verify?phone={subject}&key={key}",
        &VERIPHONE_SCHEMA,
    )
}
