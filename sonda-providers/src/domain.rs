//! Domain enumeration, DNS, and registration providers.

use std::time::Duration;

use reqwest::Client;
use sonda_core::{
    BodyRule, Extract, Field, FieldAlias, Match, ProviderKey, ProviderSpec, RuleOutcome, Schema,
    SubjectType,
};

use crate::adapter::HttpProvider;

/// Key of the crt.sh certificate transparency provider.
pub const CRTSH: ProviderKey = ProviderKey::new("crtsh");
/// Key of the DNS A record provider.
pub const DNS_A: ProviderKey = ProviderKey::new("dns-a");
/// Key of the DNS MX record provider.
pub const DNS_MX: ProviderKey = ProviderKey::new("dns-mx");
/// Key of the DNS NS record provider.
pub const DNS_NS: ProviderKey = ProviderKey::new("dns-ns");
/// Key of the RDAP registration provider.
pub const RDAP: ProviderKey = ProviderKey::new("rdap");

const DNS_HOST: &str = "https://dns.google";

static CRTSH_SCHEMA: Schema = Schema {
    aliases: &[FieldAlias::new(Field::Subdomains, &[""], Extract::ListOf("name_value"))],
    rules: &[BodyRule::new("0", Match::Missing, RuleOutcome::NotFound)],
};

// Status 3 is NXDOMAIN; a missing Answer section means no records of the type.
const DNS_RULES: &[BodyRule] = &[
    BodyRule::new("Status", Match::Equals("3"), RuleOutcome::NotFound),
    BodyRule::new("Answer", Match::Missing, RuleOutcome::NotFound),
];

static DNS_A_SCHEMA: Schema = Schema {
    aliases: &[FieldAlias::new(Field::ARecords, &["Answer"], Extract::ListOf("data"))],
    rules: DNS_RULES,
};

static DNS_MX_SCHEMA: Schema = Schema {
    aliases: &[FieldAlias::new(Field::MxRecords, &["Answer"], Extract::ListOf("data"))],
    rules: DNS_RULES,
};

static DNS_NS_SCHEMA: Schema = Schema {
    aliases: &[FieldAlias::new(Field::NsRecords, &["Answer"], Extract::ListOf("data"))],
    rules: DNS_RULES,
};

static RDAP_SCHEMA: Schema = Schema {
    aliases: &[
        FieldAlias::new(
            Field::Created,
            &["events"],
            Extract::Find {
                key: "eventAction",
                equals: "registration",
                take: "eventDate",
            },
        ),
        FieldAlias::new(
            Field::Expires,
            &["events"],
            Extract::Find {
                key: "eventAction",
                equals: "expiration",
                take: "eventDate",
            },
        ),
        FieldAlias::new(Field::DomainStatus, &["status"], Extract::List),
        FieldAlias::new(Field::NsRecords, &["nameservers"], Extract::ListOf("ldhName")),
    ],
    rules: &[BodyRule::new("errorCode", Match::Present, RuleOutcome::Upstream)],
};

/// crt.sh certificate search for `%.domain`. Slow; gets a long timeout.
#[must_use]
pub fn crtsh(client: &Client) -> HttpProvider {
    HttpProvider::new(
        ProviderSpec::new(CRTSH.as_str(), SubjectType::Domain, "")
            .rank(10)
            .timeout(Duration::from_secs(30)),
        client,
        "https://crt.sh",
        "/?q=%25.{subject}&output=json",
        &CRTSH_SCHEMA,
    )
}

fn dns(
    client: &Client,
    key: ProviderKey,
    rank: u32,
    path: &'static str,
    schema: &'static Schema,
) -> HttpProvider {
    HttpProvider::new(
        ProviderSpec::new(key.as_str(), SubjectType::Domain, "").rank(rank),
        client,
        DNS_HOST,
        path,
        schema,
    )
    .headers(&[("Accept", "application/dns-json")])
}

/// A records over DNS-over-HTTPS (JSON API).
#[must_use]
pub fn dns_a(client: &Client) -> HttpProvider {
    dns(client, DNS_A, 20, "/resolve?name={subject}&type=A", &DNS_A_SCHEMA)
}

/// MX records over DNS-over-HTTPS (JSON API).
#[must_use]
pub fn dns_mx(client: &Client) -> HttpProvider {
    dns(client, DNS_MX, 21, "/resolve?name={subject}&type=MX", &DNS_MX_SCHEMA)
}

/// NS records over DNS-over-HTTPS (JSON API).
#[must_use]
pub fn dns_ns(client: &Client) -> HttpProvider {
    dns(client, DNS_NS, 22, "/resolve?name={subject}&type=NS", &DNS_NS_SCHEMA)
}

/// RDAP domain record through the rdap.org bootstrap redirector.
///
/// Supplies registration dates, status codes and delegated nameservers.
#[must_use]
pub fn rdap(client: &Client) -> HttpProvider {
    HttpProvider::new(
        ProviderSpec::new(RDAP.as_str(), SubjectType::Domain, "").rank(40),
        client,
        "https://rdap.org",
        "/domain/{subject}",
        &RDAP_SCHEMA,
    )
    .headers(&[("Accept", "application/rdap+json")])
}
