//! The default provider and probe sets, and credential discovery.

use std::sync::Arc;

use reqwest::Client;
use sonda_core::{CredentialSet, PageChecker, Probe, Provider};

use crate::email::{self, EMAILREP, GravatarProvider, HIBP};
use crate::ip::{self, ABUSEIPDB};
use crate::local::{DisposableDomainsProvider, PhonePrefixProvider, SocialSearchProvider};
use crate::phone::{self, NUMVERIFY, VERIPHONE};
use crate::{domain, probes};

/// Environment variable holding each keyed provider's credential.
pub const CREDENTIAL_ENV_VARS: &[(&str, &str)] = &[
    (HIBP.as_str(), "HIBP_API_KEY"),
    (ABUSEIPDB.as_str(), "ABUSEIPDB_API_KEY"),
    (NUMVERIFY.as_str(), "NUMVERIFY_API_KEY"),
    (VERIPHONE.as_str(), "VERIPHONE_API_KEY"),
    (EMAILREP.as_str(), "EMAILREP_API_KEY"),
];

/// Every built-in provider, for all subject types, sharing one client.
#[must_use]
pub fn default_providers(client: &Client) -> Vec<Arc<dyn Provider>> {
    vec![
        Arc::new(ip::ip_api(client)),
        Arc::new(ip::ipapi_co(client)),
        Arc::new(ip::ipinfo(client)),
        Arc::new(ip::abuseipdb(client)),
        Arc::new(phone::numverify(client)),
        Arc::new(phone::veriphone(client)),
        Arc::new(PhonePrefixProvider::new()),
        Arc::new(DisposableDomainsProvider::new()),
        Arc::new(email::hibp(client)),
        Arc::new(email::emailrep(client)),
        Arc::new(GravatarProvider::new(client)),
        Arc::new(domain::crtsh(client)),
        Arc::new(domain::dns_a(client)),
        Arc::new(domain::dns_mx(client)),
        Arc::new(domain::dns_ns(client)),
        Arc::new(domain::rdap(client)),
        Arc::new(SocialSearchProvider::new()),
    ]
}

/// Messaging probes for phones and profile probes for usernames.
#[must_use]
pub fn default_probes(checker: Arc<dyn PageChecker>) -> Vec<Arc<dyn Probe>> {
    let mut all = probes::phone_probes();
    all.extend(probes::username_probes(&checker));
    all
}

/// Credentials for the keyed providers, read from [`CREDENTIAL_ENV_VARS`].
///
/// Unset or blank variables are skipped; the matching providers are then
/// reported as skipped rather than called.
#[must_use]
pub fn credentials_from_env() -> CredentialSet {
    CredentialSet::from_env_vars(CREDENTIAL_ENV_VARS)
}
