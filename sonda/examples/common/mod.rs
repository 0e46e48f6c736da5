#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use sonda::{CredentialSet, Probe, Provider};
use sonda_providers::HttpPageChecker;

fn use_mock() -> bool {
    std::env::var("SONDA_EXAMPLES_USE_MOCK").is_ok()
}

/// Live providers, or the fixture-backed mocks in CI when
/// `SONDA_EXAMPLES_USE_MOCK` is set.
#[must_use]
pub fn get_providers() -> Vec<Arc<dyn Provider>> {
    if use_mock() {
        println!("--- (Using Mock Providers for CI) ---");
        return sonda_mock::MockProvider::all();
    }
    match sonda_providers::build_http_client() {
        Ok(client) => sonda_providers::default_providers(&client),
        Err(e) => {
            eprintln!("falling back to mock providers: {e}");
            sonda_mock::MockProvider::all()
        }
    }
}

#[must_use]
pub fn get_probes() -> Vec<Arc<dyn Probe>> {
    if use_mock() {
        return sonda_mock::MockProbe::defaults();
    }
    match sonda_providers::build_http_client() {
        Ok(client) => sonda_providers::default_probes(Arc::new(HttpPageChecker::new(
            &client,
            Duration::from_secs(10),
        ))),
        Err(_) => sonda_mock::MockProbe::defaults(),
    }
}

/// API keys from the environment; empty under the mock.
#[must_use]
pub fn get_credentials() -> CredentialSet {
    if use_mock() {
        CredentialSet::new()
    } else {
        sonda_providers::credentials_from_env()
    }
}
