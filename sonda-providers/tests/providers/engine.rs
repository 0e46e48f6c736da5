use std::sync::Arc;

use httpmock::prelude::*;
use serde_json::json;
use sonda::{AttemptOutcome, Field, FieldValue, Provider, Sonda, SubjectType};
use sonda_providers::{DisposableDomainsProvider, email, ip};

use crate::common::{client, creds};

#[tokio::test]
async fn fallback_fills_fields_the_first_provider_lacks() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/json/8.8.8.8");
            then.status(503).body("maintenance");
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/8.8.8.8/json");
            then.status(200).json_body(json!({
                "city": "Mountain View",
                "country": "US",
                "org": "AS15169 Google LLC"
            }));
        })
        .await;

    let c = client();
    let base = server.base_url();
    let providers: Vec<Arc<dyn Provider>> = vec![
        Arc::new(ip::ip_api(&c).with_base_url(&base)),
        Arc::new(ip::ipinfo(&c).with_base_url(&base)),
        Arc::new(ip::abuseipdb(&c).with_base_url(&base)),
    ];
    let sonda = Sonda::builder().with_providers(providers).build().unwrap();

    let report = sonda.lookup(SubjectType::Ip, "8.8.8.8", None).await.unwrap();
    assert_eq!(
        report.record.value(Field::City),
        Some(&FieldValue::text("Mountain View"))
    );
    assert_eq!(report.record.provider_of(Field::Asn), Some("ipinfo"));

    let outcomes: Vec<_> = report
        .attempts
        .iter()
        .map(|a| (a.provider.as_str(), a.outcome))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            ("ip-api", AttemptOutcome::Failed),
            ("ipinfo", AttemptOutcome::Ok),
            ("abuseipdb", AttemptOutcome::Skipped),
        ]
    );
    let warned: Vec<_> = report.warnings.iter().filter_map(|w| w.provider()).collect();
    assert_eq!(warned, vec!["ip-api", "abuseipdb"]);
    assert!(!report.warnings[1].is_actionable());
}

#[tokio::test]
async fn disposable_address_is_classified_without_the_network() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(500).body("upstream exploded");
        })
        .await;

    let c = client();
    let base = server.base_url();
    let providers: Vec<Arc<dyn Provider>> = vec![
        Arc::new(DisposableDomainsProvider::new()),
        Arc::new(email::hibp(&c).with_base_url(&base)),
        Arc::new(email::emailrep(&c).with_base_url(&base)),
    ];
    let sonda = Sonda::builder().with_providers(providers).build().unwrap();

    let report = sonda
        .lookup(
            SubjectType::Email,
            "User@Mailinator.com",
            Some(&creds(&[("hibp", "hk")])),
        )
        .await
        .unwrap();

    assert_eq!(
        report.record.value(Field::IsDisposable),
        Some(&FieldValue::Flag(true))
    );
    assert_eq!(
        report.record.provider_of(Field::IsDisposable),
        Some("disposable-domains")
    );
    assert_eq!(report.warnings.len(), 2);
}
