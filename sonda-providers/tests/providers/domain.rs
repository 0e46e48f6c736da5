use httpmock::prelude::*;
use serde_json::json;
use sonda_core::{Field, FieldValue, Provider, RecordStatus, SondaError, SubjectType, invoke};
use sonda_providers::domain;

use crate::common::{client, creds, subject};

#[tokio::test]
async fn crtsh_names_are_cleaned_and_sorted() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).query_param("output", "json");
            then.status(200).json_body(json!([
                {"id": 1, "name_value": "www.example.com\nexample.com"},
                {"id": 2, "name_value": "*.example.com"},
                {"id": 3, "name_value": "API.example.com"}
            ]));
        })
        .await;

    let p = domain::crtsh(&client()).with_base_url(&server.base_url());
    let f = p
        .fetch(&subject(SubjectType::Domain, "example.com"), None)
        .await
        .unwrap();
    assert_eq!(
        f.get(&Field::Subdomains),
        Some(&FieldValue::list(["api.example.com", "example.com", "www.example.com"]))
    );
}

#[tokio::test]
async fn crtsh_empty_array_is_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).json_body(json!([]));
        })
        .await;

    let p = domain::crtsh(&client()).with_base_url(&server.base_url());
    let rec = invoke(&p, &subject(SubjectType::Domain, "fresh.example"), &creds(&[]))
        .await
        .unwrap();
    assert_eq!(rec.status, RecordStatus::NotFound);
}

#[tokio::test]
async fn dns_answers_and_empty_answers() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/resolve")
                .query_param("name", "example.com")
                .query_param("type", "MX");
            then.status(200).json_body(json!({
                "Status": 0,
                "Answer": [
                    {"name": "example.com.", "type": 15, "TTL": 300, "data": "10 Mail.Example.com."},
                    {"name": "example.com.", "type": 15, "TTL": 300, "data": "20 backup.example.com."}
                ]
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/resolve")
                .query_param("name", "example.com")
                .query_param("type", "A");
            then.status(200).json_body(json!({"Status": 0, "Question": [{"name": "example.com.", "type": 1}]}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/resolve")
                .query_param("name", "nxdomain.example");
            then.status(200).json_body(json!({"Status": 3}));
        })
        .await;

    let c = client();
    let base = server.base_url();
    let example = subject(SubjectType::Domain, "Example.com");

    let mx = domain::dns_mx(&c).with_base_url(&base);
    let f = mx.fetch(&example, None).await.unwrap();
    assert_eq!(
        f.get(&Field::MxRecords),
        Some(&FieldValue::list(["10 mail.example.com", "20 backup.example.com"]))
    );

    let a = domain::dns_a(&c).with_base_url(&base);
    let rec = invoke(&a, &example, &creds(&[])).await.unwrap();
    assert_eq!(rec.status, RecordStatus::NotFound);

    let ns = domain::dns_ns(&c).with_base_url(&base);
    let err = ns
        .fetch(&subject(SubjectType::Domain, "nxdomain.example"), None)
        .await
        .unwrap_err();
    assert!(err.is_success_class(), "{err:?}");
}

#[tokio::test]
async fn rdap_events_status_and_nameservers() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/domain/example.com");
            then.status(200).json_body(json!({
                "objectClassName": "domain",
                "ldhName": "EXAMPLE.COM",
                "status": ["client delete prohibited", "Client Transfer Prohibited"],
                "events": [
                    {"eventAction": "registration", "eventDate": "1995-08-14T04:00:00Z"},
                    {"eventAction": "expiration", "eventDate": "2030-08-13T04:00:00Z"},
                    {"eventAction": "last changed", "eventDate": "2024-08-14T07:01:34Z"}
                ],
                "nameservers": [
                    {"objectClassName": "nameserver", "ldhName": "A.IANA-SERVERS.NET"},
                    {"objectClassName": "nameserver", "ldhName": "B.IANA-SERVERS.NET"}
                ]
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/domain/broken.example");
            then.status(200).json_body(json!({"errorCode": 500, "title": "backend unavailable"}));
        })
        .await;

    let p = domain::rdap(&client()).with_base_url(&server.base_url());
    let f = p
        .fetch(&subject(SubjectType::Domain, "example.com"), None)
        .await
        .unwrap();
    assert_eq!(f.get(&Field::Created), Some(&FieldValue::text("1995-08-14")));
    assert_eq!(f.get(&Field::Expires), Some(&FieldValue::text("2030-08-13")));
    assert_eq!(
        f.get(&Field::DomainStatus),
        Some(&FieldValue::list(["client delete prohibited", "client transfer prohibited"]))
    );
    assert_eq!(
        f.get(&Field::NsRecords),
        Some(&FieldValue::list(["a.iana-servers.net", "b.iana-servers.net"]))
    );

    let err = p
        .fetch(&subject(SubjectType::Domain, "broken.example"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, SondaError::Upstream { status: 200, .. }), "{err:?}");
}
