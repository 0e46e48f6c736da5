use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;
use sonda_core::{
    Field, FieldAlias, FieldValue, Provider, ProviderSpec, RecordStatus, Schema, SondaError,
    SubjectType, invoke,
};
use sonda_providers::{HttpProvider, ip};

use crate::common::{client, creds, subject};

#[tokio::test]
async fn ip_api_response_is_normalized() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/json/8.8.8.8");
            then.status(200).json_body(json!({
                "status": "success",
                "country": "United States",
                "countryCode": "us",
                "regionName": "Virginia",
                "city": "Ashburn",
                "zip": "20149",
                "lat": 39.03,
                "lon": -77.5,
                "timezone": "America/New_York",
                "isp": "Google LLC",
                "org": "Google Public DNS",
                "as": "AS15169 Google LLC",
                "proxy": false,
                "hosting": true
            }));
        })
        .await;

    let p = ip::ip_api(&client()).with_base_url(&server.base_url());
    let f = p
        .fetch(&subject(SubjectType::Ip, "8.8.8.8"), None)
        .await
        .unwrap();

    assert_eq!(f.get(&Field::City), Some(&FieldValue::text("Ashburn")));
    assert_eq!(f.get(&Field::CountryCode), Some(&FieldValue::text("US")));
    assert_eq!(f.get(&Field::Asn), Some(&FieldValue::text("AS15169")));
    assert_eq!(f.get(&Field::Latitude), Some(&FieldValue::Number(39.03)));
    assert_eq!(f.get(&Field::IsProxy), Some(&FieldValue::Flag(false)));
    assert_eq!(f.get(&Field::IsHosting), Some(&FieldValue::Flag(true)));
}

#[tokio::test]
async fn ipinfo_org_is_split_into_asn_and_name() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/1.1.1.1/json");
            then.status(200).json_body(json!({
                "ip": "1.1.1.1",
                "city": "Brisbane",
                "country": "AU",
                "loc": "-27.4820,153.0136",
                "org": "AS13335 Cloudflare, Inc."
            }));
        })
        .await;

    let p = ip::ipinfo(&client()).with_base_url(&server.base_url());
    let f = p
        .fetch(&subject(SubjectType::Ip, "1.1.1.1"), None)
        .await
        .unwrap();

    assert_eq!(f.get(&Field::Asn), Some(&FieldValue::text("AS13335")));
    assert_eq!(f.get(&Field::Org), Some(&FieldValue::text("Cloudflare, Inc.")));
    assert_eq!(f.get(&Field::Latitude), Some(&FieldValue::Number(-27.482)));
    assert_eq!(f.get(&Field::Longitude), Some(&FieldValue::Number(153.0136)));
}

#[tokio::test]
async fn private_range_marker_is_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/json/10.0.0.1");
            then.status(200)
                .json_body(json!({"status": "fail", "message": "private range"}));
        })
        .await;

    let p = ip::ip_api(&client()).with_base_url(&server.base_url());
    let rec = invoke(&p, &subject(SubjectType::Ip, "10.0.0.1"), &creds(&[]))
        .await
        .unwrap();
    assert_eq!(rec.status, RecordStatus::NotFound);
    assert!(rec.fields.is_empty());
}

#[tokio::test]
async fn ipapi_co_quota_marker_is_rate_limited() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/8.8.4.4/json/");
            then.status(200).json_body(json!({
                "error": true,
                "reason": "RateLimited",
                "message": "Visit https://ipapi.co/ratelimited/ for details"
            }));
        })
        .await;

    let p = ip::ipapi_co(&client()).with_base_url(&server.base_url());
    let err = p
        .fetch(&subject(SubjectType::Ip, "8.8.4.4"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, SondaError::RateLimited { .. }), "{err:?}");
}

#[tokio::test]
async fn http_429_is_rate_limited() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/json/8.8.8.8");
            then.status(429).body("slow down");
        })
        .await;

    let p = ip::ip_api(&client()).with_base_url(&server.base_url());
    let err = p
        .fetch(&subject(SubjectType::Ip, "8.8.8.8"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, SondaError::RateLimited { ref provider, .. } if provider == "ip-api"));
}

#[tokio::test]
async fn abuseipdb_sends_key_header_and_is_authoritative() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v2/check")
                .query_param("ipAddress", "203.0.113.9")
                .header("Key", "secret")
                .header("Accept", "application/json");
            then.status(200).json_body(json!({
                "data": {
                    "ipAddress": "203.0.113.9",
                    "abuseConfidenceScore": 0,
                    "totalReports": 12,
                    "usageType": "Data Center/Web Hosting/Transit",
                    "isp": "Example Hosting",
                    "countryCode": "nl",
                    "hostnames": []
                }
            }));
        })
        .await;

    let p = ip::abuseipdb(&client()).with_base_url(&server.base_url());
    let rec = invoke(
        &p,
        &subject(SubjectType::Ip, "203.0.113.9"),
        &creds(&[("abuseipdb", "secret")]),
    )
    .await
    .unwrap();

    assert_eq!(rec.status, RecordStatus::Ok);
    assert_eq!(rec.value(Field::AbuseScore), Some(&FieldValue::Number(0.0)));
    assert_eq!(rec.value(Field::TotalReports), Some(&FieldValue::Number(12.0)));
    assert_eq!(rec.value(Field::CountryCode), Some(&FieldValue::text("NL")));
    assert!(rec.is_authoritative_for(Field::AbuseScore));
    assert!(!rec.is_authoritative_for(Field::Isp));
}

#[tokio::test]
async fn rejected_key_is_credential_invalid() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/check");
            then.status(401)
                .json_body(json!({"errors": [{"detail": "Authentication failed."}]}));
        })
        .await;

    let p = ip::abuseipdb(&client()).with_base_url(&server.base_url());
    let err = invoke(
        &p,
        &subject(SubjectType::Ip, "203.0.113.9"),
        &creds(&[("abuseipdb", "wrong")]),
    )
    .await
    .unwrap_err();
    assert_eq!(err, SondaError::credential_invalid("abuseipdb", 401));
}

static CITY_ONLY: Schema = Schema {
    aliases: &[FieldAlias::text(Field::City, &["city"])],
    rules: &[],
};

#[tokio::test]
async fn unusable_bodies_are_schema_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/garbage/192.0.2.1");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/empty/192.0.2.1");
            then.status(200).json_body(json!({"unrelated": 1}));
        })
        .await;

    let ip = subject(SubjectType::Ip, "192.0.2.1");
    for path in ["/garbage/{subject}", "/empty/{subject}"] {
        let p = HttpProvider::new(
            ProviderSpec::new("custom", SubjectType::Ip, ""),
            &client(),
            &server.base_url(),
            path,
            &CITY_ONLY,
        );
        let err = p.fetch(&ip, None).await.unwrap_err();
        assert!(matches!(err, SondaError::Schema { .. }), "{path}: {err:?}");
    }
}

#[tokio::test]
async fn slow_endpoint_times_out_as_network_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/slow/192.0.2.7");
            then.status(200)
                .delay(Duration::from_secs(3))
                .json_body(json!({"city": "Late"}));
        })
        .await;

    let p = HttpProvider::new(
        ProviderSpec::new("slow", SubjectType::Ip, "").timeout(Duration::from_millis(200)),
        &client(),
        &server.base_url(),
        "/slow/{subject}",
        &CITY_ONLY,
    );
    let err = p
        .fetch(&subject(SubjectType::Ip, "192.0.2.7"), None)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        SondaError::provider_timeout("slow", Duration::from_millis(200))
    );
}
