use std::sync::Arc;

use sonda::{CancellationToken, Field, Probe, Sonda, SondaError, SubjectType};
use tokio::time::{Duration, Instant};

use crate::helpers::{GOOGLE_DNS, MockProbe, MockProvider, ProbeAnswer, subject};

#[tokio::test(start_paused = true)]
async fn cancelling_a_lookup_drops_in_flight_calls() {
    let sonda = Sonda::builder()
        .with_provider(
            MockProvider::new("slow", SubjectType::Ip)
                .delay_ms(5_000)
                .field(Field::City, "Nowhere")
                .arc(),
        )
        .build()
        .unwrap();

    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let start = Instant::now();
    let res = sonda
        .lookup_with_cancel(SubjectType::Ip, GOOGLE_DNS, None, &token)
        .await;
    assert!(matches!(res, Err(SondaError::Cancelled)));
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn already_cancelled_token_wins_immediately() {
    let p = MockProvider::new("fast", SubjectType::Ip)
        .field(Field::City, "Paris")
        .arc();
    let sonda = Sonda::builder().with_provider(p.clone()).build().unwrap();

    let token = CancellationToken::new();
    token.cancel();
    let res = sonda
        .lookup_with_cancel(SubjectType::Ip, GOOGLE_DNS, None, &token)
        .await;
    assert!(matches!(res, Err(SondaError::Cancelled)));
    assert_eq!(p.calls(), 0);
}

#[tokio::test]
async fn uncancelled_lookup_completes_normally() {
    let sonda = Sonda::builder()
        .with_provider(
            MockProvider::new("fast", SubjectType::Ip)
                .field(Field::City, "Paris")
                .arc(),
        )
        .build()
        .unwrap();

    let report = sonda
        .lookup_with_cancel(SubjectType::Ip, GOOGLE_DNS, None, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(report.record.provider_of(Field::City), Some("fast"));
}

#[tokio::test(start_paused = true)]
async fn cancelling_probes_returns_cancelled() {
    let sonda = Sonda::builder()
        .probe_timeout(Duration::from_secs(60))
        .build()
        .unwrap();
    let services: Vec<Arc<dyn Probe>> =
        vec![MockProbe::new("keybase", ProbeAnswer::Slow(30_000)).arc()];

    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        trigger.cancel();
    });

    let res = sonda
        .probe_with_cancel(&subject(SubjectType::Username, "octocat"), &services, &token)
        .await;
    assert!(matches!(res, Err(SondaError::Cancelled)));
}
