use sonda::{ChainStrategy, CredentialSet, Field, FieldValue, Sonda, SubjectType};
use tokio::time::{Duration, Instant};

use crate::helpers::{GOOGLE_DNS, MockProvider, subject};

fn build(strategy: ChainStrategy) -> Sonda {
    Sonda::builder()
        .with_provider(
            MockProvider::new("slow-first", SubjectType::Ip)
                .rank(1)
                .delay_ms(300)
                .field(Field::City, "Mountain View")
                .arc(),
        )
        .with_provider(
            MockProvider::new("quick-second", SubjectType::Ip)
                .rank(2)
                .delay_ms(100)
                .field(Field::City, "Ashburn")
                .field(Field::Isp, "Google LLC")
                .arc(),
        )
        .chain_strategy(strategy)
        .build()
        .unwrap()
}

#[tokio::test(start_paused = true)]
async fn concurrent_chain_waits_for_slowest_only() {
    let sonda = build(ChainStrategy::Concurrent);
    let start = Instant::now();
    let records = sonda
        .run_chain(&subject(SubjectType::Ip, GOOGLE_DNS), &CredentialSet::new())
        .await;
    let elapsed = start.elapsed();

    assert!(elapsed >= Duration::from_millis(300));
    assert!(elapsed < Duration::from_millis(400), "took {elapsed:?}");
    // Configured order, not completion order.
    assert_eq!(records[0].provider, "slow-first");
    assert_eq!(records[1].provider, "quick-second");
}

#[tokio::test(start_paused = true)]
async fn sequential_chain_sums_latencies() {
    let sonda = build(ChainStrategy::Sequential);
    let start = Instant::now();
    sonda
        .run_chain(&subject(SubjectType::Ip, GOOGLE_DNS), &CredentialSet::new())
        .await;
    assert!(start.elapsed() >= Duration::from_millis(400));
}

#[tokio::test(start_paused = true)]
async fn merge_ignores_arrival_order() {
    for strategy in [ChainStrategy::Concurrent, ChainStrategy::Sequential] {
        let report = build(strategy)
            .lookup(SubjectType::Ip, GOOGLE_DNS, None)
            .await
            .unwrap();
        let city = report.record.get(Field::City).unwrap();
        assert_eq!(city.value, FieldValue::text("Mountain View"));
        assert_eq!(city.provider, "slow-first");
        assert_eq!(report.record.provider_of(Field::Isp), Some("quick-second"));
    }
}
