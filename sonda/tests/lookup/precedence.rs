use proptest::prelude::*;
use sonda::{ChainStrategy, Field, Sonda, SubjectType};

use crate::helpers::{MockProvider, US_PHONE, dynp};

#[tokio::test]
async fn first_provider_in_chain_wins_ties() {
    let acme = MockProvider::new("acme", SubjectType::Phone)
        .field(Field::Carrier, "Acme")
        .arc();
    let other = MockProvider::new("other", SubjectType::Phone)
        .field(Field::Carrier, "Other")
        .field(Field::LineType, "mobile")
        .arc();

    let sonda = Sonda::builder()
        .with_provider(other.clone())
        .with_provider(acme.clone())
        .prefer_for_subject(SubjectType::Phone, &[dynp(&acme), dynp(&other)])
        .build()
        .unwrap();

    let report = sonda.lookup(SubjectType::Phone, US_PHONE, None).await.unwrap();
    assert_eq!(report.record.provider_of(Field::Carrier), Some("acme"));
    assert_eq!(report.record.value(Field::Carrier).unwrap().to_string(), "Acme");
    // Fields the winner lacks still come from later providers.
    assert_eq!(report.record.provider_of(Field::LineType), Some("other"));
}

#[tokio::test]
async fn authoritative_provider_beats_chain_order() {
    let sonda = Sonda::builder()
        .with_provider(
            MockProvider::new("geo", SubjectType::Ip)
                .rank(1)
                .field(Field::UsageType, "Unknown")
                .field(Field::City, "Dublin")
                .arc(),
        )
        .with_provider(
            MockProvider::new("abuse", SubjectType::Ip)
                .rank(9)
                .authoritative(&[Field::UsageType, Field::AbuseScore])
                .field(Field::UsageType, "Data Center/Web Hosting/Transit")
                .field(Field::AbuseScore, 0.0)
                .field(Field::City, "Cork")
                .arc(),
        )
        .build()
        .unwrap();

    let report = sonda.lookup(SubjectType::Ip, "1.1.1.1", None).await.unwrap();
    assert_eq!(report.record.provider_of(Field::UsageType), Some("abuse"));
    assert_eq!(report.record.provider_of(Field::AbuseScore), Some("abuse"));
    assert_eq!(report.record.provider_of(Field::City), Some("geo"));
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 40, .. ProptestConfig::default() })]
    // Whatever the latencies, the earliest provider in chain order supplies the value.
    #[test]
    fn completion_order_never_changes_the_winner(
        delays in proptest::collection::vec(0u64..50, 2..6),
        sequential in any::<bool>(),
    ) {
        tokio_test::block_on(async move {
            tokio::time::pause();

            let strategy = if sequential {
                ChainStrategy::Sequential
            } else {
                ChainStrategy::Concurrent
            };
            let mut builder = Sonda::builder().chain_strategy(strategy);
            for (i, d) in delays.iter().enumerate() {
                let name: &'static str = Box::leak(format!("p{i}").into_boxed_str());
                builder = builder.with_provider(
                    MockProvider::new(name, SubjectType::Phone)
                        .rank(u32::try_from(i).unwrap())
                        .delay_ms(*d)
                        .field(Field::Carrier, format!("carrier-{i}"))
                        .arc(),
                );
            }
            let sonda = builder.build().expect("sonda");

            let report = sonda
                .lookup(SubjectType::Phone, US_PHONE, None)
                .await
                .expect("lookup");
            assert_eq!(report.record.provider_of(Field::Carrier), Some("p0"));
            assert_eq!(report.attempts.len(), delays.len());
        });
    }
}
