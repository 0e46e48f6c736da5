use sonda::{AttemptOutcome, Field, FieldValue, Sonda, SondaError, SubjectType};
use tokio::time::{Duration, Instant};

use crate::helpers::{MockProvider, UK_PHONE, creds};

#[tokio::test(start_paused = true)]
async fn timed_out_carrier_lookup_falls_back_to_hlr() {
    let carrier = MockProvider::new("carrier", SubjectType::Phone)
        .rank(10)
        .requires_key()
        .timeout_ms(15_000)
        .delay_ms(60_000)
        .field(Field::Carrier, "never seen")
        .arc();
    let hlr = MockProvider::new("hlr", SubjectType::Phone)
        .rank(20)
        .field(Field::Carrier, "Vodafone UK")
        .field(Field::LineType, "mobile")
        .field(Field::Country, "United Kingdom")
        .arc();
    let prefix = MockProvider::new("prefix", SubjectType::Phone)
        .rank(90)
        .field(Field::CountryCode, "GB")
        .field(Field::Country, "UK")
        .arc();

    let sonda = Sonda::builder()
        .with_provider(prefix.clone())
        .with_provider(hlr.clone())
        .with_provider(carrier.clone())
        .build()
        .unwrap();

    let start = Instant::now();
    let report = sonda
        .lookup(
            SubjectType::Phone,
            "+44 20 7183 8750",
            Some(&creds(&[("carrier", "k")])),
        )
        .await
        .unwrap();

    // Bounded by the carrier's own timeout, not its 60s latency.
    assert!(start.elapsed() < Duration::from_secs(16));
    assert_eq!(report.subject.as_str(), UK_PHONE);

    let rec = &report.record;
    assert_eq!(rec.value(Field::Carrier), Some(&FieldValue::text("Vodafone UK")));
    assert_eq!(rec.provider_of(Field::Carrier), Some("hlr"));
    assert_eq!(rec.provider_of(Field::Country), Some("hlr"));
    assert_eq!(rec.provider_of(Field::CountryCode), Some("prefix"));

    assert_eq!(report.attempts[0].provider, "carrier");
    assert_eq!(report.attempts[0].outcome, AttemptOutcome::Failed);
    assert_eq!(
        report.warnings,
        vec![SondaError::provider_timeout(
            "carrier",
            Duration::from_secs(15)
        )]
    );
    assert_eq!(carrier.calls(), 1);
}
