use std::sync::Arc;

use sonda::{Field, Probe, ProbeStatus, Sonda, SondaError, SubjectType};
use tokio::time::{Duration, Instant};

use crate::helpers::{MockProbe, MockProvider, ProbeAnswer, US_PHONE, subject};

fn five_services() -> Vec<Arc<dyn Probe>> {
    vec![
        MockProbe::new("whatsapp", ProbeAnswer::Found).delay_ms(200).arc(),
        MockProbe::new("telegram", ProbeAnswer::Absent).delay_ms(50).arc(),
        MockProbe::new("signal", ProbeAnswer::Slow(30_000)).arc(),
        MockProbe::new("viber", ProbeAnswer::Found).arc(),
        MockProbe::new("line", ProbeAnswer::Absent).delay_ms(100).arc(),
    ]
}

#[tokio::test(start_paused = true)]
async fn probes_run_concurrently_and_keep_input_order() {
    let sonda = Sonda::builder()
        .probe_timeout(Duration::from_secs(2))
        .build()
        .unwrap();

    let start = Instant::now();
    let results = sonda
        .probe(&subject(SubjectType::Phone, US_PHONE), &five_services())
        .await;

    // Total latency tracks the slowest probe (the 2s timeout), not the sum.
    assert!(start.elapsed() < Duration::from_millis(2_500));

    let services: Vec<&str> = results.iter().map(|r| r.service.as_str()).collect();
    assert_eq!(services, vec!["whatsapp", "telegram", "signal", "viber", "line"]);

    let statuses: Vec<ProbeStatus> = results.iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![
            ProbeStatus::Found,
            ProbeStatus::Absent,
            ProbeStatus::Inconclusive,
            ProbeStatus::Found,
            ProbeStatus::Absent,
        ]
    );
    assert_eq!(results.iter().filter(|r| r.found).count(), 2);
    assert!(results[2].message.contains("timed out"));
}

#[tokio::test(start_paused = true)]
async fn bounded_parallelism_serializes_work() {
    let sonda = Sonda::builder().max_concurrent_probes(1).build().unwrap();
    let services: Vec<Arc<dyn Probe>> = vec![
        MockProbe::new("a", ProbeAnswer::Found).delay_ms(100).arc(),
        MockProbe::new("b", ProbeAnswer::Found).delay_ms(100).arc(),
        MockProbe::new("c", ProbeAnswer::Found).delay_ms(100).arc(),
    ];

    let start = Instant::now();
    let results = sonda
        .probe(&subject(SubjectType::Username, "octocat"), &services)
        .await;
    assert!(start.elapsed() >= Duration::from_millis(300));
    assert!(results.iter().all(|r| r.found));
}

#[tokio::test]
async fn errors_and_unsupported_types_are_inconclusive_never_absent() {
    let sonda = Sonda::builder().build().unwrap();
    let services: Vec<Arc<dyn Probe>> = vec![
        MockProbe::new(
            "github",
            ProbeAnswer::Fail(SondaError::network("github", "reset")),
        )
        .arc(),
        MockProbe::new("whatsapp", ProbeAnswer::Absent)
            .only_for(SubjectType::Phone)
            .arc(),
    ];

    let results = sonda
        .probe(&subject(SubjectType::Username, "octocat"), &services)
        .await;
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.status == ProbeStatus::Inconclusive));
    assert!(results.iter().all(|r| !r.found));
    assert!(results[0].message.starts_with("check failed"));
}

#[tokio::test]
async fn empty_service_list_yields_nothing() {
    let sonda = Sonda::builder().build().unwrap();
    let results = sonda
        .probe(&subject(SubjectType::Phone, US_PHONE), &[])
        .await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn investigate_attaches_registered_probes_for_the_subject_type() {
    let sonda = Sonda::builder()
        .with_provider(
            MockProvider::new("hlr", SubjectType::Phone)
                .field(Field::Carrier, "Acme")
                .arc(),
        )
        .with_probe(
            MockProbe::new("whatsapp", ProbeAnswer::Found)
                .only_for(SubjectType::Phone)
                .arc(),
        )
        .with_probe(
            MockProbe::new("github", ProbeAnswer::Found)
                .only_for(SubjectType::Username)
                .arc(),
        )
        .build()
        .unwrap();

    let report = sonda
        .investigate(SubjectType::Phone, US_PHONE, None)
        .await
        .unwrap();
    assert_eq!(report.record.provider_of(Field::Carrier), Some("hlr"));
    assert_eq!(report.record.probes.len(), 1);
    assert_eq!(report.record.probes[0].service, "whatsapp");
    assert!(report.record.probes[0].found);
}

#[tokio::test]
async fn username_investigation_needs_no_providers() {
    let sonda = Sonda::builder()
        .with_probe(MockProbe::new("github", ProbeAnswer::Found).arc())
        .with_probe(MockProbe::new("gitlab", ProbeAnswer::Absent).arc())
        .build()
        .unwrap();

    let report = sonda
        .investigate(SubjectType::Username, "@octocat", None)
        .await
        .unwrap();
    assert!(report.record.is_empty());
    assert_eq!(report.record.probes.len(), 2);
}
