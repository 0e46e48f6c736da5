use sonda::{Sonda, SondaConfig, SondaError, SubjectType};

use crate::helpers::{MockProbe, MockProvider, ProbeAnswer, dynp};

#[test]
fn duplicate_provider_names_are_rejected() {
    let err = Sonda::builder()
        .with_provider(MockProvider::new("dup", SubjectType::Ip).arc())
        .with_provider(MockProvider::new("dup", SubjectType::Phone).arc())
        .build()
        .err()
        .expect("duplicate names must fail");
    match err {
        SondaError::InvalidArg(msg) => assert!(msg.contains("dup")),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn duplicate_probe_services_are_rejected() {
    let res = Sonda::builder()
        .with_probe(MockProbe::new("github", ProbeAnswer::Found).arc())
        .with_probe(MockProbe::new("github", ProbeAnswer::Absent).arc())
        .build();
    assert!(matches!(res, Err(SondaError::InvalidArg(_))));
}

#[test]
fn zero_probe_concurrency_is_rejected() {
    let res = Sonda::builder().max_concurrent_probes(0).build();
    assert!(matches!(res, Err(SondaError::InvalidArg(_))));
}

#[test]
fn empty_builder_is_allowed() {
    let sonda = Sonda::builder().build().unwrap();
    assert_eq!(sonda.config(), &SondaConfig::default());
    assert!(sonda.chain_for(SubjectType::Email).is_empty());
}

#[test]
fn unknown_and_repeated_preferences_are_dropped() {
    let a = MockProvider::new("a", SubjectType::Ip).arc();
    let ghost = MockProvider::new("ghost", SubjectType::Ip).arc();

    let sonda = Sonda::builder()
        .with_provider(a.clone())
        .prefer_for_subject(SubjectType::Ip, &[dynp(&ghost), dynp(&a), dynp(&a)])
        .build()
        .unwrap();

    let prefs = &sonda.config().per_subject_priority[&SubjectType::Ip];
    assert_eq!(prefs, &vec!["a".to_string()]);
}
