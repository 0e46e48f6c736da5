use sonda::{
    AttemptOutcome, Field, FieldMap, FieldValue, RecordStatus, Sonda, SondaError, SubjectType,
};

use crate::helpers::{EMAIL, MockProvider, creds, subject};

#[tokio::test]
async fn missing_credential_skips_without_calling() {
    let keyed = MockProvider::new("hibp", SubjectType::Email)
        .rank(1)
        .requires_key()
        .field(Field::BreachCount, 3.0)
        .arc();
    let open = MockProvider::new("gravatar", SubjectType::Email)
        .rank(2)
        .field(Field::GravatarUrl, "https://gravatar.example/abc")
        .arc();

    let sonda = Sonda::builder()
        .with_provider(keyed.clone())
        .with_provider(open.clone())
        .build()
        .unwrap();

    let report = sonda.lookup(SubjectType::Email, EMAIL, None).await.unwrap();

    assert_eq!(keyed.calls(), 0);
    assert_eq!(open.calls(), 1);
    assert_eq!(report.attempts[0].outcome, AttemptOutcome::Skipped);
    assert_eq!(report.attempts[1].outcome, AttemptOutcome::Ok);
    assert!(report.record.value(Field::BreachCount).is_none());
    assert_eq!(
        report.warnings,
        vec![SondaError::credential_missing("hibp")]
    );
}

#[tokio::test]
async fn supplied_credential_reaches_the_provider() {
    let keyed = MockProvider::new("hibp", SubjectType::Email)
        .requires_key()
        .with_fetch(|_, cred| {
            let key = cred.expect("credential passed through").expose().to_string();
            let mut f = FieldMap::new();
            f.insert(Field::Reputation, FieldValue::text(key));
            Ok(f)
        })
        .arc();
    let sonda = Sonda::builder().with_provider(keyed.clone()).build().unwrap();

    let set = creds(&[("hibp", "secret-123"), ("other", "x")]);
    let report = sonda
        .lookup(SubjectType::Email, EMAIL, Some(&set))
        .await
        .unwrap();

    assert_eq!(keyed.calls(), 1);
    assert_eq!(
        report.record.value(Field::Reputation),
        Some(&FieldValue::text("secret-123"))
    );
    assert!(report.warnings.is_empty());
}

#[tokio::test]
async fn every_provider_skipped_is_no_providers_available() {
    let sonda = Sonda::builder()
        .with_provider(MockProvider::new("numverify", SubjectType::Phone).requires_key().arc())
        .with_provider(MockProvider::new("veriphone", SubjectType::Phone).requires_key().arc())
        .build()
        .unwrap();

    match sonda.lookup(SubjectType::Phone, "+14155552671", None).await {
        Err(SondaError::NoProvidersAvailable {
            subject_type,
            errors,
        }) => {
            assert_eq!(subject_type, "phone");
            assert!(
                errors
                    .iter()
                    .all(|e| matches!(e, SondaError::CredentialMissing { .. }))
            );
            assert_eq!(errors.len(), 2);
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn skipped_records_carry_the_reason() {
    let sonda = Sonda::builder()
        .with_provider(MockProvider::new("abuseipdb", SubjectType::Ip).requires_key().arc())
        .build()
        .unwrap();

    let records = sonda
        .run_chain(&subject(SubjectType::Ip, "1.1.1.1"), &creds(&[]))
        .await;
    assert_eq!(
        records[0].status,
        RecordStatus::Skipped(SondaError::credential_missing("abuseipdb"))
    );
}
