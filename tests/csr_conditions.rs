//! Decision conditions of certificate signing requests.

use chrono::Utc;
use k8s_openapi::api::certificates::v1::{
    CertificateSigningRequest, CertificateSigningRequestCondition, CertificateSigningRequestStatus,
};
use k8s_openapi::ByteString;
use kna::console::actions::csr::{csr_state, with_decision, ConditionSource, CsrDecision, CsrState};

fn csr_with_conditions(count: usize) -> CertificateSigningRequest {
    let conditions = (0..count)
        .map(|idx| CertificateSigningRequestCondition {
            type_: String::from("Failed"),
            status: String::from("False"),
            reason: Some(format!("reason-{idx}")),
            ..Default::default()
        })
        .collect();
    CertificateSigningRequest {
        status: Some(CertificateSigningRequestStatus {
            conditions: Some(conditions),
            certificate: Some(ByteString(b"cert".to_vec())),
        }),
        ..Default::default()
    }
}

#[test]
fn test_prior_conditions_are_preserved() {
    for count in [0, 1, 5] {
        let csr = csr_with_conditions(count);
        let prior = csr.status.clone().unwrap().conditions.unwrap();
        for decision in [CsrDecision::Approved, CsrDecision::Denied] {
            let updated = with_decision(csr.clone(), decision, &ConditionSource::default(), Utc::now());
            let conditions = updated.status.unwrap().conditions.unwrap();
            assert_eq!(conditions.len(), count + 1);
            assert_eq!(conditions[0].type_, decision.as_str());
            assert_eq!(&conditions[1..], prior.as_slice());
        }
    }
}

#[test]
fn test_message_mentions_decision() {
    for (decision, word) in [(CsrDecision::Approved, "approved"), (CsrDecision::Denied, "denied")] {
        let updated = with_decision(
            CertificateSigningRequest::default(),
            decision,
            &ConditionSource::default(),
            Utc::now(),
        );
        let condition = &updated.status.unwrap().conditions.unwrap()[0];
        assert!(condition.message.as_deref().unwrap().contains(word));
        assert_eq!(condition.status, "True");
        assert_eq!(
            condition.reason.as_deref(),
            Some("KubernetesConsoleCSRApprove")
        );
    }
}

#[test]
fn test_other_status_fields_are_kept() {
    let updated = with_decision(
        csr_with_conditions(1),
        CsrDecision::Approved,
        &ConditionSource::default(),
        Utc::now(),
    );
    assert_eq!(
        updated.status.unwrap().certificate,
        Some(ByteString(b"cert".to_vec()))
    );
}

#[test]
fn test_newest_decision_wins() {
    let approved = with_decision(
        csr_with_conditions(2),
        CsrDecision::Approved,
        &ConditionSource::default(),
        Utc::now(),
    );
    assert_eq!(csr_state(&approved), CsrState::Approved);
    let denied = with_decision(approved, CsrDecision::Denied, &ConditionSource::default(), Utc::now());
    assert_eq!(csr_state(&denied), CsrState::Denied);
    assert_eq!(csr_state(&csr_with_conditions(3)), CsrState::Pending);
}
