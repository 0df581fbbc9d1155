use std::fmt;

use chrono::{DateTime, Utc};
use k8s_openapi::{
    api::certificates::v1::{CertificateSigningRequest, CertificateSigningRequestCondition},
    apimachinery::pkg::apis::meta::v1::Time,
};
use kube::{
    api::{ListParams, PatchParams},
    ResourceExt,
};
use serde::Serialize;

use crate::console::{
    error::KnaResult,
    utils::resource::KnaResourceExt,
};

/// Decision an administrator makes about a certificate signing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CsrDecision {
    Approved,
    Denied,
}

impl CsrDecision {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::Denied => "Denied",
        }
    }
}

impl fmt::Display for CsrDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Who takes the decision. Ends up in the message and reason of the condition.
#[derive(Debug, Clone)]
pub struct ConditionSource {
    pub console_name: String,
    pub reason: String,
}

impl Default for ConditionSource {
    fn default() -> Self {
        Self {
            console_name: String::from("Kubernetes Console"),
            reason: String::from("KubernetesConsoleCSRApprove"),
        }
    }
}

#[must_use]
pub fn decision_condition(
    decision: CsrDecision,
    source: &ConditionSource,
    now: DateTime<Utc>,
) -> CertificateSigningRequestCondition {
    CertificateSigningRequestCondition {
        last_update_time: Some(Time(now)),
        message: Some(format!(
            "This CSR was {} via {}",
            decision.as_str().to_lowercase(),
            source.console_name
        )),
        reason: Some(source.reason.clone()),
        status: String::from("True"),
        type_: String::from(decision.as_str()),
        last_transition_time: None,
    }
}

/// Put a new decision condition in front of all existing ones.
///
/// Existing conditions are never touched, even if one of them
/// already carries the same decision.
#[must_use]
pub fn with_decision(
    mut csr: CertificateSigningRequest,
    decision: CsrDecision,
    source: &ConditionSource,
    now: DateTime<Utc>,
) -> CertificateSigningRequest {
    let condition = decision_condition(decision, source, now);
    let status = csr.status.get_or_insert_with(Default::default);
    status
        .conditions
        .get_or_insert_with(Vec::new)
        .insert(0, condition);
    csr
}

#[tracing::instrument(skip(client, csr, source), fields(name = csr.name_any()), err)]
pub async fn update_csr(
    client: kube::Client,
    csr: &CertificateSigningRequest,
    decision: CsrDecision,
    source: &ConditionSource,
) -> KnaResult<CertificateSigningRequest> {
    tracing::info!("Submitting CSR decision: {decision}");
    let name = csr.name_or_err()?;
    let mut updated = with_decision(csr.clone(), decision, source, Utc::now());
    updated.managed_fields_mut().clear();
    let api = kube::Api::<CertificateSigningRequest>::all(client);
    let res = api
        .patch_approval(
            &name,
            &PatchParams::default(),
            &kube::api::Patch::Merge(&updated),
        )
        .await?;
    Ok(res)
}

pub async fn approve_csr(
    client: kube::Client,
    csr: &CertificateSigningRequest,
    source: &ConditionSource,
) -> KnaResult<CertificateSigningRequest> {
    update_csr(client, csr, CsrDecision::Approved, source).await
}

pub async fn deny_csr(
    client: kube::Client,
    csr: &CertificateSigningRequest,
    source: &ConditionSource,
) -> KnaResult<CertificateSigningRequest> {
    update_csr(client, csr, CsrDecision::Denied, source).await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CsrState {
    Pending,
    Approved,
    Denied,
}

impl fmt::Display for CsrState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.pad("Pending"),
            Self::Approved => f.pad("Approved"),
            Self::Denied => f.pad("Denied"),
        }
    }
}

/// State of the request, judged by its newest decision condition.
#[must_use]
pub fn csr_state(csr: &CertificateSigningRequest) -> CsrState {
    let conditions = csr
        .status
        .as_ref()
        .and_then(|status| status.conditions.as_deref())
        .unwrap_or_default();
    for condition in conditions {
        if condition.status != "True" {
            continue;
        }
        match condition.type_.as_str() {
            "Approved" => return CsrState::Approved,
            "Denied" => return CsrState::Denied,
            _ => {}
        }
    }
    CsrState::Pending
}

pub async fn list_csrs(client: kube::Client) -> KnaResult<Vec<(CertificateSigningRequest, CsrState)>> {
    let api = kube::Api::<CertificateSigningRequest>::all(client);
    let csrs = api.list(&ListParams::default()).await?;
    Ok(csrs
        .into_iter()
        .map(|csr| {
            let state = csr_state(&csr);
            (csr, state)
        })
        .collect())
}
