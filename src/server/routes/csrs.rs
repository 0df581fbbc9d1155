use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use k8s_openapi::api::certificates::v1::CertificateSigningRequest;

use crate::console::{
    actions::csr::{approve_csr, deny_csr},
    ctx::ConsoleCtx,
};

use super::ApiError;

async fn get_csr(ctx: &ConsoleCtx, name: &str) -> Result<CertificateSigningRequest, ApiError> {
    let csr = kube::Api::<CertificateSigningRequest>::all(ctx.client.clone())
        .get(name)
        .await?;
    Ok(csr)
}

pub async fn approve(
    State(ctx): State<Arc<ConsoleCtx>>,
    Path(name): Path<String>,
) -> Result<Json<CertificateSigningRequest>, ApiError> {
    let csr = get_csr(&ctx, &name).await?;
    let updated = approve_csr(ctx.client.clone(), &csr, &ctx.condition_source()).await?;
    Ok(Json(updated))
}

pub async fn deny(
    State(ctx): State<Arc<ConsoleCtx>>,
    Path(name): Path<String>,
) -> Result<Json<CertificateSigningRequest>, ApiError> {
    let csr = get_csr(&ctx, &name).await?;
    let updated = deny_csr(ctx.client.clone(), &csr, &ctx.condition_source()).await?;
    Ok(Json(updated))
}
