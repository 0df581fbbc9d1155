mod csrs;
mod health;
mod nodes;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json,
};

use crate::console::{ctx::ConsoleCtx, error::KnaError};

pub struct ApiError(KnaError);

impl From<KnaError> for ApiError {
    fn from(err: KnaError) -> Self {
        Self(err)
    }
}

impl From<kube::Error> for ApiError {
    fn from(err: kube::Error) -> Self {
        Self(KnaError::from(err))
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            err if err.is_not_found() => StatusCode::NOT_FOUND,
            KnaError::UnknownAction(_) => StatusCode::NOT_FOUND,
            KnaError::ActionHidden(_) | KnaError::AccessDenied { .. } => StatusCode::FORBIDDEN,
            KnaError::InteractiveOnly(_) | KnaError::InvalidKeyValue(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }
        (
            status,
            Json(serde_json::json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

pub fn create_router(ctx: Arc<ConsoleCtx>) -> axum::Router {
    axum::Router::new()
        .route("/health", get(health::healthcheck))
        .route("/nodes/:name/actions", get(nodes::list_actions))
        .route("/nodes/:name/actions/:id", post(nodes::run_action))
        .route("/csrs/:name/approve", post(csrs::approve))
        .route("/csrs/:name/deny", post(csrs::deny))
        .with_state(ctx)
}
