use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use k8s_openapi::api::core::v1::Node;
use serde::Serialize;

use crate::{
    console::{
        access_review::check_access,
        actions::{build_menu, find_action, ActionContext, MenuAction},
        ctx::ConsoleCtx,
        error::KnaError,
        modals::DirectModals,
    },
    models::ResourceKind,
};

use super::ApiError;

#[derive(Serialize)]
pub struct ActionView {
    #[serde(flatten)]
    action: MenuAction,
    allowed: bool,
}

fn action_context(ctx: &ConsoleCtx) -> ActionContext {
    ActionContext {
        client: ctx.client.clone(),
        modals: Arc::new(DirectModals::new(ctx.client.clone())),
    }
}

pub async fn list_actions(
    State(ctx): State<Arc<ConsoleCtx>>,
    Path(name): Path<String>,
) -> Result<Json<Vec<ActionView>>, ApiError> {
    let node = kube::Api::<Node>::all(ctx.client.clone()).get(&name).await?;
    let menu = build_menu(
        &ResourceKind::node(),
        &node,
        &action_context(&ctx),
        &ctx.action_options(),
    );
    let mut views = Vec::with_capacity(menu.len());
    for action in menu {
        let allowed = match (&action.access_review, action.hidden) {
            (_, true) => false,
            (None, false) => true,
            (Some(review), false) => check_access(ctx.client.clone(), review).await?,
        };
        views.push(ActionView { action, allowed });
    }
    Ok(Json(views))
}

pub async fn run_action(
    State(ctx): State<Arc<ConsoleCtx>>,
    Path((name, id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let node = kube::Api::<Node>::all(ctx.client.clone()).get(&name).await?;
    let action = find_action(
        &ResourceKind::node(),
        &node,
        &action_context(&ctx),
        &ctx.action_options(),
        &id,
    )?;
    if action.interactive {
        return Err(KnaError::InteractiveOnly(id).into());
    }
    action.authorize(ctx.client.clone()).await?;
    tokio::spawn(async move {
        if let Err(err) = (action.callback)().await {
            tracing::error!("Action {id} on node {name} failed: {err}");
        }
    });
    Ok(StatusCode::ACCEPTED)
}
