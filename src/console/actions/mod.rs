use std::{fmt, sync::Arc};

use futures::future::BoxFuture;
use k8s_openapi::api::core::v1::Node;
use kube::ResourceExt;
use serde::Serialize;

use crate::models::ResourceKind;

use super::{
    access_review::{check_access, AccessReview},
    error::{KnaError, KnaResult},
    modals::ModalLauncher,
};

pub mod common;
pub mod csr;
pub mod node;

pub type ActionCallback = Box<dyn FnOnce() -> BoxFuture<'static, KnaResult<()>> + Send + Sync>;

/// Single entry of a resource menu.
///
/// Built fresh every time the menu is shown. The callback is bound
/// to everything it needs when the action is built.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuAction {
    pub id: &'static str,
    pub label: String,
    pub hidden: bool,
    /// The dialog of this action needs user input,
    /// so it cannot run unattended.
    pub interactive: bool,
    #[serde(skip)]
    pub callback: ActionCallback,
    pub access_review: Option<AccessReview>,
}

impl fmt::Debug for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuAction")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("hidden", &self.hidden)
            .field("interactive", &self.interactive)
            .field("access_review", &self.access_review)
            .finish_non_exhaustive()
    }
}

impl MenuAction {
    /// Check the action is visible and allowed for the current user.
    pub async fn authorize(&self, client: kube::Client) -> KnaResult<()> {
        if self.hidden {
            return Err(KnaError::ActionHidden(String::from(self.id)));
        }
        if let Some(review) = &self.access_review {
            if !check_access(client, review).await? {
                return Err(KnaError::AccessDenied {
                    verb: review.verb.clone(),
                    resource: review.resource.clone(),
                    name: review.name.clone(),
                });
            }
        }
        Ok(())
    }

    #[tracing::instrument(skip(self, client), fields(id = self.id), err)]
    pub async fn run(self, client: kube::Client) -> KnaResult<()> {
        self.authorize(client).await?;
        tracing::info!("Running action {}", self.label);
        (self.callback)().await
    }
}

/// Everything menu callbacks may use.
#[derive(Clone)]
pub struct ActionContext {
    pub client: kube::Client,
    pub modals: Arc<dyn ModalLauncher>,
}

/// Extra flags, known when the menu is shown.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionOptions {
    /// Node is under maintenance. Hides "Mark as schedulable".
    pub node_maintenance: bool,
}

pub type KebabAction = fn(&ResourceKind, &Node, &ActionContext, &ActionOptions) -> MenuAction;

/// Actions of the node menu, in the order they are shown.
#[must_use]
pub fn menu_actions() -> [KebabAction; 6] {
    [
        node::mark_as_schedulable,
        node::mark_as_unschedulable,
        common::modify_labels,
        common::modify_annotations,
        common::edit,
        node::delete,
    ]
}

#[must_use]
pub fn build_menu(
    kind: &ResourceKind,
    node: &Node,
    ctx: &ActionContext,
    options: &ActionOptions,
) -> Vec<MenuAction> {
    tracing::debug!("Building menu for {}", node.name_any());
    menu_actions()
        .into_iter()
        .map(|action| action(kind, node, ctx, options))
        .collect()
}

pub fn find_action(
    kind: &ResourceKind,
    node: &Node,
    ctx: &ActionContext,
    options: &ActionOptions,
    id: &str,
) -> KnaResult<MenuAction> {
    build_menu(kind, node, ctx, options)
        .into_iter()
        .find(|action| action.id == id)
        .ok_or_else(|| KnaError::UnknownAction(id.to_string()))
}
