//! Actions every resource menu has.

use futures::FutureExt;
use k8s_openapi::api::core::v1::Node;

use crate::{console::access_review::as_access_review, models::ResourceKind};

use super::{ActionContext, ActionOptions, MenuAction};

#[must_use]
pub fn modify_labels(
    kind: &ResourceKind,
    node: &Node,
    ctx: &ActionContext,
    _options: &ActionOptions,
) -> MenuAction {
    let modals = ctx.modals.clone();
    let (modal_kind, resource) = (kind.clone(), node.clone());
    MenuAction {
        id: "modify-labels",
        label: String::from("Edit labels"),
        hidden: false,
        interactive: true,
        callback: Box::new(move || {
            async move { modals.modify_labels(modal_kind, resource).await }.boxed()
        }),
        access_review: Some(as_access_review(kind, node, "patch")),
    }
}

#[must_use]
pub fn modify_annotations(
    kind: &ResourceKind,
    node: &Node,
    ctx: &ActionContext,
    _options: &ActionOptions,
) -> MenuAction {
    let modals = ctx.modals.clone();
    let (modal_kind, resource) = (kind.clone(), node.clone());
    MenuAction {
        id: "modify-annotations",
        label: String::from("Edit annotations"),
        hidden: false,
        interactive: true,
        callback: Box::new(move || {
            async move { modals.modify_annotations(modal_kind, resource).await }.boxed()
        }),
        access_review: Some(as_access_review(kind, node, "patch")),
    }
}

#[must_use]
pub fn edit(
    kind: &ResourceKind,
    node: &Node,
    ctx: &ActionContext,
    _options: &ActionOptions,
) -> MenuAction {
    let modals = ctx.modals.clone();
    let (modal_kind, resource) = (kind.clone(), node.clone());
    MenuAction {
        id: "edit",
        label: format!("Edit {}", kind.label),
        hidden: false,
        interactive: true,
        callback: Box::new(move || {
            async move { modals.edit_resource(modal_kind, resource).await }.boxed()
        }),
        access_review: Some(as_access_review(kind, node, "update")),
    }
}
