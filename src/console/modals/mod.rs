//! Dialogs opened by menu actions.
//!
//! Menu callbacks never touch the dialog machinery directly,
//! they go through [`ModalLauncher`]. [`DirectModals`] performs
//! the confirmed operation right away, [`TerminalModals`] asks
//! the user first.

use k8s_openapi::api::core::v1::Node;

use crate::models::ResourceKind;

use super::error::KnaResult;

mod direct;
mod terminal;

pub use direct::DirectModals;
pub use terminal::TerminalModals;

/// Parameters of the delete confirmation dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteModalParams {
    pub kind: ResourceKind,
    pub resource: Node,
    pub message: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ModalLauncher: Send + Sync {
    /// Confirm and mark the node as unschedulable.
    async fn configure_unschedulable(&self, node: Node) -> KnaResult<()>;

    /// Confirm and delete the resource.
    async fn delete_resource(&self, params: DeleteModalParams) -> KnaResult<()>;

    async fn modify_labels(&self, kind: ResourceKind, node: Node) -> KnaResult<()>;

    async fn modify_annotations(&self, kind: ResourceKind, node: Node) -> KnaResult<()>;

    /// Replace the resource with an edited version of it.
    async fn edit_resource(&self, kind: ResourceKind, node: Node) -> KnaResult<()>;
}
