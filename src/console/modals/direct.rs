use k8s_openapi::api::core::v1::Node;

use crate::{
    console::{
        error::{KnaError, KnaResult},
        requests::{delete_node, make_node_unschedulable},
    },
    models::ResourceKind,
};

use super::{DeleteModalParams, ModalLauncher};

/// Dialogs which are considered confirmed already.
///
/// Used where the caller has confirmed the action by other means,
/// e.g. by sending an HTTP request.
#[derive(Clone)]
pub struct DirectModals {
    client: kube::Client,
}

impl DirectModals {
    #[must_use]
    pub const fn new(client: kube::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ModalLauncher for DirectModals {
    async fn configure_unschedulable(&self, node: Node) -> KnaResult<()> {
        make_node_unschedulable(self.client.clone(), &node).await?;
        Ok(())
    }

    async fn delete_resource(&self, params: DeleteModalParams) -> KnaResult<()> {
        delete_node(self.client.clone(), &params.resource).await
    }

    async fn modify_labels(&self, _kind: ResourceKind, _node: Node) -> KnaResult<()> {
        Err(KnaError::InteractiveOnly(String::from("modify-labels")))
    }

    async fn modify_annotations(&self, _kind: ResourceKind, _node: Node) -> KnaResult<()> {
        Err(KnaError::InteractiveOnly(String::from("modify-annotations")))
    }

    async fn edit_resource(&self, _kind: ResourceKind, _node: Node) -> KnaResult<()> {
        Err(KnaError::InteractiveOnly(String::from("edit")))
    }
}
