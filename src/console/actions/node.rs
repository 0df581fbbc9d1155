use futures::FutureExt;
use k8s_openapi::api::core::v1::Node;
use kube::ResourceExt;

use crate::{
    console::{
        access_review::{as_access_review, AccessReview},
        modals::DeleteModalParams,
        requests::{is_node_unschedulable, make_node_schedulable},
    },
    models::ResourceKind,
};

use super::{ActionContext, ActionOptions, MenuAction};

pub const DELETE_NODE_MESSAGE: &str = "This action cannot be undone. \
Deleting a node will instruct Kubernetes that the node is down or unrecoverable \
and delete all pods scheduled to that node. If the node is still running but \
unresponsive and the node is deleted, stateful workloads and persistent volumes \
may suffer corruption or data loss. Only delete a node that you have confirmed \
is completely stopped and cannot be restored.";

fn patch_review(kind: &ResourceKind, node: &Node) -> AccessReview {
    AccessReview {
        group: kind.api_group.clone(),
        resource: kind.plural.clone(),
        name: node.name_any(),
        namespace: node.namespace(),
        verb: String::from("patch"),
    }
}

#[must_use]
pub fn mark_as_unschedulable(
    kind: &ResourceKind,
    node: &Node,
    ctx: &ActionContext,
    _options: &ActionOptions,
) -> MenuAction {
    let modals = ctx.modals.clone();
    let resource = node.clone();
    MenuAction {
        id: "mark-as-unschedulable",
        label: String::from("Mark as unschedulable"),
        hidden: is_node_unschedulable(node),
        interactive: false,
        callback: Box::new(move || {
            async move { modals.configure_unschedulable(resource).await }.boxed()
        }),
        access_review: Some(patch_review(kind, node)),
    }
}

#[must_use]
pub fn mark_as_schedulable(
    kind: &ResourceKind,
    node: &Node,
    ctx: &ActionContext,
    options: &ActionOptions,
) -> MenuAction {
    let client = ctx.client.clone();
    let resource = node.clone();
    MenuAction {
        id: "mark-as-schedulable",
        label: String::from("Mark as schedulable"),
        hidden: !is_node_unschedulable(node) || options.node_maintenance,
        interactive: false,
        callback: Box::new(move || {
            async move {
                make_node_schedulable(client, &resource).await?;
                Ok(())
            }
            .boxed()
        }),
        access_review: Some(patch_review(kind, node)),
    }
}

#[must_use]
pub fn delete(
    kind: &ResourceKind,
    node: &Node,
    ctx: &ActionContext,
    _options: &ActionOptions,
) -> MenuAction {
    let modals = ctx.modals.clone();
    let params = DeleteModalParams {
        kind: kind.clone(),
        resource: node.clone(),
        message: String::from(DELETE_NODE_MESSAGE),
    };
    MenuAction {
        id: "delete",
        label: String::from("Delete node"),
        hidden: false,
        interactive: false,
        callback: Box::new(move || async move { modals.delete_resource(params).await }.boxed()),
        access_review: Some(as_access_review(&ResourceKind::node(), node, "delete")),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use k8s_openapi::api::core::v1::NodeSpec;
    use kube::api::ObjectMeta;

    use super::*;
    use crate::console::modals::MockModalLauncher;

    fn test_node(unschedulable: Option<bool>) -> Node {
        Node {
            metadata: ObjectMeta {
                name: Some(String::from("worker-1")),
                namespace: Some(String::new()),
                ..Default::default()
            },
            spec: Some(NodeSpec {
                unschedulable,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn test_client() -> kube::Client {
        let config = kube::Config::new("http://127.0.0.1:8080".parse().unwrap());
        kube::Client::try_from(config).unwrap()
    }

    fn test_ctx(modals: MockModalLauncher) -> ActionContext {
        ActionContext {
            client: test_client(),
            modals: Arc::new(modals),
        }
    }

    #[tokio::test]
    async fn test_schedulable_node() {
        let ctx = test_ctx(MockModalLauncher::new());
        let kind = ResourceKind::node();
        let node = test_node(Some(false));
        let options = ActionOptions::default();
        assert!(mark_as_schedulable(&kind, &node, &ctx, &options).hidden);
        assert!(!mark_as_unschedulable(&kind, &node, &ctx, &options).hidden);
    }

    #[tokio::test]
    async fn test_node_without_spec_is_schedulable() {
        let ctx = test_ctx(MockModalLauncher::new());
        let kind = ResourceKind::node();
        let node = test_node(None);
        let options = ActionOptions::default();
        assert!(mark_as_schedulable(&kind, &node, &ctx, &options).hidden);
        assert!(!mark_as_unschedulable(&kind, &node, &ctx, &options).hidden);
    }

    #[tokio::test]
    async fn test_unschedulable_node() {
        let ctx = test_ctx(MockModalLauncher::new());
        let kind = ResourceKind::node();
        let node = test_node(Some(true));
        let options = ActionOptions::default();
        assert!(!mark_as_schedulable(&kind, &node, &ctx, &options).hidden);
        assert!(mark_as_unschedulable(&kind, &node, &ctx, &options).hidden);
    }

    #[tokio::test]
    async fn test_node_maintenance_hides_schedulable() {
        let ctx = test_ctx(MockModalLauncher::new());
        let kind = ResourceKind::node();
        let node = test_node(Some(true));
        let options = ActionOptions {
            node_maintenance: true,
        };
        assert!(mark_as_schedulable(&kind, &node, &ctx, &options).hidden);
        assert!(mark_as_unschedulable(&kind, &node, &ctx, &options).hidden);
    }

    #[tokio::test]
    async fn test_toggle_access_review() {
        let ctx = test_ctx(MockModalLauncher::new());
        let kind = ResourceKind::node();
        let node = test_node(None);
        let options = ActionOptions::default();
        for action in [
            mark_as_schedulable(&kind, &node, &ctx, &options),
            mark_as_unschedulable(&kind, &node, &ctx, &options),
        ] {
            let review = action.access_review.unwrap();
            assert_eq!(review.group, "");
            assert_eq!(review.resource, "nodes");
            assert_eq!(review.name, "worker-1");
            assert_eq!(review.namespace.as_deref(), Some(""));
            assert_eq!(review.verb, "patch");
        }
    }

    #[tokio::test]
    async fn test_mark_as_unschedulable_opens_modal() {
        let mut modals = MockModalLauncher::new();
        modals
            .expect_configure_unschedulable()
            .withf(|node| node.name_any() == "worker-1")
            .times(1)
            .returning(|_| Ok(()));
        let ctx = test_ctx(modals);
        let action = mark_as_unschedulable(
            &ResourceKind::node(),
            &test_node(None),
            &ctx,
            &ActionOptions::default(),
        );
        (action.callback)().await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_opens_modal() {
        let mut modals = MockModalLauncher::new();
        modals
            .expect_delete_resource()
            .withf(|params| {
                params.kind.kind == "Node"
                    && params.resource.name_any() == "worker-1"
                    && params.message.starts_with("This action cannot be undone.")
            })
            .times(1)
            .returning(|_| Ok(()));
        let ctx = test_ctx(modals);
        let action = delete(
            &ResourceKind::node(),
            &test_node(Some(true)),
            &ctx,
            &ActionOptions::default(),
        );
        assert!(!action.hidden);
        assert_eq!(action.label, "Delete node");
        assert_eq!(action.access_review.as_ref().unwrap().verb, "delete");
        (action.callback)().await.unwrap();
    }
}
