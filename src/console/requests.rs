use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::Node;
use kube::{
    api::{DeleteParams, PostParams},
    ResourceExt,
};

use super::{
    error::KnaResult,
    utils::{replace_map_patch, resource::KnaResourceExt},
};

#[must_use]
pub fn is_node_unschedulable(node: &Node) -> bool {
    node.spec
        .as_ref()
        .and_then(|spec| spec.unschedulable)
        .unwrap_or(false)
}

async fn set_unschedulable(client: kube::Client, node: &Node, value: bool) -> KnaResult<Node> {
    let patch = serde_json::json!({
        "spec": {
            "unschedulable": value
        }
    });
    node.merge_patch(kube::Api::all(client), &patch).await
}

#[tracing::instrument(skip(client, node), fields(name = node.name_any()), err)]
pub async fn make_node_schedulable(client: kube::Client, node: &Node) -> KnaResult<Node> {
    tracing::info!("Marking node as schedulable");
    set_unschedulable(client, node, false).await
}

#[tracing::instrument(skip(client, node), fields(name = node.name_any()), err)]
pub async fn make_node_unschedulable(client: kube::Client, node: &Node) -> KnaResult<Node> {
    tracing::info!("Marking node as unschedulable");
    set_unschedulable(client, node, true).await
}

#[tracing::instrument(skip(client, node), fields(name = node.name_any()), err)]
pub async fn delete_node(client: kube::Client, node: &Node) -> KnaResult<()> {
    tracing::info!("Deleting node");
    let name = node.name_or_err()?;
    kube::Api::<Node>::all(client)
        .delete(&name, &DeleteParams::default())
        .await?;
    Ok(())
}

#[tracing::instrument(skip(client, node, labels), fields(name = node.name_any()), err)]
pub async fn replace_node_labels(
    client: kube::Client,
    node: &Node,
    labels: &BTreeMap<String, String>,
) -> KnaResult<Node> {
    let patch = replace_map_patch(node.labels(), labels);
    if patch.is_empty() {
        tracing::info!("Labels are unchanged");
        return Ok(node.clone());
    }
    let patch = serde_json::json!({ "metadata": { "labels": patch } });
    node.merge_patch(kube::Api::all(client), &patch).await
}

#[tracing::instrument(skip(client, node, annotations), fields(name = node.name_any()), err)]
pub async fn replace_node_annotations(
    client: kube::Client,
    node: &Node,
    annotations: &BTreeMap<String, String>,
) -> KnaResult<Node> {
    let patch = replace_map_patch(node.annotations(), annotations);
    if patch.is_empty() {
        tracing::info!("Annotations are unchanged");
        return Ok(node.clone());
    }
    let patch = serde_json::json!({ "metadata": { "annotations": patch } });
    node.merge_patch(kube::Api::all(client), &patch).await
}

#[tracing::instrument(skip(client, node), fields(name = node.name_any()), err)]
pub async fn replace_node(client: kube::Client, node: &Node) -> KnaResult<Node> {
    let name = node.name_or_err()?;
    let updated = kube::Api::<Node>::all(client)
        .replace(&name, &PostParams::default(), node)
        .await?;
    Ok(updated)
}
