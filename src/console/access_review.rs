use k8s_openapi::api::authorization::v1::{
    ResourceAttributes, SelfSubjectAccessReview, SelfSubjectAccessReviewSpec,
};
use kube::{api::PostParams, Resource, ResourceExt};
use serde::Serialize;

use crate::models::ResourceKind;

use super::error::KnaResult;

/// Parameters of a permission check against cluster RBAC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessReview {
    pub group: String,
    pub resource: String,
    pub name: String,
    pub namespace: Option<String>,
    pub verb: String,
}

/// Build an access review for the `verb` on the given object.
#[must_use]
pub fn as_access_review<K: Resource>(kind: &ResourceKind, obj: &K, verb: &str) -> AccessReview {
    AccessReview {
        group: kind.api_group.clone(),
        resource: kind.plural.clone(),
        name: obj.name_any(),
        namespace: obj.namespace(),
        verb: String::from(verb),
    }
}

impl From<&AccessReview> for SelfSubjectAccessReview {
    fn from(review: &AccessReview) -> Self {
        Self {
            spec: SelfSubjectAccessReviewSpec {
                resource_attributes: Some(ResourceAttributes {
                    group: Some(review.group.clone()),
                    resource: Some(review.resource.clone()),
                    name: Some(review.name.clone()),
                    namespace: review.namespace.clone(),
                    verb: Some(review.verb.clone()),
                    ..Default::default()
                }),
                non_resource_attributes: None,
            },
            ..Default::default()
        }
    }
}

/// Ask the API server whether the current user may perform the review.
#[tracing::instrument(skip(client), fields(verb = %review.verb, name = %review.name), err)]
pub async fn check_access(client: kube::Client, review: &AccessReview) -> KnaResult<bool> {
    let api = kube::Api::<SelfSubjectAccessReview>::all(client);
    let response = api
        .create(&PostParams::default(), &SelfSubjectAccessReview::from(review))
        .await?;
    let allowed = response.status.is_some_and(|status| status.allowed);
    tracing::debug!(allowed, "Access review evaluated");
    Ok(allowed)
}
