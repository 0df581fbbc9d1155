use std::any::TypeId;

use k8s_openapi::{
    api::{certificates::v1::CertificateSigningRequest, core::v1::Node},
    NamespaceResourceScope, Resource,
};
use serde::Serialize;

/// Description of a resource kind, as the console sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceKind {
    pub kind: String,
    /// API group. Empty for the core group.
    pub api_group: String,
    pub api_version: String,
    pub plural: String,
    /// Human-readable name of the kind.
    pub label: String,
    pub namespaced: bool,
}

impl ResourceKind {
    #[must_use]
    pub fn of<K>() -> Self
    where
        K: Resource,
        K::Scope: 'static,
    {
        Self {
            kind: String::from(K::KIND),
            api_group: String::from(K::GROUP),
            api_version: String::from(K::API_VERSION),
            plural: String::from(K::URL_PATH_SEGMENT),
            label: split_camel_case(K::KIND),
            namespaced: TypeId::of::<K::Scope>() == TypeId::of::<NamespaceResourceScope>(),
        }
    }

    #[must_use]
    pub fn node() -> Self {
        Self::of::<Node>()
    }

    #[must_use]
    pub fn certificate_signing_request() -> Self {
        Self::of::<CertificateSigningRequest>()
    }
}

fn split_camel_case(kind: &str) -> String {
    let mut label = String::with_capacity(kind.len() + 4);
    let mut prev_lower = false;
    for ch in kind.chars() {
        if ch.is_uppercase() && prev_lower {
            label.push(' ');
        }
        prev_lower = ch.is_lowercase();
        label.push(ch);
    }
    label
}
