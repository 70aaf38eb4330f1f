//! Vrf Custom Resource Definition
//!
//! Defines a Kubernetes CRD for managing tenant-scoped VRFs (routing
//! contexts) in the fabric controller.

use crate::conditions::Condition;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// VrfSpec defines the desired state of a fabric VRF
///
/// `name` and `tenant` are identity fields: changing either addresses a
/// different remote object rather than updating the existing one.
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "networking.fabricops.io",
    version = "v1alpha1",
    kind = "Vrf",
    namespaced,
    status = "VrfStatus"
)]
#[serde(rename_all = "camelCase")]
pub struct VrfSpec {
    /// VRF name in the fabric
    pub name: String,

    /// Tenant the VRF lives under
    pub tenant: String,

    /// Display alias (optional, empty when unset)
    #[serde(default)]
    pub name_alias: String,
}

/// VrfStatus defines the observed state of a fabric VRF
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct VrfStatus {
    /// Distinguished name of the remote object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dn: Option<String>,

    /// Forwarding policy tag assigned by the fabric
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pc_tag: Option<String>,

    /// Lifecycle condition
    pub condition: Condition,

    /// Error message if the last reconciliation pass failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
