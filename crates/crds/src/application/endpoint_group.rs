//! EndpointGroup Custom Resource Definition
//!
//! An endpoint group lives under an application profile and must reference
//! a bridge domain in the same tenant; the reference is a separate relation
//! sub-object in the fabric.

use crate::conditions::Condition;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// EndpointGroupSpec defines the desired state of a fabric endpoint group
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "apps.fabricops.io",
    version = "v1alpha1",
    kind = "EndpointGroup",
    namespaced,
    status = "EndpointGroupStatus"
)]
#[serde(rename_all = "camelCase")]
pub struct EndpointGroupSpec {
    /// Endpoint group name in the fabric
    pub name: String,

    /// Tenant the endpoint group lives under
    pub tenant: String,

    /// Application profile this endpoint group belongs to
    pub application_profile: String,

    /// Name of the bridge domain this endpoint group attaches to (same tenant)
    pub bridge_domain: String,

    /// Preferred-group membership ("include"/"exclude"; fabric wire spelling)
    #[serde(default)]
    pub prefered_group: String,
}

/// EndpointGroupStatus defines the observed state of a fabric endpoint group
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct EndpointGroupStatus {
    /// Distinguished name of the remote object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dn: Option<String>,

    /// Lifecycle condition
    pub condition: Condition,

    /// Error message if the last reconciliation pass failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
