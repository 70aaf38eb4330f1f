//! ApplicationProfile Custom Resource Definition

use crate::conditions::Condition;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// ApplicationProfileSpec defines the desired state of an application profile
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "apps.fabricops.io",
    version = "v1alpha1",
    kind = "ApplicationProfile",
    namespaced,
    status = "ApplicationProfileStatus"
)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationProfileSpec {
    /// Application profile name in the fabric
    pub name: String,

    /// Tenant the profile lives under
    pub tenant: String,

    /// Display alias (optional, empty when unset)
    #[serde(default)]
    pub name_alias: String,
}

/// ApplicationProfileStatus defines the observed state of an application profile
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationProfileStatus {
    /// Distinguished name of the remote object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dn: Option<String>,

    /// Lifecycle condition
    pub condition: Condition,

    /// Error message if the last reconciliation pass failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
