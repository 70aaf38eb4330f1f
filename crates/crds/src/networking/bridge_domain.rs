//! BridgeDomain Custom Resource Definition
//!
//! A bridge domain is a tenant-scoped layer-2 flood domain. It must
//! reference a VRF; that reference is stored as a separate relation
//! sub-object in the fabric, not as one of the bridge domain's own
//! attributes.

use crate::conditions::Condition;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// BridgeDomainSpec defines the desired state of a fabric bridge domain
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "networking.fabricops.io",
    version = "v1alpha1",
    kind = "BridgeDomain",
    namespaced,
    status = "BridgeDomainStatus"
)]
#[serde(rename_all = "camelCase")]
pub struct BridgeDomainSpec {
    /// Bridge domain name in the fabric
    pub name: String,

    /// Tenant the bridge domain lives under
    pub tenant: String,

    /// Name of the VRF this bridge domain forwards through (same tenant)
    pub vrf: String,

    /// ARP flooding setting ("yes"/"no"; fabric serializes flags as strings)
    #[serde(default)]
    pub arp_flood: String,
}

/// BridgeDomainStatus defines the observed state of a fabric bridge domain
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct BridgeDomainStatus {
    /// Distinguished name of the remote object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dn: Option<String>,

    /// Lifecycle condition
    pub condition: Condition,

    /// Error message if the last reconciliation pass failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
