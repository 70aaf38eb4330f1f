//! Networking reconcilers
//!
//! Handles: Vrf, BridgeDomain

use super::{ManagedResource, Reconciler};
use crate::error::ControllerError;
use crds::{BridgeDomain, BridgeDomainSpec, Condition, Vrf, VrfSpec};
use fabric_client::ObjectAttributes;
use serde_json::{Value, json};

impl ManagedResource for Vrf {
    fn params(&self) -> &VrfSpec {
        &self.spec
    }

    fn condition(&self) -> Option<&Condition> {
        self.status.as_ref().map(|s| &s.condition)
    }

    fn message(&self) -> Option<&str> {
        self.status.as_ref().and_then(|s| s.message.as_deref())
    }

    fn current_dn(&self) -> Option<&str> {
        self.status.as_ref().and_then(|s| s.dn.as_deref())
    }

    fn observed_status(attributes: &ObjectAttributes) -> Value {
        json!({
            "dn": attributes.get("dn"),
            "pcTag": attributes.get("pcTag"),
        })
    }

    fn status_up_to_date(&self, attributes: &ObjectAttributes) -> bool {
        self.condition() == Some(&Condition::Available)
            && self.message().is_none()
            && self.current_dn() == attributes.get("dn")
            && self.status.as_ref().and_then(|s| s.pc_tag.as_deref()) == attributes.get("pcTag")
    }
}

impl ManagedResource for BridgeDomain {
    fn params(&self) -> &BridgeDomainSpec {
        &self.spec
    }

    fn condition(&self) -> Option<&Condition> {
        self.status.as_ref().map(|s| &s.condition)
    }

    fn message(&self) -> Option<&str> {
        self.status.as_ref().and_then(|s| s.message.as_deref())
    }

    fn current_dn(&self) -> Option<&str> {
        self.status.as_ref().and_then(|s| s.dn.as_deref())
    }

    fn observed_status(attributes: &ObjectAttributes) -> Value {
        json!({ "dn": attributes.get("dn") })
    }
}

impl Reconciler {
    /// Reconciles a Vrf resource.
    pub async fn reconcile_vrf(&self, vrf: &Vrf) -> Result<(), ControllerError> {
        self.reconcile_managed(&self.vrf_api, vrf).await
    }

    /// Reconciles a BridgeDomain resource.
    pub async fn reconcile_bridge_domain(
        &self,
        bridge_domain: &BridgeDomain,
    ) -> Result<(), ControllerError> {
        self.reconcile_managed(&self.bridge_domain_api, bridge_domain).await
    }
}
