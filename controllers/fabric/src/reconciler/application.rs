//! Application reconcilers
//!
//! Handles: ApplicationProfile, EndpointGroup

use super::{ManagedResource, Reconciler};
use crate::error::ControllerError;
use crds::{
    ApplicationProfile, ApplicationProfileSpec, Condition, EndpointGroup, EndpointGroupSpec,
};
use fabric_client::ObjectAttributes;
use serde_json::{Value, json};

impl ManagedResource for ApplicationProfile {
    fn params(&self) -> &ApplicationProfileSpec {
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

impl ManagedResource for EndpointGroup {
    fn params(&self) -> &EndpointGroupSpec {
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
    /// Reconciles an ApplicationProfile resource.
    pub async fn reconcile_application_profile(
        &self,
        profile: &ApplicationProfile,
    ) -> Result<(), ControllerError> {
        self.reconcile_managed(&self.application_profile_api, profile).await
    }

    /// Reconciles an EndpointGroup resource.
    pub async fn reconcile_endpoint_group(
        &self,
        endpoint_group: &EndpointGroup,
    ) -> Result<(), ControllerError> {
        self.reconcile_managed(&self.endpoint_group_api, endpoint_group).await
    }
}
