//! Reconciliation logic for fabric-managed CRDs.
//!
//! This module is organized by API group:
//! - `networking`: Vrf, BridgeDomain
//! - `application`: ApplicationProfile, EndpointGroup
//!
//! All four kinds share one state machine, `reconcile_managed`, driven by
//! the generic engine. The per-group files supply only the Kubernetes-side
//! glue: which API to patch and which observed fields land in status.

pub mod application;
pub mod networking;

use crate::engine::{ExternalClient, ManagedKind};
use crate::error::ControllerError;
use crds::{ApplicationProfile, BridgeDomain, Condition, EndpointGroup, Vrf};
use fabric_client::{FabricApi, ObjectAttributes};
use kube::Api;
use kube::api::{Patch, PatchParams};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Finalizer owned by this controller. Its presence makes Kubernetes hold a
/// deleted resource until the remote object has been removed.
pub const FINALIZER: &str = "fabricops.io/cleanup";

/// Kubernetes-side glue for a managed kind: spec and status accessors plus
/// the observed fields this kind records when it becomes Available.
pub(crate) trait ManagedResource:
    ManagedKind + kube::Resource<DynamicType = ()> + Clone + std::fmt::Debug + serde::de::DeserializeOwned
{
    fn params(&self) -> &Self::Params;
    fn condition(&self) -> Option<&Condition>;
    fn message(&self) -> Option<&str>;
    fn current_dn(&self) -> Option<&str>;

    /// Observed status fields merged in once the object is Available.
    fn observed_status(attributes: &ObjectAttributes) -> Value;

    /// Whether the recorded status already reflects this observation.
    /// Skipping no-op status writes keeps the watch stream quiet.
    fn status_up_to_date(&self, attributes: &ObjectAttributes) -> bool {
        self.condition() == Some(&Condition::Available)
            && self.message().is_none()
            && self.current_dn() == attributes.get("dn")
    }
}

/// Reconciles fabric-managed resources.
pub struct Reconciler {
    pub(crate) fabric: Arc<dyn FabricApi>,
    pub(crate) vrf_api: Api<Vrf>,
    pub(crate) bridge_domain_api: Api<BridgeDomain>,
    pub(crate) application_profile_api: Api<ApplicationProfile>,
    pub(crate) endpoint_group_api: Api<EndpointGroup>,
}

impl Reconciler {
    /// Creates a new reconciler instance.
    pub fn new(
        fabric: Arc<dyn FabricApi>,
        vrf_api: Api<Vrf>,
        bridge_domain_api: Api<BridgeDomain>,
        application_profile_api: Api<ApplicationProfile>,
        endpoint_group_api: Api<EndpointGroup>,
    ) -> Self {
        Self {
            fabric,
            vrf_api,
            bridge_domain_api,
            application_profile_api,
            endpoint_group_api,
        }
    }

    /// Drives one resource through the Observe/Create/Update/Delete state
    /// machine and records the outcome in its status.
    pub(crate) async fn reconcile_managed<K: ManagedResource>(
        &self,
        api: &Api<K>,
        resource: &K,
    ) -> Result<(), ControllerError> {
        let name = resource.meta().name.clone().ok_or_else(|| {
            ControllerError::InvalidConfig(format!("{} missing metadata.name", K::KIND))
        })?;
        let namespace = resource
            .meta()
            .namespace
            .clone()
            .unwrap_or_else(|| "default".to_string());

        info!("Reconciling {} {}/{}", K::KIND, namespace, name);

        let external = ExternalClient::<K>::new(self.fabric.clone());
        let params = resource.params();

        if resource.meta().deletion_timestamp.is_some() {
            return self.finalize(api, resource, &external, &name, &namespace).await;
        }
        self.ensure_finalizer(api, resource, &name).await?;

        let mut observation = match external.observe(params).await {
            Ok(observation) => observation,
            Err(e) => {
                self.record_failure(api, resource, &name, &namespace, &e).await;
                return Err(e);
            }
        };

        if !observation.resource_exists {
            info!(
                "{} {}/{} absent in fabric, creating {}",
                K::KIND,
                namespace,
                name,
                K::dn(params)
            );
            self.patch_condition(api, resource, &name, &namespace, Condition::Creating, None)
                .await?;
            if let Err(e) = external.create(params).await {
                self.record_failure(api, resource, &name, &namespace, &e).await;
                return Err(e);
            }
            observation = match external.observe(params).await {
                Ok(observation) => observation,
                Err(e) => {
                    self.record_failure(api, resource, &name, &namespace, &e).await;
                    return Err(e);
                }
            };
            if !observation.resource_exists {
                // The write was accepted but the object is not readable
                // yet; the next pass picks it up.
                debug!(
                    "{} {}/{} created but not yet observable",
                    K::KIND,
                    namespace,
                    name
                );
                return Ok(());
            }
        } else if !observation.resource_up_to_date {
            info!(
                "{} {}/{} drifted from desired state, updating",
                K::KIND,
                namespace,
                name
            );
            if let Err(e) = external.update(params).await {
                self.record_failure(api, resource, &name, &namespace, &e).await;
                return Err(e);
            }
            observation = match external.observe(params).await {
                Ok(observation) => observation,
                Err(e) => {
                    self.record_failure(api, resource, &name, &namespace, &e).await;
                    return Err(e);
                }
            };
        }

        let attributes = observation.attributes.unwrap_or_default();
        if resource.status_up_to_date(&attributes) {
            debug!(
                "{} {}/{} status already current, skipping update",
                K::KIND,
                namespace,
                name
            );
            return Ok(());
        }

        let mut status = K::observed_status(&attributes);
        status["condition"] = json!(Condition::Available);
        status["message"] = Value::Null;
        let patch = json!({ "status": status });
        api.patch_status(&name, &PatchParams::default(), &Patch::Merge(&patch))
            .await?;
        info!(
            "{} {}/{} available (dn: {})",
            K::KIND,
            namespace,
            name,
            attributes.get_or_default("dn")
        );
        Ok(())
    }

    /// Deletes the remote object, then releases the finalizer so Kubernetes
    /// can drop the resource.
    async fn finalize<K: ManagedResource>(
        &self,
        api: &Api<K>,
        resource: &K,
        external: &ExternalClient<K>,
        name: &str,
        namespace: &str,
    ) -> Result<(), ControllerError> {
        let finalizers = resource.meta().finalizers.clone().unwrap_or_default();
        if !finalizers.iter().any(|f| f == FINALIZER) {
            // Nothing left for this controller to clean up.
            return Ok(());
        }

        info!("Deleting {} {}/{} from fabric", K::KIND, namespace, name);
        self.patch_condition(api, resource, name, namespace, Condition::Deleting, None)
            .await?;
        if let Err(e) = external.delete(resource.params()).await {
            self.record_failure(api, resource, name, namespace, &e).await;
            return Err(e);
        }

        let remaining: Vec<String> = finalizers.into_iter().filter(|f| f != FINALIZER).collect();
        let patch = json!({ "metadata": { "finalizers": remaining } });
        api.patch(name, &PatchParams::default(), &Patch::Merge(&patch))
            .await?;
        info!("{} {}/{} deleted from fabric", K::KIND, namespace, name);
        Ok(())
    }

    async fn ensure_finalizer<K: ManagedResource>(
        &self,
        api: &Api<K>,
        resource: &K,
        name: &str,
    ) -> Result<(), ControllerError> {
        let mut finalizers = resource.meta().finalizers.clone().unwrap_or_default();
        if finalizers.iter().any(|f| f == FINALIZER) {
            return Ok(());
        }
        finalizers.push(FINALIZER.to_string());
        let patch = json!({ "metadata": { "finalizers": finalizers } });
        api.patch(name, &PatchParams::default(), &Patch::Merge(&patch))
            .await?;
        Ok(())
    }

    async fn patch_condition<K: ManagedResource>(
        &self,
        api: &Api<K>,
        resource: &K,
        name: &str,
        namespace: &str,
        condition: Condition,
        message: Option<String>,
    ) -> Result<(), ControllerError> {
        if resource.condition() == Some(&condition) && resource.message() == message.as_deref() {
            debug!(
                "{} {}/{} already {:?}, skipping status update",
                K::KIND,
                namespace,
                name,
                condition
            );
            return Ok(());
        }
        let patch = json!({ "status": { "condition": condition, "message": message } });
        api.patch_status(name, &PatchParams::default(), &Patch::Merge(&patch))
            .await?;
        Ok(())
    }

    /// Best-effort failure recording; a broken status write must not mask
    /// the original error.
    async fn record_failure<K: ManagedResource>(
        &self,
        api: &Api<K>,
        resource: &K,
        name: &str,
        namespace: &str,
        failure: &ControllerError,
    ) {
        let message = failure.to_string();
        if resource.condition() == Some(&Condition::Failed)
            && resource.message() == Some(message.as_str())
        {
            debug!(
                "{} {}/{} already carries this failure, skipping status update",
                K::KIND,
                namespace,
                name
            );
            return;
        }
        let patch = json!({ "status": { "condition": Condition::Failed, "message": message } });
        if let Err(e) = api
            .patch_status(name, &PatchParams::default(), &Patch::Merge(&patch))
            .await
        {
            error!(
                "Failed to update {} {}/{} failure status: {}",
                K::KIND,
                namespace,
                name,
                e
            );
        }
    }
}
