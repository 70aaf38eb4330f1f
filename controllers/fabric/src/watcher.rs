//! Kubernetes resource watchers.
//!
//! One generic `watch_resource()` helper drives the reconcile loop for
//! every managed kind through kube_runtime::Controller, which handles
//! reconnection, retries, and event batching.

use crate::engine::registry::KindRegistry;
use crate::error::ControllerError;
use crate::reconciler::Reconciler;
use crds::{ApplicationProfile, BridgeDomain, EndpointGroup, Vrf};
use futures::StreamExt;
use kube::{Api, ResourceExt};
use kube_runtime::{
    Controller,
    controller::{Action, Config as ControllerConfig},
    watcher,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Generic watcher loop for one managed kind.
///
/// Debounce batches bursts of events (status writes included) before
/// reconciling; concurrency caps parallel reconciliations per kind. Errors
/// requeue after a minute.
async fn watch_resource<K, F>(
    api: Api<K>,
    reconciler: Arc<Reconciler>,
    reconcile_fn: F,
    resource_name: &str,
) -> Result<(), ControllerError>
where
    K: kube::Resource + Clone + Send + Sync + 'static + std::fmt::Debug + serde::de::DeserializeOwned,
    K::DynamicType: Default + std::cmp::Eq + std::hash::Hash + Clone + std::fmt::Debug + Unpin,
    F: Fn(Arc<Reconciler>, Arc<K>) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Action, ControllerError>> + Send>>
        + Send
        + Sync
        + Clone
        + 'static,
{
    info!("Starting {} watcher", resource_name);

    let error_policy = {
        let resource_name = resource_name.to_string();
        move |obj: Arc<K>, error: &ControllerError, _ctx: Arc<Reconciler>| {
            error!(
                "Reconciliation error for {} {}: {}",
                resource_name,
                obj.name_any(),
                error
            );
            Action::requeue(Duration::from_secs(60))
        }
    };

    let reconcile = {
        let resource_name = resource_name.to_string();
        move |obj: Arc<K>, ctx: Arc<Reconciler>| {
            let reconcile_fn = reconcile_fn.clone();
            let resource_name = resource_name.clone();
            async move {
                debug!("Reconciling {} {}", resource_name, obj.name_any());
                reconcile_fn(ctx, obj).await
            }
        }
    };

    let controller_config = ControllerConfig::default()
        .debounce(Duration::from_secs(5))
        .concurrency(3);

    Controller::new(api, watcher::Config::default())
        .with_config(controller_config)
        .run(reconcile, error_policy, reconciler)
        .for_each(|res| async move {
            if let Err(e) = res {
                error!("Controller error: {}", e);
            }
        })
        .await;

    Ok(())
}

/// Watches fabric-managed CRDs for changes.
pub struct Watcher {
    reconciler: Arc<Reconciler>,
    registry: KindRegistry,
    vrf_api: Api<Vrf>,
    bridge_domain_api: Api<BridgeDomain>,
    application_profile_api: Api<ApplicationProfile>,
    endpoint_group_api: Api<EndpointGroup>,
}

impl Watcher {
    /// Creates a new watcher instance.
    pub fn new(
        reconciler: Arc<Reconciler>,
        registry: KindRegistry,
        vrf_api: Api<Vrf>,
        bridge_domain_api: Api<BridgeDomain>,
        application_profile_api: Api<ApplicationProfile>,
        endpoint_group_api: Api<EndpointGroup>,
    ) -> Self {
        Self {
            reconciler,
            registry,
            vrf_api,
            bridge_domain_api,
            application_profile_api,
            endpoint_group_api,
        }
    }

    /// Starts watching Vrf resources.
    pub async fn watch_vrfs(&self) -> Result<(), ControllerError> {
        let descriptor = self.registry.get("Vrf")?;
        watch_resource(
            self.vrf_api.clone(),
            self.reconciler.clone(),
            |reconciler, resource| {
                Box::pin(async move {
                    match reconciler.reconcile_vrf(&resource).await {
                        Ok(()) => Ok(Action::await_change()),
                        Err(e) => Err(e),
                    }
                })
            },
            descriptor.kind,
        )
        .await
    }

    /// Starts watching BridgeDomain resources.
    pub async fn watch_bridge_domains(&self) -> Result<(), ControllerError> {
        let descriptor = self.registry.get("BridgeDomain")?;
        watch_resource(
            self.bridge_domain_api.clone(),
            self.reconciler.clone(),
            |reconciler, resource| {
                Box::pin(async move {
                    match reconciler.reconcile_bridge_domain(&resource).await {
                        Ok(()) => Ok(Action::await_change()),
                        Err(e) => Err(e),
                    }
                })
            },
            descriptor.kind,
        )
        .await
    }

    /// Starts watching ApplicationProfile resources.
    pub async fn watch_application_profiles(&self) -> Result<(), ControllerError> {
        let descriptor = self.registry.get("ApplicationProfile")?;
        watch_resource(
            self.application_profile_api.clone(),
            self.reconciler.clone(),
            |reconciler, resource| {
                Box::pin(async move {
                    match reconciler.reconcile_application_profile(&resource).await {
                        Ok(()) => Ok(Action::await_change()),
                        Err(e) => Err(e),
                    }
                })
            },
            descriptor.kind,
        )
        .await
    }

    /// Starts watching EndpointGroup resources.
    pub async fn watch_endpoint_groups(&self) -> Result<(), ControllerError> {
        let descriptor = self.registry.get("EndpointGroup")?;
        watch_resource(
            self.endpoint_group_api.clone(),
            self.reconciler.clone(),
            |reconciler, resource| {
                Box::pin(async move {
                    match reconciler.reconcile_endpoint_group(&resource).await {
                        Ok(()) => Ok(Action::await_change()),
                        Err(e) => Err(e),
                    }
                })
            },
            descriptor.kind,
        )
        .await
    }
}
