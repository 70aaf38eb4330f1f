//! Main controller implementation.
//!
//! This module contains the `Controller` struct that orchestrates
//! reconciliation and resource watching for the unified fabric controller.
//!
//! The controller manages four CRD types:
//! - Vrf: tenant-scoped routing contexts
//! - BridgeDomain: layer-2 flood domains referencing a Vrf
//! - ApplicationProfile: containers for endpoint groups
//! - EndpointGroup: workload attachment points referencing a BridgeDomain

use crate::connector::Connector;
use crate::engine::registry::KindRegistry;
use crate::error::ControllerError;
use crate::reconciler::Reconciler;
use crate::watcher::Watcher;
use crds::{ApplicationProfile, BridgeDomain, EndpointGroup, Vrf};
use kube::{Api, Client};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// Main controller for fabric resource management.
pub struct Controller {
    vrf_watcher: JoinHandle<Result<(), ControllerError>>,
    bridge_domain_watcher: JoinHandle<Result<(), ControllerError>>,
    application_profile_watcher: JoinHandle<Result<(), ControllerError>>,
    endpoint_group_watcher: JoinHandle<Result<(), ControllerError>>,
}

impl Controller {
    /// Creates a new controller instance.
    pub async fn new(connector: Connector, namespace: Option<String>) -> Result<Self, ControllerError> {
        info!("Initializing fabric controller");

        let kube_client = Client::try_default().await.map_err(ControllerError::Kube)?;

        // Validates credentials and connectivity before any watcher starts.
        let fabric = connector.connect().await?;

        let registry = KindRegistry::new();
        for descriptor in registry.descriptors() {
            match descriptor.relation {
                Some(relation) => info!(
                    "Managing kind {} ({}, class {}, relation {})",
                    descriptor.kind, descriptor.api_group, descriptor.class, relation.class
                ),
                None => info!(
                    "Managing kind {} ({}, class {})",
                    descriptor.kind, descriptor.api_group, descriptor.class
                ),
            }
        }

        let ns = namespace.as_deref().unwrap_or("default");
        let vrf_api: Api<Vrf> = Api::namespaced(kube_client.clone(), ns);
        let bridge_domain_api: Api<BridgeDomain> = Api::namespaced(kube_client.clone(), ns);
        let application_profile_api: Api<ApplicationProfile> =
            Api::namespaced(kube_client.clone(), ns);
        let endpoint_group_api: Api<EndpointGroup> = Api::namespaced(kube_client.clone(), ns);

        let reconciler = Arc::new(Reconciler::new(
            fabric,
            vrf_api.clone(),
            bridge_domain_api.clone(),
            application_profile_api.clone(),
            endpoint_group_api.clone(),
        ));

        let watcher_instance = Arc::new(Watcher::new(
            reconciler,
            registry,
            vrf_api,
            bridge_domain_api,
            application_profile_api,
            endpoint_group_api,
        ));

        let vrf_watcher = {
            let watcher = watcher_instance.clone();
            tokio::spawn(async move { watcher.watch_vrfs().await })
        };

        let bridge_domain_watcher = {
            let watcher = watcher_instance.clone();
            tokio::spawn(async move { watcher.watch_bridge_domains().await })
        };

        let application_profile_watcher = {
            let watcher = watcher_instance.clone();
            tokio::spawn(async move { watcher.watch_application_profiles().await })
        };

        let endpoint_group_watcher = {
            let watcher = watcher_instance;
            tokio::spawn(async move { watcher.watch_endpoint_groups().await })
        };

        Ok(Self {
            vrf_watcher,
            bridge_domain_watcher,
            application_profile_watcher,
            endpoint_group_watcher,
        })
    }

    /// Runs the controller until shutdown.
    pub async fn run(mut self) -> Result<(), ControllerError> {
        info!("Fabric controller running");

        // Wait for any watcher to exit (they should run forever)
        tokio::select! {
            result = &mut self.vrf_watcher => {
                result.map_err(|e| ControllerError::Watch(format!("Vrf watcher panicked: {}", e)))?
                    .map_err(|e| ControllerError::Watch(format!("Vrf watcher error: {}", e)))?;
            }
            result = &mut self.bridge_domain_watcher => {
                result.map_err(|e| ControllerError::Watch(format!("BridgeDomain watcher panicked: {}", e)))?
                    .map_err(|e| ControllerError::Watch(format!("BridgeDomain watcher error: {}", e)))?;
            }
            result = &mut self.application_profile_watcher => {
                result.map_err(|e| ControllerError::Watch(format!("ApplicationProfile watcher panicked: {}", e)))?
                    .map_err(|e| ControllerError::Watch(format!("ApplicationProfile watcher error: {}", e)))?;
            }
            result = &mut self.endpoint_group_watcher => {
                result.map_err(|e| ControllerError::Watch(format!("EndpointGroup watcher panicked: {}", e)))?
                    .map_err(|e| ControllerError::Watch(format!("EndpointGroup watcher error: {}", e)))?;
            }
        }

        Ok(())
    }
}
