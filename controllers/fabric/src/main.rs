//! Fabric Controller
//!
//! Unified controller for managing all fabric-related CRDs:
//! - Vrf: tenant-scoped routing contexts
//! - BridgeDomain: layer-2 flood domains (reference a Vrf)
//! - ApplicationProfile: containers for endpoint groups
//! - EndpointGroup: workload attachment points (reference a BridgeDomain)
//!
//! This controller ensures GitOps-style management of fabric network objects.

mod connector;
mod controller;
mod engine;
mod error;
mod reconciler;
mod watcher;

use crate::connector::Connector;
use crate::error::ControllerError;
use controller::Controller;
use std::env;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), ControllerError> {
    tracing_subscriber::fmt::init();

    info!("Starting fabric controller");

    // Load configuration from environment variables
    let credentials = env::var("FABRIC_CREDENTIALS").map_err(|_| {
        ControllerError::InvalidConfig(
            "FABRIC_CREDENTIALS environment variable is required".to_string(),
        )
    })?;
    let namespace = env::var("WATCH_NAMESPACE").ok();

    let connector = Connector::from_payload(credentials.as_bytes())?;

    info!("Configuration:");
    info!("  Namespace: {}", namespace.as_deref().unwrap_or("all namespaces"));

    // Initialize and run controller
    let controller = Controller::new(connector, namespace).await?;
    controller.run().await?;

    Ok(())
}
