//! Controller-specific error types.
//!
//! This module defines error types specific to the unified fabric controller
//! that are not covered by upstream library errors. Create, Update, and
//! Relation failures are reported distinctly so an operator can tell a
//! rejected object write apart from a rejected relation write.

use fabric_client::FabricError;
use kube::Error as KubeError;
use thiserror::Error;

/// Errors that can occur in the fabric controller.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Kubernetes API error
    #[error("Kubernetes error: {0}")]
    Kube(#[from] KubeError),

    /// Fabric API error
    #[error("Fabric error: {0}")]
    Fabric(#[from] FabricError),

    /// Object creation rejected by the fabric
    #[error("failed to create {kind} in fabric: {source}")]
    Create {
        kind: &'static str,
        #[source]
        source: FabricError,
    },

    /// Object update rejected by the fabric
    #[error("failed to update {kind} in fabric: {source}")]
    Update {
        kind: &'static str,
        #[source]
        source: FabricError,
    },

    /// Relation write rejected by the fabric (the object itself was written)
    #[error("failed to set {kind} relation in fabric: {source}")]
    Relation {
        kind: &'static str,
        #[source]
        source: FabricError,
    },

    /// A resource of a kind this controller does not manage
    #[error("unexpected kind: {0}")]
    UnexpectedKind(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Resource watch failed
    #[error("Resource watch failed: {0}")]
    Watch(String),
}
