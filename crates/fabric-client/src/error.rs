//! Fabric client errors

use thiserror::Error;

/// Errors that can occur when interacting with the fabric controller API
#[derive(Debug, Error)]
pub enum FabricError {
    /// HTTP request/response error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Fabric controller returned an error
    #[error("Fabric API error: {0}")]
    Api(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Authentication failed (bad credentials, expired session, etc.)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Object not found
    ///
    /// Deliberately distinguished from transport failures: callers map this
    /// to the absent state instead of treating it as a failed pass.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request (e.g. malformed credential payload)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
