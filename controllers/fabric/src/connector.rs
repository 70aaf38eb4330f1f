//! Fabric session factory.
//!
//! Turns a raw credential payload into a validated fabric API handle.
//! Construction is pure; the network is only touched by `connect`, which
//! performs a lightweight authenticated read before handing the client out.

use crate::error::ControllerError;
use fabric_client::{Credentials, FabricApi, FabricClient};
use std::sync::Arc;
use tracing::{error, info};

/// Builds validated fabric sessions from a credential bundle.
#[derive(Debug)]
pub struct Connector {
    credentials: Credentials,
}

impl Connector {
    /// Wrap an already-parsed credential bundle.
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Parse a raw credential payload (JSON).
    ///
    /// A malformed payload is a configuration error, not a fabric error:
    /// retrying it cannot succeed until the payload is fixed.
    pub fn from_payload(payload: &[u8]) -> Result<Self, ControllerError> {
        let credentials = Credentials::from_json(payload)
            .map_err(|e| ControllerError::InvalidConfig(e.to_string()))?;
        Ok(Self::new(credentials))
    }

    /// Construct a fabric client and validate credentials and connectivity.
    pub async fn connect(&self) -> Result<Arc<dyn FabricApi>, ControllerError> {
        let client = FabricClient::new(self.credentials.clone())?;

        info!("Validating fabric credentials and connectivity...");
        client.validate_session().await.map_err(|e| {
            error!("Failed to validate fabric session: {}", e);
            error!("Please ensure:");
            error!("  1. FABRIC_CREDENTIALS carries a valid username and password");
            error!("  2. The fabric controller is reachable at {}", self.credentials.url);
            ControllerError::Fabric(e)
        })?;
        info!("Fabric session validated and connectivity established");

        Ok(Arc::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_payload_is_invalid_config() {
        let err = Connector::from_payload(b"{\"url\": ").unwrap_err();
        assert!(matches!(err, ControllerError::InvalidConfig(_)));
    }

    #[test]
    fn well_formed_payload_accepted() {
        let payload = br#"{"url": "https://fabric", "username": "admin", "password": "s"}"#;
        assert!(Connector::from_payload(payload).is_ok());
    }
}
