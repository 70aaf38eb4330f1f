//! FabricApi trait for mocking
//!
//! This trait abstracts the fabric controller client so reconciliation logic
//! can be unit tested against an in-memory mock. The concrete `FabricClient`
//! implements it; tests use `MockFabricClient`.

use crate::dn::Dn;
use crate::error::FabricError;
use crate::models::{ObjectAttributes, RelationKind};

/// Trait for fabric controller API operations
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait FabricApi: Send + Sync {
    /// Get the base URL
    fn base_url(&self) -> &str;

    /// Validate credentials and connectivity with a lightweight read
    async fn validate_session(&self) -> Result<(), FabricError>;

    /// Fetch an object by DN.
    ///
    /// `Ok(None)` is the distinguished not-found outcome; any `Err` is a
    /// transport or remote failure and is propagated unchanged by callers.
    async fn get(&self, dn: &Dn) -> Result<Option<ObjectAttributes>, FabricError>;

    /// Create or modify an object at the given DN (idempotent).
    async fn upsert(
        &self,
        class: &str,
        dn: &Dn,
        attributes: ObjectAttributes,
    ) -> Result<(), FabricError>;

    /// Delete an object by DN and class.
    async fn delete_by_dn(&self, dn: &Dn, class: &str) -> Result<(), FabricError>;

    /// Read the current relation target DN, if the relation exists.
    async fn get_relation(
        &self,
        dn: &Dn,
        relation: &RelationKind,
    ) -> Result<Option<String>, FabricError>;

    /// Establish or overwrite the relation to the named target object.
    ///
    /// Safe to call unconditionally on every create and update.
    async fn set_relation(
        &self,
        dn: &Dn,
        relation: &RelationKind,
        target_name: &str,
    ) -> Result<(), FabricError>;
}
