//! Generic reconciliation engine.
//!
//! One lifecycle implementation serves every managed kind. A kind plugs in
//! by implementing [`ManagedKind`]: how to address its object (DN), what
//! attribute payload to write, and how to project a remote read back into
//! comparable desired-state parameters. `ExternalClient` then drives
//! Observe/Create/Update/Delete against the fabric for that kind.

pub mod kinds;
pub mod registry;

#[cfg(test)]
mod engine_test;

use crate::error::ControllerError;
use fabric_client::{Dn, FabricApi, FabricError, ObjectAttributes, RelationKind, relation_target_name};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// Per-kind descriptor consumed by the generic engine.
///
/// Implemented on the CRD type itself; `Params` is the spec struct. Drift
/// detection is equality between the desired spec and the spec rebuilt from
/// a remote read by `observed`, so every field that `payload` writes (and
/// every relation target) must round-trip through `observed`.
pub trait ManagedKind: Send + Sync + 'static {
    /// Kubernetes kind tag, used in logs and error contexts.
    const KIND: &'static str;
    /// Fabric object class tag.
    const CLASS: &'static str;

    /// Desired-state parameters (the CRD spec).
    type Params: Clone + PartialEq + Send + Sync + fmt::Debug;

    /// Distinguished name of the object these parameters describe.
    fn dn(params: &Self::Params) -> Dn;

    /// Attribute payload written on create and update.
    fn payload(params: &Self::Params) -> ObjectAttributes;

    /// The relation child this kind owns, if any.
    fn relation() -> Option<RelationKind> {
        None
    }

    /// Name of the object the relation must point at.
    fn relation_target(_params: &Self::Params) -> Option<&str> {
        None
    }

    /// Rebuild parameters from a remote read.
    ///
    /// Identity fields (name, tenant, parent) are taken from `desired`:
    /// they are encoded in the DN that was fetched, so they cannot drift.
    fn observed(
        desired: &Self::Params,
        attributes: &ObjectAttributes,
        relation_target: Option<&str>,
    ) -> Self::Params;
}

/// Outcome of one observation pass against the fabric.
#[derive(Debug, Default)]
pub struct ExternalObservation {
    /// Whether the remote object exists at all.
    pub resource_exists: bool,
    /// Whether the remote object matches the desired parameters.
    pub resource_up_to_date: bool,
    /// Connection material surfaced to the host. None of the managed kinds
    /// produce any today, so this is always empty.
    pub connection_details: HashMap<String, Vec<u8>>,
    /// Raw attributes of the remote object, when it exists.
    pub attributes: Option<ObjectAttributes>,
}

impl ExternalObservation {
    /// The distinguished absent outcome: not found is a state, not an error.
    pub fn absent() -> Self {
        Self::default()
    }
}

/// Drives the external lifecycle of one managed kind against the fabric.
pub struct ExternalClient<K> {
    fabric: Arc<dyn FabricApi>,
    _kind: PhantomData<K>,
}

impl<K: ManagedKind> ExternalClient<K> {
    pub fn new(fabric: Arc<dyn FabricApi>) -> Self {
        Self {
            fabric,
            _kind: PhantomData,
        }
    }

    /// Fetch the remote object and compare it against the desired state.
    ///
    /// Transport and remote failures propagate unchanged; only a definitive
    /// not-found read produces the absent observation.
    pub async fn observe(&self, desired: &K::Params) -> Result<ExternalObservation, ControllerError> {
        let dn = K::dn(desired);
        let attributes = match self.fabric.get(&dn).await.map_err(ControllerError::Fabric)? {
            Some(attributes) => attributes,
            None => {
                debug!("{} {} not found in fabric", K::KIND, dn);
                return Ok(ExternalObservation::absent());
            }
        };

        let relation_name = match K::relation() {
            Some(relation) => match self.fabric.get_relation(&dn, &relation).await {
                Ok(Some(target_dn)) => relation_target_name(&target_dn, relation.target_prefix),
                Ok(None) => None,
                Err(e) => {
                    // A failed relation read is indistinguishable from an
                    // absent relation; the resulting drift makes the next
                    // update re-establish it.
                    debug!(
                        "{} {}: relation read failed, treating relation as absent: {}",
                        K::KIND,
                        dn,
                        e
                    );
                    None
                }
            },
            None => None,
        };

        let observed = K::observed(desired, &attributes, relation_name.as_deref());
        let resource_up_to_date = observed == *desired;
        debug!(
            "{} {} observed (up to date: {})",
            K::KIND,
            dn,
            resource_up_to_date
        );

        Ok(ExternalObservation {
            resource_exists: true,
            resource_up_to_date,
            connection_details: HashMap::new(),
            attributes: Some(attributes),
        })
    }

    /// Create the remote object, then establish its relation.
    pub async fn create(&self, desired: &K::Params) -> Result<(), ControllerError> {
        let dn = K::dn(desired);
        self.fabric
            .upsert(K::CLASS, &dn, K::payload(desired))
            .await
            .map_err(|source| ControllerError::Create {
                kind: K::KIND,
                source,
            })?;
        self.apply_relation(&dn, desired).await
    }

    /// Rewrite the remote object's payload, then its relation.
    ///
    /// The relation write is unconditional: if a previous pass wrote the
    /// object but lost its relation, the update here repairs it.
    pub async fn update(&self, desired: &K::Params) -> Result<(), ControllerError> {
        let dn = K::dn(desired);
        self.fabric
            .upsert(K::CLASS, &dn, K::payload(desired))
            .await
            .map_err(|source| ControllerError::Update {
                kind: K::KIND,
                source,
            })?;
        self.apply_relation(&dn, desired).await
    }

    /// Delete the remote object. An already-absent object is success.
    pub async fn delete(&self, desired: &K::Params) -> Result<(), ControllerError> {
        let dn = K::dn(desired);
        match self.fabric.delete_by_dn(&dn, K::CLASS).await {
            Ok(()) => Ok(()),
            Err(FabricError::NotFound(_)) => {
                debug!("{} {} already absent, delete is a no-op", K::KIND, dn);
                Ok(())
            }
            Err(e) => Err(ControllerError::Fabric(e)),
        }
    }

    async fn apply_relation(&self, dn: &Dn, desired: &K::Params) -> Result<(), ControllerError> {
        let (Some(relation), Some(target)) = (K::relation(), K::relation_target(desired)) else {
            return Ok(());
        };
        self.fabric
            .set_relation(dn, &relation, target)
            .await
            .map_err(|source| ControllerError::Relation {
                kind: K::KIND,
                source,
            })
    }
}
