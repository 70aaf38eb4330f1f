//! Static kind registry.
//!
//! The set of kinds this controller manages is fixed at compile time. The
//! registry exposes that set as data so startup logging and watcher wiring
//! can look kinds up by name; an unknown name is an `UnexpectedKind` error
//! rather than a panic.

use crate::engine::ManagedKind;
use crate::error::ControllerError;
use crds::{ApplicationProfile, BridgeDomain, EndpointGroup, Vrf};
use fabric_client::RelationKind;

/// Metadata for one managed kind.
#[derive(Debug, Clone)]
pub struct KindDescriptor {
    /// Kubernetes kind tag.
    pub kind: &'static str,
    /// Fabric object class tag.
    pub class: &'static str,
    /// Kubernetes API group the CRD belongs to.
    pub api_group: &'static str,
    /// Relation child the kind owns, if any.
    pub relation: Option<RelationKind>,
}

fn descriptor<K: ManagedKind>(api_group: &'static str) -> KindDescriptor {
    KindDescriptor {
        kind: K::KIND,
        class: K::CLASS,
        api_group,
        relation: K::relation(),
    }
}

/// All kinds this controller manages.
pub struct KindRegistry {
    entries: Vec<KindDescriptor>,
}

impl KindRegistry {
    pub fn new() -> Self {
        Self {
            entries: vec![
                descriptor::<Vrf>("networking.fabricops.io"),
                descriptor::<BridgeDomain>("networking.fabricops.io"),
                descriptor::<ApplicationProfile>("apps.fabricops.io"),
                descriptor::<EndpointGroup>("apps.fabricops.io"),
            ],
        }
    }

    /// Look a kind up by its Kubernetes kind tag.
    pub fn get(&self, kind: &str) -> Result<&KindDescriptor, ControllerError> {
        self.entries
            .iter()
            .find(|d| d.kind == kind)
            .ok_or_else(|| ControllerError::UnexpectedKind(kind.to_string()))
    }

    /// Iterate over every registered kind.
    pub fn descriptors(&self) -> impl Iterator<Item = &KindDescriptor> {
        self.entries.iter()
    }
}

impl Default for KindRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_kinds_resolve() {
        let registry = KindRegistry::new();
        assert_eq!(registry.get("Vrf").unwrap().class, "fvCtx");
        assert_eq!(registry.get("BridgeDomain").unwrap().class, "fvBD");
        assert_eq!(registry.get("ApplicationProfile").unwrap().class, "fvAp");
        assert_eq!(registry.get("EndpointGroup").unwrap().class, "fvAEPg");
        assert_eq!(registry.descriptors().count(), 4);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let registry = KindRegistry::new();
        let err = registry.get("Gadget").unwrap_err();
        assert!(matches!(err, ControllerError::UnexpectedKind(k) if k == "Gadget"));
    }

    #[test]
    fn relation_wiring_matches_kinds() {
        let registry = KindRegistry::new();
        assert!(registry.get("Vrf").unwrap().relation.is_none());
        let bd = registry.get("BridgeDomain").unwrap();
        assert_eq!(bd.relation.map(|r| r.class), Some("fvRsCtx"));
        let epg = registry.get("EndpointGroup").unwrap();
        assert_eq!(epg.relation.map(|r| r.class), Some("fvRsBd"));
    }
}
