//! BridgeDomain kind descriptor
//!
//! Carries the VRF relation: the referenced VRF name is not one of the
//! bridge domain's own attributes, so it is read and written through the
//! relation child. An absent relation reads back as an empty VRF name,
//! which drifts against any non-empty desired value.

use crate::engine::ManagedKind;
use crds::{BridgeDomain, BridgeDomainSpec};
use fabric_client::{CLASS_BRIDGE_DOMAIN, Dn, ObjectAttributes, RELATION_BD_TO_VRF, RelationKind};
use serde_json::json;

impl ManagedKind for BridgeDomain {
    const KIND: &'static str = "BridgeDomain";
    const CLASS: &'static str = CLASS_BRIDGE_DOMAIN;

    type Params = BridgeDomainSpec;

    fn dn(params: &BridgeDomainSpec) -> Dn {
        Dn::bridge_domain(&params.tenant, &params.name)
    }

    fn payload(params: &BridgeDomainSpec) -> ObjectAttributes {
        [
            ("name".to_string(), json!(params.name)),
            ("arpFlood".to_string(), json!(params.arp_flood)),
        ]
        .into_iter()
        .collect()
    }

    fn relation() -> Option<RelationKind> {
        Some(RELATION_BD_TO_VRF)
    }

    fn relation_target(params: &BridgeDomainSpec) -> Option<&str> {
        Some(&params.vrf)
    }

    fn observed(
        desired: &BridgeDomainSpec,
        attributes: &ObjectAttributes,
        relation: Option<&str>,
    ) -> BridgeDomainSpec {
        BridgeDomainSpec {
            name: desired.name.clone(),
            tenant: desired.tenant.clone(),
            vrf: relation.unwrap_or_default().to_string(),
            arp_flood: attributes.get_or_default("arpFlood").to_string(),
        }
    }
}
