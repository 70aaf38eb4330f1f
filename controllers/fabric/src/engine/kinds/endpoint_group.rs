//! EndpointGroup kind descriptor
//!
//! Nested one level deeper than the other kinds: the DN runs through the
//! owning application profile. The bridge domain reference travels through
//! the relation child, like the bridge domain's own VRF reference.

use crate::engine::ManagedKind;
use crds::{EndpointGroup, EndpointGroupSpec};
use fabric_client::{CLASS_ENDPOINT_GROUP, Dn, ObjectAttributes, RELATION_EPG_TO_BD, RelationKind};
use serde_json::json;

impl ManagedKind for EndpointGroup {
    const KIND: &'static str = "EndpointGroup";
    const CLASS: &'static str = CLASS_ENDPOINT_GROUP;

    type Params = EndpointGroupSpec;

    fn dn(params: &EndpointGroupSpec) -> Dn {
        Dn::endpoint_group(&params.tenant, &params.application_profile, &params.name)
    }

    fn payload(params: &EndpointGroupSpec) -> ObjectAttributes {
        [
            ("name".to_string(), json!(params.name)),
            ("prefGrMemb".to_string(), json!(params.prefered_group)),
        ]
        .into_iter()
        .collect()
    }

    fn relation() -> Option<RelationKind> {
        Some(RELATION_EPG_TO_BD)
    }

    fn relation_target(params: &EndpointGroupSpec) -> Option<&str> {
        Some(&params.bridge_domain)
    }

    fn observed(
        desired: &EndpointGroupSpec,
        attributes: &ObjectAttributes,
        relation: Option<&str>,
    ) -> EndpointGroupSpec {
        EndpointGroupSpec {
            name: desired.name.clone(),
            tenant: desired.tenant.clone(),
            application_profile: desired.application_profile.clone(),
            bridge_domain: relation.unwrap_or_default().to_string(),
            prefered_group: attributes.get_or_default("prefGrMemb").to_string(),
        }
    }
}
