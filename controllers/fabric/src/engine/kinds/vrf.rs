//! Vrf kind descriptor

use crate::engine::ManagedKind;
use crds::{Vrf, VrfSpec};
use fabric_client::{CLASS_VRF, Dn, ObjectAttributes};
use serde_json::json;

impl ManagedKind for Vrf {
    const KIND: &'static str = "Vrf";
    const CLASS: &'static str = CLASS_VRF;

    type Params = VrfSpec;

    fn dn(params: &VrfSpec) -> Dn {
        Dn::vrf(&params.tenant, &params.name)
    }

    fn payload(params: &VrfSpec) -> ObjectAttributes {
        [
            ("name".to_string(), json!(params.name)),
            ("nameAlias".to_string(), json!(params.name_alias)),
        ]
        .into_iter()
        .collect()
    }

    fn observed(desired: &VrfSpec, attributes: &ObjectAttributes, _relation: Option<&str>) -> VrfSpec {
        VrfSpec {
            name: desired.name.clone(),
            tenant: desired.tenant.clone(),
            name_alias: attributes.get_or_default("nameAlias").to_string(),
        }
    }
}
