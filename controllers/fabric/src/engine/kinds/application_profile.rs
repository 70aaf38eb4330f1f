//! ApplicationProfile kind descriptor

use crate::engine::ManagedKind;
use crds::{ApplicationProfile, ApplicationProfileSpec};
use fabric_client::{CLASS_APP_PROFILE, Dn, ObjectAttributes};
use serde_json::json;

impl ManagedKind for ApplicationProfile {
    const KIND: &'static str = "ApplicationProfile";
    const CLASS: &'static str = CLASS_APP_PROFILE;

    type Params = ApplicationProfileSpec;

    fn dn(params: &ApplicationProfileSpec) -> Dn {
        Dn::application_profile(&params.tenant, &params.name)
    }

    fn payload(params: &ApplicationProfileSpec) -> ObjectAttributes {
        [
            ("name".to_string(), json!(params.name)),
            ("nameAlias".to_string(), json!(params.name_alias)),
        ]
        .into_iter()
        .collect()
    }

    fn observed(
        desired: &ApplicationProfileSpec,
        attributes: &ObjectAttributes,
        _relation: Option<&str>,
    ) -> ApplicationProfileSpec {
        ApplicationProfileSpec {
            name: desired.name.clone(),
            tenant: desired.tenant.clone(),
            name_alias: attributes.get_or_default("nameAlias").to_string(),
        }
    }
}
