//! Fabric controller API models
//!
//! These models match the fabric controller's managed-object REST envelope:
//! every read returns `{"totalCount": "N", "imdata": [{"<class>": {"attributes": {...}}}]}`
//! and every write posts the same class/attributes shape back.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Object class tag for VRFs.
pub const CLASS_VRF: &str = "fvCtx";
/// Object class tag for bridge domains.
pub const CLASS_BRIDGE_DOMAIN: &str = "fvBD";
/// Object class tag for application profiles.
pub const CLASS_APP_PROFILE: &str = "fvAp";
/// Object class tag for endpoint groups.
pub const CLASS_ENDPOINT_GROUP: &str = "fvAEPg";

/// Response envelope for managed-object reads.
///
/// `totalCount` is a decimal string in the wire format; `"0"` is the
/// distinguished not-found signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoResponse {
    /// Number of objects matched, as a decimal string.
    #[serde(rename = "totalCount")]
    pub total_count: String,
    /// Matched objects, each keyed by its class tag.
    pub imdata: Vec<Map<String, Value>>,
}

impl MoResponse {
    /// Whether the response carries zero objects.
    pub fn is_empty(&self) -> bool {
        self.total_count == "0" || self.imdata.is_empty()
    }

    /// Extract the attribute map of the first returned object, regardless
    /// of its class tag.
    pub fn first_attributes(&self) -> Option<ObjectAttributes> {
        let entry = self.imdata.first()?;
        let (_, body) = entry.iter().next()?;
        let attrs = body.get("attributes")?.as_object()?;
        Some(ObjectAttributes(attrs.clone()))
    }
}

/// Attribute map of one fabric object, as returned by a read.
///
/// The fabric controller serializes every attribute as a string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectAttributes(pub Map<String, Value>);

impl ObjectAttributes {
    /// Fetch a string attribute; missing or non-string attributes read as `None`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Fetch a string attribute, defaulting to the empty string like the
    /// fabric controller does for unset attributes.
    pub fn get_or_default(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }
}

impl FromIterator<(String, Value)> for ObjectAttributes {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        ObjectAttributes(iter.into_iter().collect())
    }
}

/// Descriptor of a relation sub-object linking one fabric object to another.
///
/// Relations are stored as separate children of the referencing object and
/// are read/written independently of its own attribute payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationKind {
    /// Class tag of the relation child object.
    pub class: &'static str,
    /// Relative name of the relation child under the owning object's DN.
    pub rn: &'static str,
    /// Kind prefix carried by the target DN's trailing segment.
    pub target_prefix: &'static str,
    /// Attribute naming the target object on writes.
    pub name_attr: &'static str,
}

/// Bridge domain to VRF relation.
pub const RELATION_BD_TO_VRF: RelationKind = RelationKind {
    class: "fvRsCtx",
    rn: "rsctx",
    target_prefix: crate::dn::VRF_PREFIX,
    name_attr: "tnFvCtxName",
};

/// Endpoint group to bridge domain relation.
pub const RELATION_EPG_TO_BD: RelationKind = RelationKind {
    class: "fvRsBd",
    rn: "rsbd",
    target_prefix: crate::dn::BRIDGE_DOMAIN_PREFIX,
    name_attr: "tnFvBDName",
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_response_detected() {
        let resp: MoResponse =
            serde_json::from_value(json!({"totalCount": "0", "imdata": []})).unwrap();
        assert!(resp.is_empty());
        assert!(resp.first_attributes().is_none());
    }

    #[test]
    fn first_attributes_extracted() {
        let resp: MoResponse = serde_json::from_value(json!({
            "totalCount": "1",
            "imdata": [{"fvCtx": {"attributes": {"name": "V1", "nameAlias": "prod"}}}]
        }))
        .unwrap();
        assert!(!resp.is_empty());
        let attrs = resp.first_attributes().unwrap();
        assert_eq!(attrs.get("nameAlias"), Some("prod"));
        assert_eq!(attrs.get_or_default("pcTag"), "");
    }
}
