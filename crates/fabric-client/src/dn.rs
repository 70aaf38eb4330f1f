//! Distinguished-name construction and parsing
//!
//! Every object in the fabric controller's tree is addressed by a
//! slash-delimited distinguished name (DN) rooted at `root`, e.g.
//! `root/tn-Prod/ctx-Main`. Each segment carries a kind prefix
//! (`tn-`, `ctx-`, `BD-`, `ap-`, `epg-`) followed by the bare object
//! name, so a DN both names an object and encodes its parent chain.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Root of the fabric object tree.
pub const DN_ROOT: &str = "root";

/// Segment prefix for tenants.
pub const TENANT_PREFIX: &str = "tn-";
/// Segment prefix for VRFs (contexts).
pub const VRF_PREFIX: &str = "ctx-";
/// Segment prefix for bridge domains.
pub const BRIDGE_DOMAIN_PREFIX: &str = "BD-";
/// Segment prefix for application profiles.
pub const APP_PROFILE_PREFIX: &str = "ap-";
/// Segment prefix for endpoint groups.
pub const ENDPOINT_GROUP_PREFIX: &str = "epg-";

/// A distinguished name addressing exactly one object in the fabric tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dn(String);

impl Dn {
    /// DN of the tenant container itself: `root/tn-{tenant}`.
    pub fn tenant(tenant: &str) -> Self {
        Dn(format!("{DN_ROOT}/{TENANT_PREFIX}{tenant}"))
    }

    /// DN of a VRF: `root/tn-{tenant}/ctx-{name}`.
    pub fn vrf(tenant: &str, name: &str) -> Self {
        Dn(format!("{DN_ROOT}/{TENANT_PREFIX}{tenant}/{VRF_PREFIX}{name}"))
    }

    /// DN of a bridge domain: `root/tn-{tenant}/BD-{name}`.
    pub fn bridge_domain(tenant: &str, name: &str) -> Self {
        Dn(format!("{DN_ROOT}/{TENANT_PREFIX}{tenant}/{BRIDGE_DOMAIN_PREFIX}{name}"))
    }

    /// DN of an application profile: `root/tn-{tenant}/ap-{name}`.
    pub fn application_profile(tenant: &str, name: &str) -> Self {
        Dn(format!("{DN_ROOT}/{TENANT_PREFIX}{tenant}/{APP_PROFILE_PREFIX}{name}"))
    }

    /// DN of an endpoint group: `root/tn-{tenant}/ap-{profile}/epg-{name}`.
    pub fn endpoint_group(tenant: &str, profile: &str, name: &str) -> Self {
        Dn(format!(
            "{DN_ROOT}/{TENANT_PREFIX}{tenant}/{APP_PROFILE_PREFIX}{profile}/{ENDPOINT_GROUP_PREFIX}{name}"
        ))
    }

    /// Wrap a raw DN string (e.g. one returned by the fabric controller).
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Dn(raw.into())
    }

    /// The raw string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The slash-separated segments of this DN.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.0.split('/')
    }

    /// Recover the tenant name embedded in this DN, if any.
    pub fn tenant_name(&self) -> Option<&str> {
        self.segments()
            .find_map(|seg| seg.strip_prefix(TENANT_PREFIX))
    }

    /// Recover the bare object name from the trailing segment by stripping
    /// the given kind prefix.
    ///
    /// A trailing segment that does not carry the expected prefix yields
    /// `None` rather than an error: relation targets are DN-like strings and
    /// an unexpected prefix means the relation does not point at an object
    /// of the expected kind.
    pub fn leaf_name(&self, prefix: &str) -> Option<&str> {
        self.segments().next_back()?.strip_prefix(prefix)
    }

    /// Recover the parent-segment name (the segment just above the leaf)
    /// by stripping the given kind prefix.
    pub fn parent_name(&self, prefix: &str) -> Option<&str> {
        let segments: Vec<&str> = self.segments().collect();
        if segments.len() < 2 {
            return None;
        }
        segments[segments.len() - 2].strip_prefix(prefix)
    }
}

impl fmt::Display for Dn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Dn> for String {
    fn from(dn: Dn) -> String {
        dn.0
    }
}

/// Recover the bare target name from a relation target DN.
///
/// Relation reads return the target's full DN (e.g. `root/tn-T/ctx-V`).
/// The trailing segment is stripped of the kind prefix to recover the name
/// declared in the referencing spec. A missing or unexpected prefix is
/// reported as `None`: the relation is treated as absent, never as an error.
pub fn relation_target_name(target_dn: &str, prefix: &str) -> Option<String> {
    Dn::from_raw(target_dn)
        .leaf_name(prefix)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vrf_dn_round_trip() {
        let dn = Dn::vrf("T1", "V1");
        assert_eq!(dn.as_str(), "root/tn-T1/ctx-V1");
        assert_eq!(dn.tenant_name(), Some("T1"));
        assert_eq!(dn.leaf_name(VRF_PREFIX), Some("V1"));
    }

    #[test]
    fn bridge_domain_dn_round_trip() {
        let dn = Dn::bridge_domain("T1", "BD1");
        assert_eq!(dn.as_str(), "root/tn-T1/BD-BD1");
        assert_eq!(dn.tenant_name(), Some("T1"));
        assert_eq!(dn.leaf_name(BRIDGE_DOMAIN_PREFIX), Some("BD1"));
    }

    #[test]
    fn application_profile_dn_round_trip() {
        let dn = Dn::application_profile("T1", "AP1");
        assert_eq!(dn.as_str(), "root/tn-T1/ap-AP1");
        assert_eq!(dn.tenant_name(), Some("T1"));
        assert_eq!(dn.leaf_name(APP_PROFILE_PREFIX), Some("AP1"));
    }

    #[test]
    fn endpoint_group_dn_round_trip() {
        let dn = Dn::endpoint_group("T1", "AP1", "EPG1");
        assert_eq!(dn.as_str(), "root/tn-T1/ap-AP1/epg-EPG1");
        assert_eq!(dn.tenant_name(), Some("T1"));
        assert_eq!(dn.parent_name(APP_PROFILE_PREFIX), Some("AP1"));
        assert_eq!(dn.leaf_name(ENDPOINT_GROUP_PREFIX), Some("EPG1"));
    }

    #[test]
    fn relation_target_name_strips_prefix() {
        assert_eq!(
            relation_target_name("root/tn-T1/ctx-X", VRF_PREFIX),
            Some("X".to_string())
        );
        assert_eq!(
            relation_target_name("root/tn-T1/BD-Web", BRIDGE_DOMAIN_PREFIX),
            Some("Web".to_string())
        );
    }

    #[test]
    fn relation_target_name_unexpected_prefix_is_absent() {
        // Wrong prefix on the trailing segment: relation treated as absent.
        assert_eq!(relation_target_name("root/tn-T1/BD-X", VRF_PREFIX), None);
        // Missing prefix entirely.
        assert_eq!(relation_target_name("root/tn-T1/X", VRF_PREFIX), None);
        // Prefix with an empty name is not a usable target.
        assert_eq!(relation_target_name("root/tn-T1/ctx-", VRF_PREFIX), None);
    }
}
