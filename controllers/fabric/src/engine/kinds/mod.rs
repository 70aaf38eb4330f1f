//! Kind descriptors
//!
//! One file per managed kind, each implementing `ManagedKind` on its CRD
//! type: DN construction, attribute payload, relation wiring, and the
//! projection of a remote read back into spec parameters.

pub mod application_profile;
pub mod bridge_domain;
pub mod endpoint_group;
pub mod vrf;
