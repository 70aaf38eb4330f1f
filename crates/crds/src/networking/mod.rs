//! Networking CRDs
//!
//! Tenant-scoped forwarding resources:
//! - VRFs (routing contexts)
//! - Bridge Domains (layer-2 flood domains, referencing a VRF)

pub mod vrf;
pub mod bridge_domain;

pub use vrf::*;
pub use bridge_domain::*;
