//! Application CRDs
//!
//! Workload-facing resources:
//! - Application Profiles (containers for endpoint groups)
//! - Endpoint Groups (workload attachment points, referencing a bridge domain)

pub mod application_profile;
pub mod endpoint_group;

pub use application_profile::*;
pub use endpoint_group::*;
