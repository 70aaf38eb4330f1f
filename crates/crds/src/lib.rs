//! Fabricops CRD Definitions
//!
//! Kubernetes Custom Resource Definitions for the fabric controllers.

pub mod conditions;
pub mod networking;
pub mod application;

pub use conditions::Condition;
pub use networking::*;
pub use application::*;
