//! Fabric Controller REST API Client
//!
//! A Rust client library for the fabric controller's managed-object REST API.
//! Provides distinguished-name construction, the object envelope models, and
//! the five gateway operations the reconciliation engine depends on.
//!
//! # Example
//!
//! ```no_run
//! use fabric_client::{Credentials, Dn, FabricApi, FabricClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Build a session from the provider credential bundle
//! let client = FabricClient::new(Credentials {
//!     url: "https://apic.example.com".to_string(),
//!     username: "admin".to_string(),
//!     password: "secret".to_string(),
//!     insecure: false,
//! })?;
//!
//! // Fetch a VRF by DN; None means the object does not exist
//! let vrf = client.get(&Dn::vrf("Prod", "Main")).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **DN building/parsing**: deterministic identifiers with lossless
//!   recovery of tenant, parent, and name segments
//! - **Idempotent upsert**: one write shape for both create and modify
//! - **Relation sub-objects**: independent read/write of cross-object links
//! - **Distinguished not-found**: never conflated with transport failure

pub mod client;
pub mod dn;
pub mod error;
#[path = "trait.rs"]
pub mod fabric_trait;
#[cfg(feature = "test-util")]
pub mod mock;
pub mod models;

pub use client::{Credentials, FabricClient};
pub use dn::{Dn, relation_target_name};
pub use error::FabricError;
pub use fabric_trait::FabricApi;
#[cfg(feature = "test-util")]
pub use mock::MockFabricClient;
pub use models::*;
