//! Lifecycle condition shared by all fabric CRD status types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lifecycle condition of a fabric-managed resource
///
/// Absent status means the remote object has never been observed. The
/// condition is only mutated after a completed Observe/Create/Update pass.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub enum Condition {
    /// A create has been issued but the object has not yet been observed
    #[default]
    Creating,
    /// The remote object exists and was observed this pass
    Available,
    /// A delete has been issued against the remote object
    Deleting,
    /// The last pass failed; `message` carries the operator-facing detail
    Failed,
}
