//! Wire operations sent from the proxy runtime to the native side.
//!
//! Every operation serializes to a flat JSON object tagged by `op`, with
//! `id` always present:
//!
//! ```json
//! {"op":"set","id":"$4","properties":{"text":"Hello"}}
//! ```

use marionette_common::ObjectId;
use serde::{Deserialize, Serialize};

/// Property or parameter mapping carried by an operation.
pub type Properties = serde_json::Map<String, serde_json::Value>;

/// A single protocol operation against a remote object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Operation {
    Create {
        id: ObjectId,
        #[serde(rename = "type")]
        type_name: String,
        properties: Properties,
    },
    Get {
        id: ObjectId,
        property: String,
    },
    Set {
        id: ObjectId,
        properties: Properties,
    },
    Call {
        id: ObjectId,
        method: String,
        parameters: Properties,
    },
    Listen {
        id: ObjectId,
        event: String,
        listen: bool,
    },
    Destroy {
        id: ObjectId,
    },
}

impl Operation {
    /// Identity of the object this operation targets.
    pub fn id(&self) -> &ObjectId {
        match self {
            Operation::Create { id, .. }
            | Operation::Get { id, .. }
            | Operation::Set { id, .. }
            | Operation::Call { id, .. }
            | Operation::Listen { id, .. }
            | Operation::Destroy { id } => id,
        }
    }

    /// The wire name of the operation (`"create"`, `"set"`, ...).
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::Create { .. } => "create",
            Operation::Get { .. } => "get",
            Operation::Set { .. } => "set",
            Operation::Call { .. } => "call",
            Operation::Listen { .. } => "listen",
            Operation::Destroy { .. } => "destroy",
        }
    }

    /// The operation as a wire-format JSON object.
    pub fn to_wire(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Parse an operation from a raw JSON string.
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}
