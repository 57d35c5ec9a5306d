use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::operation::Operation;

/// Field-wise filter over logged operations.
///
/// An operation matches when every field named in the filter is present in
/// its wire form with an equal value. Fields the filter does not mention
/// match anything, so the empty filter matches every operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallFilter {
    fields: serde_json::Map<String, Value>,
}

impl CallFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match on the operation kind (`"create"`, `"set"`, ...).
    pub fn op(self, kind: &str) -> Self {
        self.with("op", kind)
    }

    /// Match on the target identity.
    pub fn id(self, id: &str) -> Self {
        self.with("id", id)
    }

    /// Match an arbitrary wire field exactly.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn matches(&self, operation: &Operation) -> bool {
        if self.fields.is_empty() {
            return true;
        }
        let wire = operation.to_wire();
        self.fields
            .iter()
            .all(|(field, expected)| wire.get(field) == Some(expected))
    }
}
