//! Shadow state of remote objects.

use std::collections::HashMap;

use marionette_common::ObjectId;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::BridgeError;
use crate::operation::{Operation, Properties};

/// Local belief about one remote object's type and properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteRecord {
    /// Native type name; empty for placeholders created by an early `set`.
    pub type_name: String,
    pub properties: Properties,
}

/// Records keyed by identity. A record exists exactly while its identity
/// has been created and not yet destroyed.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: HashMap<ObjectId, RemoteRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild shadow state by applying a recorded log in order.
    pub fn replay<'a>(
        operations: impl IntoIterator<Item = &'a Operation>,
    ) -> Result<Self, BridgeError> {
        let mut store = Self::new();
        for operation in operations {
            store.apply(operation)?;
        }
        Ok(store)
    }

    /// Apply the shadow-state effect of one operation.
    ///
    /// `get`, `call` and `listen` leave records untouched; `destroy` of an
    /// unknown identity fails.
    pub fn apply(&mut self, operation: &Operation) -> Result<(), BridgeError> {
        match operation {
            Operation::Create {
                id,
                type_name,
                properties,
            } => {
                let record = RemoteRecord {
                    type_name: type_name.clone(),
                    properties: properties.clone(),
                };
                if self.records.insert(id.clone(), record).is_some() {
                    warn!(%id, "redefined a live remote object");
                }
            }
            Operation::Set { id, properties } => {
                let record = self.records.entry(id.clone()).or_insert_with(|| {
                    debug!(%id, "set before create, adding placeholder record");
                    RemoteRecord::default()
                });
                for (name, value) in properties {
                    record.properties.insert(name.clone(), value.clone());
                }
            }
            Operation::Destroy { id } => {
                if self.records.remove(id).is_none() {
                    return Err(BridgeError::NotFound(id.clone()));
                }
            }
            Operation::Get { .. } | Operation::Call { .. } | Operation::Listen { .. } => {}
        }
        Ok(())
    }

    /// Check that applying `operation` would succeed, without applying it.
    pub fn check(&self, operation: &Operation) -> Result<(), BridgeError> {
        match operation {
            Operation::Destroy { id } if !self.records.contains_key(id) => {
                Err(BridgeError::NotFound(id.clone()))
            }
            _ => Ok(()),
        }
    }

    pub fn get(&self, id: &ObjectId) -> Option<&RemoteRecord> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.records.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
