//! Inspection surface for tests and hosts. Every read flushes first so the
//! log and the shadow records agree at the point of observation.

use marionette_common::ObjectId;

use crate::error::BridgeError;
use crate::filter::CallFilter;
use crate::operation::{Operation, Properties};
use crate::record::{RecordStore, RemoteRecord};

use super::Bridge;

impl Bridge {
    /// The flushed log, optionally narrowed to operations matching `filter`.
    pub fn calls(&mut self, filter: Option<&CallFilter>) -> Result<Vec<Operation>, BridgeError> {
        self.flush()?;
        Ok(match filter {
            Some(filter) => self
                .log
                .iter()
                .filter(|op| filter.matches(op))
                .cloned()
                .collect(),
            None => self.log.clone(),
        })
    }

    /// Flush, then clear the log. Shadow records are left alone.
    pub fn reset_calls(&mut self) -> Result<(), BridgeError> {
        self.flush()?;
        self.log.clear();
        Ok(())
    }

    /// Current shadow properties of a live object.
    pub fn properties(&mut self, id: &ObjectId) -> Result<Properties, BridgeError> {
        self.flush()?;
        self.records
            .get(id)
            .map(|record| record.properties.clone())
            .ok_or_else(|| BridgeError::NotFound(id.clone()))
    }

    /// Shadow record for `id`, without flushing.
    pub fn record(&self, id: &ObjectId) -> Option<&RemoteRecord> {
        self.records.get(id)
    }

    pub fn is_live(&self, id: &ObjectId) -> bool {
        self.records.contains(id)
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Shadow store rebuilt from the current log alone. Matches the live
    /// store whenever the log covers the bridge's whole history.
    pub fn replay_log(&mut self) -> Result<RecordStore, BridgeError> {
        self.flush()?;
        RecordStore::replay(&self.log)
    }
}
