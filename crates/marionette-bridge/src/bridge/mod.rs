//! The `Bridge` owns the outgoing operation stream and the shadow records.
//!
//! Operations are applied to the shadow store as soon as they are issued
//! and queued in a pending buffer. `flush` drains that buffer, in order,
//! into the observable log and hands the same batch to the transport.

mod inspect;


use std::collections::VecDeque;

use marionette_common::{IdGenerator, ObjectId};
use marionette_config::BridgeConfig;
use tracing::{debug, trace, warn};

use crate::error::BridgeError;
use crate::operation::{Operation, Properties};
use crate::record::RecordStore;
use crate::transport::{NullTransport, Transport};

pub struct Bridge {
    /// Issued but not yet flushed, oldest first.
    pending: VecDeque<Operation>,
    /// Everything flushed since the last `reset_calls`.
    log: Vec<Operation>,
    records: RecordStore,
    transport: Box<dyn Transport>,
    /// Auto-flush once `pending` reaches this length; 0 disables.
    flush_threshold: usize,
    /// Transport failure from an automatic flush, reported by the next
    /// explicit `flush`.
    deferred: Option<BridgeError>,
    ids: IdGenerator,
}

impl Bridge {
    /// A bridge with no host attached and manual flushing.
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            log: Vec::new(),
            records: RecordStore::new(),
            transport: Box::new(NullTransport),
            flush_threshold: 0,
            deferred: None,
            ids: IdGenerator::default(),
        }
    }

    pub fn from_config(config: &BridgeConfig) -> Self {
        let mut bridge = Self::new();
        bridge.flush_threshold = config.flush_threshold as usize;
        bridge.ids = IdGenerator::new(config.id_prefix.clone());
        bridge
    }

    /// Replace the transport that receives flushed batches.
    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Box::new(transport);
        self
    }

    pub fn set_flush_threshold(&mut self, threshold: usize) {
        self.flush_threshold = threshold;
    }

    pub fn flush_threshold(&self) -> usize {
        self.flush_threshold
    }

    /// Allocate a fresh identity for a new remote object.
    pub fn next_id(&self) -> ObjectId {
        self.ids.next_id()
    }

    // -- Wire operations --

    /// Register a new remote object of `type_name` with initial properties.
    pub fn create(
        &mut self,
        id: &ObjectId,
        type_name: &str,
        properties: Properties,
    ) -> Result<(), BridgeError> {
        self.issue(Operation::Create {
            id: id.clone(),
            type_name: type_name.to_string(),
            properties,
        })
    }

    /// Ask the native side for a property. The answer arrives later through
    /// the host's inbound channel.
    pub fn get(&mut self, id: &ObjectId, property: &str) -> Result<(), BridgeError> {
        self.issue(Operation::Get {
            id: id.clone(),
            property: property.to_string(),
        })
    }

    /// Merge `properties` into the remote object.
    pub fn set(&mut self, id: &ObjectId, properties: Properties) -> Result<(), BridgeError> {
        self.issue(Operation::Set {
            id: id.clone(),
            properties,
        })
    }

    /// Invoke a native method. Fire-and-forget.
    pub fn call(
        &mut self,
        id: &ObjectId,
        method: &str,
        parameters: Properties,
    ) -> Result<(), BridgeError> {
        self.issue(Operation::Call {
            id: id.clone(),
            method: method.to_string(),
            parameters,
        })
    }

    /// Toggle native delivery of `event` for the object.
    pub fn listen(
        &mut self,
        id: &ObjectId,
        event: &str,
        enabled: bool,
    ) -> Result<(), BridgeError> {
        self.issue(Operation::Listen {
            id: id.clone(),
            event: event.to_string(),
            listen: enabled,
        })
    }

    /// Destroy the remote object. Fails if no record exists for `id`.
    pub fn destroy(&mut self, id: &ObjectId) -> Result<(), BridgeError> {
        self.issue(Operation::Destroy { id: id.clone() })
    }

    /// Drain every pending operation into the log and the transport.
    ///
    /// Returns how many operations were drained. The log is updated before
    /// the transport is called, so a transport failure never loses entries.
    /// A failure left behind by an automatic flush is returned here, once.
    pub fn flush(&mut self) -> Result<usize, BridgeError> {
        let deferred = self.deferred.take();
        let drained = self.drain()?;
        match deferred {
            Some(e) => Err(e),
            None => Ok(drained),
        }
    }

    fn drain(&mut self) -> Result<usize, BridgeError> {
        if self.pending.is_empty() {
            return Ok(0);
        }
        let batch: Vec<Operation> = self.pending.drain(..).collect();
        let count = batch.len();
        self.log.extend(batch.iter().cloned());
        debug!(count, "flushing bridge operations");
        self.transport.send(&batch)?;
        Ok(count)
    }

    /// Number of operations issued but not yet flushed.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn issue(&mut self, operation: Operation) -> Result<(), BridgeError> {
        self.records.apply(&operation)?;
        trace!(op = operation.kind(), id = %operation.id(), "bridge operation");
        self.pending.push_back(operation);
        // Auto-flush failures surface from the next explicit flush.
        if self.flush_threshold > 0 && self.pending.len() >= self.flush_threshold {
            if let Err(e) = self.drain() {
                warn!("automatic flush failed: {e}");
                self.deferred.get_or_insert(e);
            }
        }
        Ok(())
    }
}

impl Default for Bridge {
    fn default() -> Self {
        Self::new()
    }
}
