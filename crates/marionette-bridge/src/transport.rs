//! Transports deliver flushed batches to whatever host sits below the bridge.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use crate::operation::Operation;

/// Receives each flushed batch, in order. The bridge has already logged the
/// batch when `send` is called; a failure here is reported by `flush`.
pub trait Transport {
    fn send(&mut self, batch: &[Operation]) -> std::io::Result<()>;
}

/// Discards every batch. The default when no host is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTransport;

impl Transport for NullTransport {
    fn send(&mut self, _batch: &[Operation]) -> std::io::Result<()> {
        Ok(())
    }
}

/// Keeps every delivered batch in a shared buffer.
#[derive(Debug, Default, Clone)]
pub struct MemoryTransport {
    batches: Rc<RefCell<Vec<Vec<Operation>>>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Batches delivered so far, oldest first.
    pub fn batches(&self) -> Vec<Vec<Operation>> {
        self.batches.borrow().clone()
    }

    /// Drain all delivered batches.
    pub fn take(&self) -> Vec<Vec<Operation>> {
        std::mem::take(&mut *self.batches.borrow_mut())
    }
}

impl Transport for MemoryTransport {
    fn send(&mut self, batch: &[Operation]) -> std::io::Result<()> {
        self.batches.borrow_mut().push(batch.to_vec());
        Ok(())
    }
}

/// Writes one JSON object per operation, one per line.
pub struct JsonLinesTransport<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesTransport<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Transport for JsonLinesTransport<W> {
    fn send(&mut self, batch: &[Operation]) -> std::io::Result<()> {
        for operation in batch {
            serde_json::to_writer(&mut self.writer, operation)?;
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()
    }
}
