//! Remote object bridge.
//!
//! Turns proxy-level intents into an ordered stream of protocol operations
//! against opaque native object identities, and keeps a shadow of the
//! remote object state for inspection:
//! - Six wire operations (`create`, `get`, `set`, `call`, `listen`, `destroy`)
//! - A pending buffer drained by an explicit `flush` barrier
//! - An append-only operation log and a shadow record store
//! - Pluggable transports for whatever host sits beneath the bridge

pub mod bridge;
pub mod error;
pub mod filter;
pub mod operation;
pub mod record;
pub mod transport;

pub use bridge::Bridge;
pub use error::BridgeError;
pub use filter::CallFilter;
pub use operation::{Operation, Properties};
pub use record::{RecordStore, RemoteRecord};
pub use transport::{JsonLinesTransport, MemoryTransport, NullTransport, Transport};
