//! Widget proxies and the collection/selector engine.
//!
//! Every widget is a local proxy for one remote object. The `WidgetTree`
//! owns the proxies in an arena and routes every mutation through its
//! `Bridge`. Collections are snapshots of widget keys produced by selectors
//! and offer bulk dispatch over their members.
//!
//! ```text
//! WidgetTree ── SlotMap<WidgetKey, Widget> ── Bridge ── Transport
//!      ▲
//!      └── WidgetCollection (keys only) ◄── Selector
//! ```

pub mod collection;
pub mod encoder;
pub mod error;
pub mod events;
pub mod layout;
pub mod native;
mod query;
pub mod selector;
pub mod tree;
pub mod types;
pub mod widget;

slotmap::new_key_type! {
    /// Arena handle for a widget. Stale keys never resolve once the widget
    /// has been disposed.
    pub struct WidgetKey;
}

pub use collection::WidgetCollection;
pub use encoder::{PassthroughEncoder, PropertyEncoder};
pub use error::{BulkError, PropertyError, SelectorError, WidgetError};
pub use events::{Listener, WidgetEvent};
pub use layout::{build_layout, LayoutError, LayoutNode};
pub use native::NativeMessage;
pub use selector::Selector;
pub use tree::WidgetTree;
pub use types::WidgetType;
pub use widget::Widget;
