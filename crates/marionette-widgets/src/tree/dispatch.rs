//! Event listeners and inbound native messages.
//!
//! The native side only delivers events a widget listens for: the first
//! listener for an event issues `listen(true)`, and losing the last one
//! issues `listen(false)`. Local-only events skip the bridge entirely.

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::WidgetError;
use crate::events::{is_local, Listener, WidgetEvent};
use crate::native::NativeMessage;
use crate::WidgetKey;

use super::WidgetTree;

impl WidgetTree {
    pub fn on(
        &mut self,
        key: WidgetKey,
        event: &str,
        listener: Listener,
    ) -> Result<(), WidgetError> {
        self.add_listener(key, event, listener, false)
    }

    /// Like `on`, but the listener is dropped after its first invocation.
    pub fn once(
        &mut self,
        key: WidgetKey,
        event: &str,
        listener: Listener,
    ) -> Result<(), WidgetError> {
        self.add_listener(key, event, listener, true)
    }

    pub fn off(
        &mut self,
        key: WidgetKey,
        event: &str,
        listener: &Listener,
    ) -> Result<(), WidgetError> {
        let widget = self.widget_mut(key)?;
        let emptied = widget.listeners.remove(event, listener);
        if emptied && !is_local(event) {
            let object_id = widget.object_id.clone();
            self.bridge.listen(&object_id, event, false)?;
        }
        Ok(())
    }

    /// Invoke the widget's listeners for `event`, in registration order.
    /// Returns how many listeners ran.
    pub fn trigger(
        &mut self,
        key: WidgetKey,
        event: &str,
        data: Value,
    ) -> Result<usize, WidgetError> {
        let widget = self.widget_mut(key)?;
        let (listeners, emptied) = widget.listeners.take_dispatch(event);
        let object_id = widget.object_id.clone();
        if emptied && !is_local(event) {
            self.bridge.listen(&object_id, event, false)?;
        }

        let dispatched = WidgetEvent {
            target: key,
            object_id,
            event: event.to_string(),
            data,
        };
        for listener in &listeners {
            listener(&dispatched);
        }
        Ok(listeners.len())
    }

    /// Route a message from the native side to its widget.
    pub fn receive(&mut self, message: NativeMessage) -> Result<(), WidgetError> {
        let Some(key) = self.lookup(message.id()) else {
            warn!(id = %message.id(), "native message for unknown object");
            return Err(WidgetError::UnknownObject(message.id().clone()));
        };
        match message {
            NativeMessage::Event { event, data, .. } => {
                let ran = self.trigger(key, &event, data)?;
                debug!(event = %event, listeners = ran, "native event delivered");
            }
            NativeMessage::Properties { properties, .. } => {
                self.apply_native_properties(key, properties)?;
            }
        }
        Ok(())
    }

    /// Fire a local-only event on a widget that may already be half torn down.
    pub(crate) fn trigger_local(&mut self, key: WidgetKey, event: &str, data: Value) {
        debug_assert!(is_local(event));
        if self.contains(key) {
            if let Err(e) = self.trigger(key, event, data) {
                warn!("local {event} dispatch failed: {e}");
            }
        }
    }

    fn add_listener(
        &mut self,
        key: WidgetKey,
        event: &str,
        listener: Listener,
        once: bool,
    ) -> Result<(), WidgetError> {
        let widget = self.widget_mut(key)?;
        let first = widget.listeners.add(event, listener, once);
        if first && !is_local(event) {
            let object_id = widget.object_id.clone();
            self.bridge.listen(&object_id, event, true)?;
        }
        Ok(())
    }
}
