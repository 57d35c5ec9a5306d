//! The `WidgetTree` owns the widget arena and the bridge every widget talks
//! through.

mod dispatch;
mod hierarchy;
mod lifecycle;
mod properties;

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use marionette_bridge::{Bridge, Transport};
use marionette_common::ObjectId;
use marionette_config::MarionetteConfig;
use slotmap::SlotMap;

use crate::collection::WidgetCollection;
use crate::encoder::{PassthroughEncoder, PropertyEncoder};
use crate::error::WidgetError;
use crate::widget::Widget;
use crate::WidgetKey;

pub struct WidgetTree {
    pub(crate) widgets: SlotMap<WidgetKey, Widget>,
    /// Reverse index used to route inbound native messages.
    pub(crate) by_object: HashMap<ObjectId, WidgetKey>,
    pub(crate) bridge: Bridge,
    pub(crate) encoder: Box<dyn PropertyEncoder>,
}

impl WidgetTree {
    /// An empty tree over a default bridge.
    pub fn new() -> Self {
        Self::with_bridge(Bridge::new())
    }

    pub fn with_bridge(bridge: Bridge) -> Self {
        Self {
            widgets: SlotMap::with_key(),
            by_object: HashMap::new(),
            bridge,
            encoder: Box::new(PassthroughEncoder),
        }
    }

    /// A tree whose bridge is tuned by `config` and delivers to `transport`.
    pub fn from_config(config: &MarionetteConfig, transport: impl Transport + 'static) -> Self {
        Self::with_bridge(Bridge::from_config(&config.bridge).with_transport(transport))
    }

    /// Replace the property encoder consulted before values reach the bridge.
    pub fn with_encoder(mut self, encoder: impl PropertyEncoder + 'static) -> Self {
        self.encoder = Box::new(encoder);
        self
    }

    // -- Accessors --

    pub fn bridge(&self) -> &Bridge {
        &self.bridge
    }

    pub fn bridge_mut(&mut self) -> &mut Bridge {
        &mut self.bridge
    }

    pub fn get(&self, key: WidgetKey) -> Option<&Widget> {
        self.widgets.get(key)
    }

    pub fn contains(&self, key: WidgetKey) -> bool {
        self.widgets.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// The widget proxying remote object `id`, if it is still alive.
    pub fn lookup(&self, id: &ObjectId) -> Option<WidgetKey> {
        self.by_object.get(id).copied()
    }

    pub fn object_id(&self, key: WidgetKey) -> Result<&ObjectId, WidgetError> {
        Ok(&self.widget(key)?.object_id)
    }

    /// A one-member collection, the usual starting point for `find`.
    pub fn collection(&self, key: WidgetKey) -> WidgetCollection {
        WidgetCollection::from_keys([key])
    }

    /// The widget's children as a collection.
    pub fn children(&self, key: WidgetKey) -> WidgetCollection {
        self.widgets
            .get(key)
            .map(|w| WidgetCollection::from_keys(w.children.iter().copied()))
            .unwrap_or_default()
    }

    pub(crate) fn widget(&self, key: WidgetKey) -> Result<&Widget, WidgetError> {
        self.widgets.get(key).ok_or(WidgetError::Disposed(key))
    }

    pub(crate) fn widget_mut(&mut self, key: WidgetKey) -> Result<&mut Widget, WidgetError> {
        self.widgets.get_mut(key).ok_or(WidgetError::Disposed(key))
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}
