//! Creating and disposing widgets.

use std::collections::HashSet;

use marionette_bridge::Properties;
use serde_json::Value;
use tracing::debug;

use crate::error::WidgetError;
use crate::types::WidgetType;
use crate::widget::Widget;
use crate::WidgetKey;

use super::properties::apply_local;
use super::WidgetTree;

impl WidgetTree {
    /// Instantiate a widget and issue its `create`.
    ///
    /// `id` and `class` are local attributes and are not sent to the native
    /// side; every other property goes through the encoder first.
    pub fn create(
        &mut self,
        widget_type: &'static WidgetType,
        properties: Properties,
    ) -> Result<WidgetKey, WidgetError> {
        let object_id = self.bridge.next_id();
        let mut widget = Widget::new(object_id.clone(), widget_type);

        let mut wire = Properties::new();
        for (name, value) in &properties {
            if apply_local(&mut widget, name, value)? {
                continue;
            }
            let encoded = self.encoder.encode(widget_type, name, value)?;
            wire.insert(name.clone(), encoded);
        }

        self.bridge.create(&object_id, widget_type.name, wire.clone())?;
        widget.properties = wire;

        let key = self.widgets.insert(widget);
        self.by_object.insert(object_id.clone(), key);
        debug!(id = %object_id, widget_type = widget_type.name, "widget created");
        Ok(key)
    }

    /// Dispose a widget and its whole subtree.
    ///
    /// Descendants are destroyed before their ancestors, each after its
    /// local `dispose` listeners ran. Disposing a widget that is already
    /// gone is an error.
    pub fn dispose(&mut self, key: WidgetKey) -> Result<(), WidgetError> {
        self.widget(key)?;
        self.unlink(key);

        let mut first_error = None;
        for doomed in self.subtree_post_order(key) {
            self.trigger_local(doomed, "dispose", Value::Null);
            let Some(widget) = self.widgets.remove(doomed) else {
                continue;
            };
            self.by_object.remove(&widget.object_id);
            if let Err(e) = self.bridge.destroy(&widget.object_id) {
                first_error.get_or_insert(WidgetError::from(e));
            }
            debug!(id = %widget.object_id, "widget disposed");
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// `key` and every descendant, children before parents.
    ///
    /// Two-stack walk: the first stack visits parents before children, the
    /// second collects that order, and reversing it yields post-order with
    /// siblings in their original order.
    fn subtree_post_order(&self, key: WidgetKey) -> Vec<WidgetKey> {
        let mut seen = HashSet::new();
        let mut pending = vec![key];
        let mut reversed = Vec::new();
        while let Some(key) = pending.pop() {
            if !seen.insert(key) {
                continue;
            }
            if let Some(widget) = self.widgets.get(key) {
                pending.extend(widget.children.iter().copied());
            }
            reversed.push(key);
        }
        reversed.reverse();
        reversed
    }
}
