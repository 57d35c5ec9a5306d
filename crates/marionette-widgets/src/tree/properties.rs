//! Property access and native method calls.

use marionette_bridge::Properties;
use serde_json::Value;

use crate::error::{PropertyError, WidgetError};
use crate::widget::Widget;
use crate::WidgetKey;

use super::WidgetTree;

/// Handle the attributes that live only on the proxy. Returns true if
/// `name` was one of them.
pub(super) fn apply_local(
    widget: &mut Widget,
    name: &str,
    value: &Value,
) -> Result<bool, PropertyError> {
    let type_name = widget.widget_type.name;
    let invalid = |reason: &str| PropertyError {
        type_name: type_name.to_string(),
        property: name.to_string(),
        reason: reason.to_string(),
    };
    match name {
        "id" => {
            widget.id = match value {
                Value::String(s) => Some(s.clone()),
                Value::Null => None,
                _ => return Err(invalid("expected a string or null")),
            };
            Ok(true)
        }
        "class" => {
            let Value::String(s) = value else {
                return Err(invalid("expected a space-separated string"));
            };
            widget.set_classes(s.split_whitespace());
            Ok(true)
        }
        _ => Ok(false),
    }
}

impl WidgetTree {
    /// Set one property. Local attributes (`id`, `class`) never reach the
    /// bridge; anything else is encoded, sent as a `set`, and cached.
    pub fn set(&mut self, key: WidgetKey, name: &str, value: Value) -> Result<(), WidgetError> {
        let mut props = Properties::new();
        props.insert(name.to_string(), value);
        self.set_all(key, props)
    }

    /// Set several properties with a single `set` operation.
    ///
    /// Every value is encoded before anything is sent, so a rejected value
    /// leaves both the proxy and the remote object unchanged.
    pub fn set_all(&mut self, key: WidgetKey, properties: Properties) -> Result<(), WidgetError> {
        let widget = self.widget(key)?;
        let widget_type = widget.widget_type;
        let object_id = widget.object_id.clone();

        let mut staged = Widget::new(object_id.clone(), widget_type);
        let (mut touched_id, mut touched_class) = (false, false);
        let mut wire = Properties::new();
        for (name, value) in &properties {
            if apply_local(&mut staged, name, value)? {
                touched_id |= name.as_str() == "id";
                touched_class |= name.as_str() == "class";
                continue;
            }
            let encoded = self.encoder.encode(widget_type, name, value)?;
            wire.insert(name.clone(), encoded);
        }

        let widget = self.widget_mut(key)?;
        if touched_id {
            widget.id = staged.id;
        }
        if touched_class {
            widget.classes = staged.classes;
        }

        if wire.is_empty() {
            return Ok(());
        }
        for (name, value) in &wire {
            widget.properties.insert(name.clone(), value.clone());
        }
        self.bridge.set(&object_id, wire)?;
        Ok(())
    }

    /// Read a property.
    ///
    /// Local attributes and cached values answer immediately. Otherwise a
    /// `get` is issued and `None` returned; the native answer arrives later
    /// as a `NativeMessage::Properties` and fills the cache.
    pub fn get_property(
        &mut self,
        key: WidgetKey,
        name: &str,
    ) -> Result<Option<Value>, WidgetError> {
        let widget = self.widget(key)?;
        match name {
            "id" => return Ok(widget.id.clone().map(Value::String)),
            "class" => return Ok(Some(Value::String(widget.classes.join(" ")))),
            _ => {}
        }
        if let Some(value) = widget.properties.get(name) {
            return Ok(Some(value.clone()));
        }
        let object_id = widget.object_id.clone();
        self.bridge.get(&object_id, name)?;
        Ok(None)
    }

    pub fn add_class(&mut self, key: WidgetKey, class: &str) -> Result<bool, WidgetError> {
        Ok(self.widget_mut(key)?.add_class(class))
    }

    pub fn remove_class(&mut self, key: WidgetKey, class: &str) -> Result<bool, WidgetError> {
        Ok(self.widget_mut(key)?.remove_class(class))
    }

    /// Invoke a native method on the widget.
    pub fn call(
        &mut self,
        key: WidgetKey,
        method: &str,
        parameters: Properties,
    ) -> Result<(), WidgetError> {
        let object_id = self.widget(key)?.object_id.clone();
        self.bridge.call(&object_id, method, parameters)?;
        Ok(())
    }

    /// Animate properties on the native side. Target values are encoded like
    /// any other property value; `options` (duration, easing, ...) pass
    /// through untouched.
    pub fn animate(
        &mut self,
        key: WidgetKey,
        properties: &Properties,
        options: &Properties,
    ) -> Result<(), WidgetError> {
        let widget_type = self.widget(key)?.widget_type;
        let mut targets = Properties::new();
        for (name, value) in properties {
            targets.insert(name.clone(), self.encoder.encode(widget_type, name, value)?);
        }

        let mut parameters = Properties::new();
        parameters.insert("properties".into(), Value::Object(targets));
        parameters.insert("options".into(), Value::Object(options.clone()));
        self.call(key, "animate", parameters)
    }

    /// Record property values reported by the native side. Nothing is sent.
    pub(crate) fn apply_native_properties(
        &mut self,
        key: WidgetKey,
        properties: Properties,
    ) -> Result<(), WidgetError> {
        let widget = self.widget_mut(key)?;
        for (name, value) in properties {
            widget.properties.insert(name, value);
        }
        Ok(())
    }
}
