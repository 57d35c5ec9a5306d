//! Seam to the property type system.
//!
//! The tree asks the encoder whether a value is well-formed before any
//! `create`, `set` or `animate` reaches the bridge. Value normalization
//! (colors, fonts, ...) lives behind this trait.

use serde_json::Value;

use crate::error::PropertyError;
use crate::types::WidgetType;

pub trait PropertyEncoder {
    /// Convert `value` to its wire form, or reject it.
    fn encode(
        &self,
        widget_type: &WidgetType,
        property: &str,
        value: &Value,
    ) -> Result<Value, PropertyError>;
}

/// Accepts every value unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughEncoder;

impl PropertyEncoder for PassthroughEncoder {
    fn encode(
        &self,
        _widget_type: &WidgetType,
        _property: &str,
        value: &Value,
    ) -> Result<Value, PropertyError> {
        Ok(value.clone())
    }
}

impl<F> PropertyEncoder for F
where
    F: Fn(&WidgetType, &str, &Value) -> Result<Value, PropertyError>,
{
    fn encode(
        &self,
        widget_type: &WidgetType,
        property: &str,
        value: &Value,
    ) -> Result<Value, PropertyError> {
        self(widget_type, property, value)
    }
}
