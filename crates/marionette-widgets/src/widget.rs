use marionette_bridge::Properties;
use marionette_common::ObjectId;
use serde_json::Value;

use crate::events::Listeners;
use crate::types::WidgetType;
use crate::WidgetKey;

/// Local proxy state of one remote widget, stored in the tree's arena.
///
/// The parent is an arena key, never an owning pointer: once the parent is
/// disposed its key no longer resolves.
#[derive(Debug)]
pub struct Widget {
    pub(crate) object_id: ObjectId,
    pub(crate) widget_type: &'static WidgetType,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    /// Last known values, from local `set`s or native updates.
    pub(crate) properties: Properties,
    pub(crate) parent: Option<WidgetKey>,
    pub(crate) children: Vec<WidgetKey>,
    pub(crate) listeners: Listeners,
}

impl Widget {
    pub(crate) fn new(object_id: ObjectId, widget_type: &'static WidgetType) -> Self {
        Self {
            object_id,
            widget_type,
            id: None,
            classes: Vec::new(),
            properties: Properties::new(),
            parent: None,
            children: Vec::new(),
            listeners: Listeners::default(),
        }
    }

    pub fn object_id(&self) -> &ObjectId {
        &self.object_id
    }

    pub fn widget_type(&self) -> &'static WidgetType {
        self.widget_type
    }

    pub fn type_name(&self) -> &'static str {
        self.widget_type.name
    }

    /// The `id` attribute used by `#id` selectors.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn class_list(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn parent(&self) -> Option<WidgetKey> {
        self.parent
    }

    pub fn children(&self) -> &[WidgetKey] {
        &self.children
    }

    /// Cached value of a property, if one is known locally.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    /// Replace the class list, dropping duplicates but keeping first-seen order.
    pub(crate) fn set_classes<'a>(&mut self, classes: impl IntoIterator<Item = &'a str>) {
        self.classes.clear();
        for class in classes {
            self.add_class(class);
        }
    }

    pub(crate) fn add_class(&mut self, class: &str) -> bool {
        if class.is_empty() || self.has_class(class) {
            return false;
        }
        self.classes.push(class.to_string());
        true
    }

    pub(crate) fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        before != self.classes.len()
    }
}
