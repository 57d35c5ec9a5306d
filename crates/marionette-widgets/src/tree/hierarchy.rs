//! Parent/child links.

use marionette_bridge::Properties;
use serde_json::Value;
use tracing::debug;

use crate::error::WidgetError;
use crate::WidgetKey;

use super::WidgetTree;

impl WidgetTree {
    /// Append `children` to `parent`, in order, moving each away from any
    /// previous parent. Every child gets a `set` of its new `parent`.
    ///
    /// All children are checked before anything changes, so a failing call
    /// leaves the tree untouched.
    pub fn append(&mut self, parent: WidgetKey, children: &[WidgetKey]) -> Result<(), WidgetError> {
        let parent_widget = self.widget(parent)?;
        if !parent_widget.widget_type.composite {
            return Err(WidgetError::NotAComposite {
                parent: parent_widget.object_id.clone(),
                type_name: parent_widget.widget_type.name.to_string(),
            });
        }
        let parent_id = parent_widget.object_id.clone();

        for &child in children {
            let child_id = self.widget(child)?.object_id.clone();
            if child == parent || self.is_ancestor(child, parent) {
                return Err(WidgetError::Cycle {
                    parent: parent_id,
                    child: child_id,
                });
            }
        }

        for &child in children {
            self.unlink(child);
            self.widget_mut(child)?.parent = Some(parent);
            self.widget_mut(parent)?.children.push(child);

            let child_id = self.widget(child)?.object_id.clone();
            let mut props = Properties::new();
            props.insert("parent".into(), Value::String(parent_id.to_string()));
            self.bridge.set(&child_id, props)?;
            debug!(child = %child_id, parent = %parent_id, "widget appended");
        }
        Ok(())
    }

    /// Remove a widget from its parent's children.
    pub fn detach(&mut self, key: WidgetKey) -> Result<(), WidgetError> {
        let widget = self.widget(key)?;
        if widget.parent.is_none() {
            return Ok(());
        }
        let object_id = widget.object_id.clone();
        self.unlink(key);

        let mut props = Properties::new();
        props.insert("parent".into(), Value::Null);
        self.bridge.set(&object_id, props)?;
        Ok(())
    }

    /// True if `ancestor` is on the parent chain of `key`.
    pub fn is_ancestor(&self, ancestor: WidgetKey, key: WidgetKey) -> bool {
        self.ancestors(key).any(|k| k == ancestor)
    }

    /// Parents of `key`, nearest first.
    pub fn ancestors(&self, key: WidgetKey) -> impl Iterator<Item = WidgetKey> + '_ {
        let mut steps = 0;
        let limit = self.widgets.len();
        std::iter::successors(self.widgets.get(key).and_then(|w| w.parent), move |&k| {
            steps += 1;
            if steps > limit {
                return None;
            }
            self.widgets.get(k).and_then(|w| w.parent)
        })
    }

    /// Drop the link between `key` and its parent without telling the
    /// native side.
    pub(crate) fn unlink(&mut self, key: WidgetKey) {
        let Some(parent) = self.widgets.get_mut(key).and_then(|w| w.parent.take()) else {
            return;
        };
        if let Some(parent_widget) = self.widgets.get_mut(parent) {
            parent_widget.children.retain(|&c| c != key);
        }
    }
}
