//! Declarative widget layouts.
//!
//! A layout is a JSON tree of nodes:
//!
//! ```json
//! {
//!   "type": "Page",
//!   "id": "main",
//!   "children": [
//!     { "type": "Button", "class": "primary", "properties": { "text": "OK" } }
//!   ]
//! }
//! ```

use std::path::Path;

use marionette_bridge::Properties;
use marionette_common::MarionetteError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::error::WidgetError;
use crate::tree::WidgetTree;
use crate::types::WidgetType;
use crate::WidgetKey;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutNode {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Space-separated class names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    pub properties: Properties,
    pub children: Vec<LayoutNode>,
}

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("unknown widget type {0:?}")]
    UnknownType(String),

    #[error("{0} cannot hold children (not a composite)")]
    NotAComposite(String),

    #[error("failed to read layout: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid layout JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Widget(#[from] WidgetError),
}

impl From<LayoutError> for MarionetteError {
    fn from(err: LayoutError) -> Self {
        MarionetteError::Layout(err.to_string())
    }
}

impl LayoutNode {
    pub fn from_json(raw: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, LayoutError> {
        let raw = std::fs::read_to_string(path)?;
        let node = Self::from_json(&raw)?;
        info!(path = %path.display(), "layout loaded");
        Ok(node)
    }

    /// Number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(LayoutNode::node_count).sum::<usize>()
    }
}

/// Create every widget described by `node`, parents before children, and
/// return the key of the root.
///
/// The whole layout is checked before anything is created, so an unknown
/// type name or children under a leaf type leave the tree untouched.
pub fn build_layout(tree: &mut WidgetTree, node: &LayoutNode) -> Result<WidgetKey, LayoutError> {
    check_types(node)?;
    build_node(tree, node)
}

fn check_types(node: &LayoutNode) -> Result<(), LayoutError> {
    let widget_type = WidgetType::lookup(&node.type_name)
        .ok_or_else(|| LayoutError::UnknownType(node.type_name.clone()))?;
    if !widget_type.composite && !node.children.is_empty() {
        return Err(LayoutError::NotAComposite(node.type_name.clone()));
    }
    node.children.iter().try_for_each(check_types)
}

fn build_node(tree: &mut WidgetTree, node: &LayoutNode) -> Result<WidgetKey, LayoutError> {
    let widget_type = WidgetType::lookup(&node.type_name)
        .ok_or_else(|| LayoutError::UnknownType(node.type_name.clone()))?;

    let mut properties = node.properties.clone();
    if let Some(id) = &node.id {
        properties.insert("id".into(), Value::String(id.clone()));
    }
    if let Some(class) = &node.class {
        properties.insert("class".into(), Value::String(class.clone()));
    }
    let key = tree.create(widget_type, properties)?;

    let children = node
        .children
        .iter()
        .map(|child| build_node(tree, child))
        .collect::<Result<Vec<_>, _>>()?;
    if !children.is_empty() {
        tree.append(key, &children)?;
    }
    Ok(key)
}
