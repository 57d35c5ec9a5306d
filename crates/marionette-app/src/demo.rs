//! Built-in demo: a tap counter.

use std::cell::RefCell;
use std::rc::Rc;

use marionette_widgets::{
    BulkError, LayoutNode, Listener, Selector, WidgetError, WidgetEvent, WidgetKey, WidgetTree,
};
use serde_json::json;
use tracing::{debug, info};

const LAYOUT: &str = r#"{
    "type": "Page",
    "id": "main",
    "properties": { "title": "Marionette" },
    "children": [
        { "type": "TextView", "id": "counter", "properties": { "text": "Taps: 0" } },
        { "type": "Composite", "class": "actions", "children": [
            { "type": "Button", "id": "increment", "class": "primary",
              "properties": { "text": "+" } },
            { "type": "Button", "id": "reset", "properties": { "text": "Reset" } }
        ]}
    ]
}"#;

pub fn layout() -> Result<LayoutNode, marionette_widgets::LayoutError> {
    LayoutNode::from_json(LAYOUT)
}

/// Listens for `select` on every button and keeps the counter label current.
pub struct Counter {
    label: Option<WidgetKey>,
    increment: Option<WidgetKey>,
    taps: u64,
    queue: Rc<RefCell<Vec<WidgetKey>>>,
}

impl Counter {
    /// Wire the counter into the tree below `root`. Layouts without the demo
    /// widgets simply have nothing to count.
    pub fn attach(tree: &mut WidgetTree, root: WidgetKey) -> Result<Self, BulkError> {
        let scope = tree.collection(root);
        let label = scope.find(tree, Some(&by_id("counter"))).first(tree, None);
        let increment = scope.find(tree, Some(&by_id("increment"))).first(tree, None);

        let queue = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&queue);
        let listener: Listener = Rc::new(move |e: &WidgetEvent| sink.borrow_mut().push(e.target));

        let buttons = scope.find(tree, Some(&Selector::ByTypeName("Button".into())));
        buttons.on(tree, "select", &listener)?;
        info!(buttons = buttons.len(), "demo counter attached");

        Ok(Self {
            label,
            increment,
            taps: 0,
            queue,
        })
    }

    /// Apply every button press queued since the last call.
    pub fn drain_events(&mut self, tree: &mut WidgetTree) -> Result<(), WidgetError> {
        let pressed: Vec<WidgetKey> = self.queue.borrow_mut().drain(..).collect();
        if pressed.is_empty() {
            return Ok(());
        }
        for key in pressed {
            if Some(key) == self.increment {
                self.taps += 1;
            } else {
                self.taps = 0;
            }
            debug!(taps = self.taps, "counter updated");
        }
        if let Some(label) = self.label {
            tree.set(label, "text", json!(format!("Taps: {}", self.taps)))?;
        }
        Ok(())
    }

    pub fn taps(&self) -> u64 {
        self.taps
    }
}

fn by_id(id: &str) -> Selector {
    Selector::ById(id.to_string())
}
