//! Local event listeners attached to widgets.

use std::collections::HashMap;
use std::rc::Rc;

use marionette_common::ObjectId;
use serde_json::Value;

use crate::WidgetKey;

/// Events that never need native delivery.
pub const LOCAL_EVENTS: &[&str] = &["dispose"];

/// An event delivered to a widget's listeners.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetEvent {
    pub target: WidgetKey,
    pub object_id: ObjectId,
    pub event: String,
    pub data: Value,
}

/// A listener callback. Listeners are compared by pointer, so the same
/// `Rc` passed to `on` must be passed to `off`.
pub type Listener = Rc<dyn Fn(&WidgetEvent)>;

struct Registration {
    listener: Listener,
    once: bool,
}

/// Listeners of one widget, grouped by event name in registration order.
#[derive(Default)]
pub struct Listeners {
    by_event: HashMap<String, Vec<Registration>>,
}

impl Listeners {
    /// Register a listener. Returns true if it is the first one for `event`.
    pub fn add(&mut self, event: &str, listener: Listener, once: bool) -> bool {
        let regs = self.by_event.entry(event.to_string()).or_default();
        let first = regs.is_empty();
        regs.push(Registration { listener, once });
        first
    }

    /// Remove every registration of `listener` for `event`. Returns true if
    /// that left `event` without listeners.
    pub fn remove(&mut self, event: &str, listener: &Listener) -> bool {
        let Some(regs) = self.by_event.get_mut(event) else {
            return false;
        };
        let before = regs.len();
        regs.retain(|r| !Rc::ptr_eq(&r.listener, listener));
        let removed = regs.len() != before;
        if regs.is_empty() {
            self.by_event.remove(event);
        }
        removed && !self.has(event)
    }

    /// Listeners to invoke for one dispatch of `event`. `once` registrations
    /// are dropped here. The flag is true when that left no listeners.
    pub fn take_dispatch(&mut self, event: &str) -> (Vec<Listener>, bool) {
        let Some(regs) = self.by_event.get_mut(event) else {
            return (Vec::new(), false);
        };
        let listeners: Vec<Listener> = regs.iter().map(|r| Rc::clone(&r.listener)).collect();
        let had_once = regs.iter().any(|r| r.once);
        regs.retain(|r| !r.once);
        let emptied = regs.is_empty();
        if emptied {
            self.by_event.remove(event);
        }
        (listeners, had_once && emptied)
    }

    pub fn has(&self, event: &str) -> bool {
        self.by_event.get(event).is_some_and(|regs| !regs.is_empty())
    }

    pub fn count(&self, event: &str) -> usize {
        self.by_event.get(event).map_or(0, Vec::len)
    }

    /// Event names that currently have listeners.
    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.by_event.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (event, regs) in &self.by_event {
            map.entry(event, &regs.len());
        }
        map.finish()
    }
}

pub(crate) fn is_local(event: &str) -> bool {
    LOCAL_EVENTS.contains(&event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn noop() -> Listener {
        Rc::new(|_: &WidgetEvent| {})
    }

    #[test]
    fn first_add_is_reported() {
        let mut listeners = Listeners::default();
        assert!(listeners.add("tap", noop(), false));
        assert!(!listeners.add("tap", noop(), false));
        assert_eq!(listeners.count("tap"), 2);
    }

    #[test]
    fn remove_by_pointer() {
        let mut listeners = Listeners::default();
        let a = noop();
        let b = noop();
        listeners.add("tap", Rc::clone(&a), false);
        listeners.add("tap", Rc::clone(&b), false);

        assert!(!listeners.remove("tap", &a));
        assert_eq!(listeners.count("tap"), 1);
        assert!(listeners.remove("tap", &b));
        assert!(!listeners.has("tap"));
    }

    #[test]
    fn removing_unknown_listener_reports_nothing() {
        let mut listeners = Listeners::default();
        assert!(!listeners.remove("tap", &noop()));
    }

    #[test]
    fn once_registrations_are_dropped_on_dispatch() {
        let hits = Rc::new(Cell::new(0));
        let counter = {
            let hits = Rc::clone(&hits);
            Rc::new(move |_: &WidgetEvent| hits.set(hits.get() + 1)) as Listener
        };
        let mut listeners = Listeners::default();
        listeners.add("tap", counter, true);

        let (first, emptied) = listeners.take_dispatch("tap");
        assert_eq!(first.len(), 1);
        assert!(emptied);

        let (second, emptied) = listeners.take_dispatch("tap");
        assert!(second.is_empty());
        assert!(!emptied);
    }

    #[test]
    fn dispose_is_local() {
        assert!(is_local("dispose"));
        assert!(!is_local("select"));
    }
}
