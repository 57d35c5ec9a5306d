use std::cell::RefCell;
use std::rc::Rc;

use marionette_bridge::{CallFilter, MemoryTransport, Operation, Properties};
use serde_json::{json, Value};

use super::*;
use crate::error::PropertyError;
use crate::events::{Listener, WidgetEvent};
use crate::native::NativeMessage;
use crate::types::{WidgetType, BUTTON, COMPOSITE, PAGE, TEXT_INPUT, TEXT_VIEW};

fn props(value: Value) -> Properties {
    value.as_object().cloned().unwrap_or_default()
}

fn ops(tree: &mut WidgetTree, filter: CallFilter) -> Vec<Operation> {
    tree.bridge_mut().calls(Some(&filter)).unwrap()
}

fn recorder() -> (Listener, Rc<RefCell<Vec<String>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let listener: Listener = Rc::new(move |e: &WidgetEvent| {
        sink.borrow_mut().push(format!("{}:{}", e.object_id, e.event));
    });
    (listener, seen)
}

fn no_numbers(
    widget_type: &WidgetType,
    property: &str,
    value: &Value,
) -> Result<Value, PropertyError> {
    if value.is_number() {
        return Err(PropertyError {
            type_name: widget_type.name.to_string(),
            property: property.to_string(),
            reason: "numbers are not allowed".into(),
        });
    }
    Ok(value.clone())
}

// -- Lifecycle --

#[test]
fn create_issues_create_without_local_attributes() {
    let mut tree = WidgetTree::new();
    let key = tree
        .create(&BUTTON, props(json!({"text": "OK", "id": "ok", "class": "a b"})))
        .unwrap();

    let widget = tree.get(key).unwrap();
    assert_eq!(widget.id(), Some("ok"));
    assert_eq!(widget.class_list(), ["a", "b"]);
    assert_eq!(widget.property("text"), Some(&json!("OK")));

    let creates = ops(&mut tree, CallFilter::new().op("create"));
    assert_eq!(creates.len(), 1);
    let Operation::Create { type_name, properties, .. } = &creates[0] else {
        panic!("expected a create");
    };
    assert_eq!(type_name, "Button");
    assert_eq!(properties, &props(json!({"text": "OK"})));
}

#[test]
fn lookup_resolves_object_ids() {
    let mut tree = WidgetTree::new();
    let key = tree.create(&TEXT_VIEW, Properties::new()).unwrap();
    let id = tree.object_id(key).unwrap().clone();
    assert_eq!(tree.lookup(&id), Some(key));

    tree.dispose(key).unwrap();
    assert_eq!(tree.lookup(&id), None);
}

#[test]
fn dispose_destroys_descendants_first() {
    let mut tree = WidgetTree::new();
    let page = tree.create(&PAGE, Properties::new()).unwrap();
    let row = tree.create(&COMPOSITE, Properties::new()).unwrap();
    let button = tree.create(&BUTTON, Properties::new()).unwrap();
    tree.append(page, &[row]).unwrap();
    tree.append(row, &[button]).unwrap();

    let expected: Vec<ObjectId> = [button, row, page]
        .iter()
        .map(|&k| tree.object_id(k).unwrap().clone())
        .collect();

    tree.dispose(page).unwrap();
    assert!(tree.is_empty());

    let destroyed: Vec<ObjectId> = ops(&mut tree, CallFilter::new().op("destroy"))
        .iter()
        .map(|op| op.id().clone())
        .collect();
    assert_eq!(destroyed, expected);
}

#[test]
fn dispose_unlinks_from_parent_without_a_set() {
    let mut tree = WidgetTree::new();
    let page = tree.create(&PAGE, Properties::new()).unwrap();
    let a = tree.create(&BUTTON, Properties::new()).unwrap();
    let b = tree.create(&BUTTON, Properties::new()).unwrap();
    tree.append(page, &[a, b]).unwrap();
    tree.bridge_mut().reset_calls().unwrap();

    tree.dispose(a).unwrap();
    assert_eq!(tree.get(page).unwrap().children(), [b]);
    assert!(ops(&mut tree, CallFilter::new().op("set")).is_empty());
}

#[test]
fn dispose_twice_fails() {
    let mut tree = WidgetTree::new();
    let key = tree.create(&BUTTON, Properties::new()).unwrap();
    tree.dispose(key).unwrap();
    assert!(matches!(tree.dispose(key), Err(WidgetError::Disposed(k)) if k == key));
    assert!(matches!(
        tree.set(key, "text", json!("x")),
        Err(WidgetError::Disposed(_))
    ));
}

#[test]
fn dispose_fires_local_listeners_without_listen() {
    let mut tree = WidgetTree::new();
    let page = tree.create(&PAGE, Properties::new()).unwrap();
    let button = tree.create(&BUTTON, Properties::new()).unwrap();
    tree.append(page, &[button]).unwrap();

    let (listener, seen) = recorder();
    tree.on(page, "dispose", Rc::clone(&listener)).unwrap();
    tree.on(button, "dispose", listener).unwrap();
    assert!(ops(&mut tree, CallFilter::new().op("listen")).is_empty());

    let page_id = tree.object_id(page).unwrap().to_string();
    let button_id = tree.object_id(button).unwrap().to_string();
    tree.dispose(page).unwrap();
    assert_eq!(
        *seen.borrow(),
        [format!("{button_id}:dispose"), format!("{page_id}:dispose")]
    );
}

// -- Hierarchy --

#[test]
fn append_links_and_sets_parent() {
    let mut tree = WidgetTree::new();
    let page = tree.create(&PAGE, Properties::new()).unwrap();
    let a = tree.create(&BUTTON, Properties::new()).unwrap();
    let b = tree.create(&TEXT_VIEW, Properties::new()).unwrap();
    tree.append(page, &[a, b]).unwrap();

    assert_eq!(tree.get(page).unwrap().children(), [a, b]);
    assert_eq!(tree.get(a).unwrap().parent(), Some(page));

    let page_id = tree.object_id(page).unwrap().to_string();
    let sets = ops(
        &mut tree,
        CallFilter::new()
            .op("set")
            .with("properties", json!({ "parent": page_id })),
    );
    assert_eq!(sets.len(), 2);
}

#[test]
fn append_moves_between_parents() {
    let mut tree = WidgetTree::new();
    let first = tree.create(&COMPOSITE, Properties::new()).unwrap();
    let second = tree.create(&COMPOSITE, Properties::new()).unwrap();
    let child = tree.create(&BUTTON, Properties::new()).unwrap();

    tree.append(first, &[child]).unwrap();
    tree.append(second, &[child]).unwrap();
    assert!(tree.get(first).unwrap().children().is_empty());
    assert_eq!(tree.get(second).unwrap().children(), [child]);
    assert_eq!(tree.get(child).unwrap().parent(), Some(second));
}

#[test]
fn append_rejects_leaf_parents_and_cycles() {
    let mut tree = WidgetTree::new();
    let outer = tree.create(&COMPOSITE, Properties::new()).unwrap();
    let inner = tree.create(&COMPOSITE, Properties::new()).unwrap();
    let button = tree.create(&BUTTON, Properties::new()).unwrap();
    tree.append(outer, &[inner]).unwrap();

    assert!(matches!(
        tree.append(button, &[inner]),
        Err(WidgetError::NotAComposite { .. })
    ));
    assert!(matches!(
        tree.append(inner, &[outer]),
        Err(WidgetError::Cycle { .. })
    ));
    assert!(matches!(
        tree.append(inner, &[inner]),
        Err(WidgetError::Cycle { .. })
    ));
    assert_eq!(tree.get(outer).unwrap().children(), [inner]);
}

#[test]
fn failed_append_changes_nothing() {
    let mut tree = WidgetTree::new();
    let page = tree.create(&PAGE, Properties::new()).unwrap();
    let a = tree.create(&BUTTON, Properties::new()).unwrap();
    let gone = tree.create(&BUTTON, Properties::new()).unwrap();
    tree.dispose(gone).unwrap();

    assert!(tree.append(page, &[a, gone]).is_err());
    assert!(tree.get(page).unwrap().children().is_empty());
    assert_eq!(tree.get(a).unwrap().parent(), None);
}

#[test]
fn detach_sets_null_parent() {
    let mut tree = WidgetTree::new();
    let page = tree.create(&PAGE, Properties::new()).unwrap();
    let a = tree.create(&BUTTON, Properties::new()).unwrap();
    tree.append(page, &[a]).unwrap();
    tree.bridge_mut().reset_calls().unwrap();

    tree.detach(a).unwrap();
    tree.detach(a).unwrap();
    assert_eq!(tree.get(a).unwrap().parent(), None);
    assert!(tree.get(page).unwrap().children().is_empty());

    let sets = ops(&mut tree, CallFilter::new().op("set"));
    assert_eq!(sets.len(), 1);
    let Operation::Set { properties, .. } = &sets[0] else {
        panic!("expected a set");
    };
    assert_eq!(properties["parent"], Value::Null);
}

#[test]
fn ancestors_walk_to_the_root() {
    let mut tree = WidgetTree::new();
    let page = tree.create(&PAGE, Properties::new()).unwrap();
    let row = tree.create(&COMPOSITE, Properties::new()).unwrap();
    let button = tree.create(&BUTTON, Properties::new()).unwrap();
    tree.append(page, &[row]).unwrap();
    tree.append(row, &[button]).unwrap();

    assert_eq!(tree.ancestors(button).collect::<Vec<_>>(), [row, page]);
    assert!(tree.is_ancestor(page, button));
    assert!(!tree.is_ancestor(button, page));
}

// -- Properties --

#[test]
fn set_caches_and_forwards() {
    let mut tree = WidgetTree::new();
    let key = tree.create(&BUTTON, Properties::new()).unwrap();
    tree.set(key, "text", json!("Go")).unwrap();

    assert_eq!(tree.get_property(key, "text").unwrap(), Some(json!("Go")));
    let id = tree.object_id(key).unwrap().clone();
    assert_eq!(
        tree.bridge_mut().properties(&id).unwrap(),
        props(json!({"text": "Go"}))
    );
}

#[test]
fn set_all_sends_one_set() {
    let mut tree = WidgetTree::new();
    let key = tree.create(&BUTTON, Properties::new()).unwrap();
    tree.set_all(key, props(json!({"text": "Go", "enabled": false, "class": "big"})))
        .unwrap();

    let sets = ops(&mut tree, CallFilter::new().op("set"));
    assert_eq!(sets.len(), 1);
    assert!(tree.get(key).unwrap().has_class("big"));
}

#[test]
fn local_attributes_stay_local() {
    let mut tree = WidgetTree::new();
    let key = tree.create(&BUTTON, Properties::new()).unwrap();
    tree.set(key, "id", json!("submit")).unwrap();
    tree.set(key, "class", json!("primary wide")).unwrap();

    assert!(ops(&mut tree, CallFilter::new().op("set")).is_empty());
    assert_eq!(tree.get_property(key, "id").unwrap(), Some(json!("submit")));
    assert_eq!(
        tree.get_property(key, "class").unwrap(),
        Some(json!("primary wide"))
    );
}

#[test]
fn invalid_local_attribute_is_rejected() {
    let mut tree = WidgetTree::new();
    let key = tree.create(&BUTTON, Properties::new()).unwrap();
    assert!(matches!(
        tree.set(key, "id", json!(5)),
        Err(WidgetError::Property(_))
    ));
    assert_eq!(tree.get(key).unwrap().id(), None);
}

#[test]
fn uncached_get_issues_bridge_get() {
    let mut tree = WidgetTree::new();
    let key = tree.create(&TEXT_INPUT, Properties::new()).unwrap();
    assert_eq!(tree.get_property(key, "text").unwrap(), None);

    let gets = ops(&mut tree, CallFilter::new().op("get").with("property", "text"));
    assert_eq!(gets.len(), 1);
}

#[test]
fn native_properties_fill_the_cache() {
    let mut tree = WidgetTree::new();
    let key = tree.create(&TEXT_VIEW, Properties::new()).unwrap();
    let id = tree.object_id(key).unwrap().clone();

    tree.receive(NativeMessage::Properties {
        id,
        properties: props(json!({"text": "hello"})),
    })
    .unwrap();
    assert_eq!(tree.get_property(key, "text").unwrap(), Some(json!("hello")));
    assert!(ops(&mut tree, CallFilter::new().op("get")).is_empty());
}

#[test]
fn rejected_value_changes_nothing() {
    let mut tree = WidgetTree::new().with_encoder(no_numbers);
    let key = tree.create(&BUTTON, props(json!({"text": "a"}))).unwrap();

    let err = tree
        .set_all(key, props(json!({"text": "b", "width": 10})))
        .unwrap_err();
    assert!(matches!(err, WidgetError::Property(ref e) if e.property == "width"));
    assert_eq!(tree.get(key).unwrap().property("text"), Some(&json!("a")));
    assert!(ops(&mut tree, CallFilter::new().op("set")).is_empty());

    assert!(tree.create(&BUTTON, props(json!({"width": 1}))).is_err());
    assert_eq!(tree.len(), 1);
}

#[test]
fn call_and_animate_forward_parameters() {
    let mut tree = WidgetTree::new();
    let key = tree.create(&BUTTON, Properties::new()).unwrap();
    tree.call(key, "focus", Properties::new()).unwrap();
    tree.animate(key, &props(json!({"opacity": 0.5})), &props(json!({"duration": 200})))
        .unwrap();

    let calls = ops(&mut tree, CallFilter::new().op("call"));
    assert_eq!(calls.len(), 2);
    let Operation::Call { method, parameters, .. } = &calls[1] else {
        panic!("expected a call");
    };
    assert_eq!(method, "animate");
    assert_eq!(parameters["properties"], json!({"opacity": 0.5}));
    assert_eq!(parameters["options"], json!({"duration": 200}));
}

// -- Events --

#[test]
fn first_and_last_listener_toggle_listen() {
    let mut tree = WidgetTree::new();
    let key = tree.create(&BUTTON, Properties::new()).unwrap();
    let (a, _) = recorder();
    let (b, _) = recorder();

    tree.on(key, "select", Rc::clone(&a)).unwrap();
    tree.on(key, "select", Rc::clone(&b)).unwrap();
    tree.off(key, "select", &a).unwrap();
    tree.off(key, "select", &b).unwrap();

    let listens: Vec<Value> = ops(&mut tree, CallFilter::new().op("listen"))
        .iter()
        .map(|op| op.to_wire()["listen"].clone())
        .collect();
    assert_eq!(listens, [json!(true), json!(false)]);
}

#[test]
fn once_listener_runs_once_and_unlistens() {
    let mut tree = WidgetTree::new();
    let key = tree.create(&BUTTON, Properties::new()).unwrap();
    let (listener, seen) = recorder();
    tree.once(key, "select", listener).unwrap();

    assert_eq!(tree.trigger(key, "select", Value::Null).unwrap(), 1);
    assert_eq!(tree.trigger(key, "select", Value::Null).unwrap(), 0);
    assert_eq!(seen.borrow().len(), 1);

    let listens = ops(&mut tree, CallFilter::new().op("listen"));
    assert_eq!(listens.len(), 2);
}

#[test]
fn native_events_reach_listeners() {
    let mut tree = WidgetTree::new();
    let key = tree.create(&BUTTON, Properties::new()).unwrap();
    let id = tree.object_id(key).unwrap().clone();

    let data = Rc::new(RefCell::new(Value::Null));
    let sink = Rc::clone(&data);
    tree.on(
        key,
        "select",
        Rc::new(move |e: &WidgetEvent| *sink.borrow_mut() = e.data.clone()),
    )
    .unwrap();

    let raw = format!(r#"{{"kind":"event","id":"{id}","event":"select","data":{{"x":1}}}}"#);
    tree.receive(NativeMessage::from_json(&raw).unwrap()).unwrap();
    assert_eq!(*data.borrow(), json!({"x": 1}));
}

#[test]
fn message_for_unknown_object_fails() {
    let mut tree = WidgetTree::new();
    let msg = NativeMessage::Event {
        id: ObjectId::new("$nope"),
        event: "select".into(),
        data: Value::Null,
    };
    assert!(matches!(tree.receive(msg), Err(WidgetError::UnknownObject(_))));
}

// -- Config and transport --

#[test]
fn config_threshold_drives_transport() {
    let mut config = MarionetteConfig::default();
    config.bridge.flush_threshold = 2;
    config.bridge.id_prefix = "w".into();
    let transport = MemoryTransport::new();
    let mut tree = WidgetTree::from_config(&config, transport.clone());

    let key = tree.create(&BUTTON, Properties::new()).unwrap();
    assert!(tree.object_id(key).unwrap().as_str().starts_with('w'));
    assert!(transport.batches().is_empty());

    tree.set(key, "text", json!("x")).unwrap();
    let batches = transport.take();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 2);
}

#[test]
fn children_of_disposed_key_is_empty() {
    let mut tree = WidgetTree::new();
    let key = tree.create(&PAGE, Properties::new()).unwrap();
    tree.dispose(key).unwrap();
    assert!(tree.children(key).is_empty());
}

struct BrokenPipe;

impl Transport for BrokenPipe {
    fn send(&mut self, _batch: &[Operation]) -> std::io::Result<()> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "host gone"))
    }
}

#[test]
fn transport_failure_still_yields_a_disposable_widget() {
    let mut bridge = Bridge::new().with_transport(BrokenPipe);
    bridge.set_flush_threshold(1);
    let mut tree = WidgetTree::with_bridge(bridge);

    let key = tree.create(&BUTTON, props(json!({"text": "a"}))).unwrap();
    assert_eq!(tree.len(), 1);
    let id = tree.object_id(key).unwrap().clone();
    assert!(tree.bridge().is_live(&id));

    tree.dispose(key).unwrap();
    assert!(!tree.bridge().is_live(&id));
    assert!(tree.bridge_mut().flush().is_err());
}

// -- Depth --

/// A single chain of composites `depth` levels deep, built bottom-up so
/// each append only checks a fresh parent. Returns (top, bottom).
fn deep_chain(tree: &mut WidgetTree, depth: usize) -> (WidgetKey, WidgetKey) {
    let bottom = tree.create(&COMPOSITE, Properties::new()).unwrap();
    let mut top = bottom;
    for _ in 1..depth {
        let parent = tree.create(&COMPOSITE, Properties::new()).unwrap();
        tree.append(parent, &[top]).unwrap();
        top = parent;
    }
    (top, bottom)
}

#[test]
fn deep_trees_are_searched_without_recursion() {
    let mut tree = WidgetTree::new();
    let (top, bottom) = deep_chain(&mut tree, 100_000);

    let found = tree.collection(top).find(&tree, None);
    assert_eq!(found.len(), 99_999);
    assert_eq!(found.last(&tree, None), Some(bottom));
}

#[test]
fn deep_trees_are_disposed_without_recursion() {
    let mut tree = WidgetTree::new();
    let (top, bottom) = deep_chain(&mut tree, 100_000);
    let bottom_id = tree.object_id(bottom).unwrap().clone();
    tree.bridge_mut().reset_calls().unwrap();

    tree.dispose(top).unwrap();
    assert!(tree.is_empty());

    let destroyed = ops(&mut tree, CallFilter::new().op("destroy"));
    assert_eq!(destroyed.len(), 100_000);
    assert_eq!(destroyed[0].id(), &bottom_id);
}
