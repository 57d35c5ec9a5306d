//! Shallow and deep selection over the widget arena.

use std::collections::HashSet;

use crate::selector::Selector;
use crate::tree::WidgetTree;
use crate::WidgetKey;

/// Test exactly the given widgets. Dead keys never match; a widget already
/// matched in this call is skipped.
pub(crate) fn select_shallow(
    tree: &WidgetTree,
    keys: &[WidgetKey],
    selector: Option<&Selector>,
) -> Vec<WidgetKey> {
    let mut matched = HashSet::new();
    keys.iter()
        .copied()
        .filter(|&key| is_match(tree, key, selector) && matched.insert(key))
        .collect()
}

/// Pre-order depth-first search starting from the children of every input
/// (never the inputs themselves). Every visited widget is tested and its
/// children are always searched, matched or not. Each widget is visited at
/// most once per call, which both deduplicates results and stops on cycles.
/// The walk keeps its own stack, so tree depth is not bounded by the call
/// stack.
pub(crate) fn select_deep(
    tree: &WidgetTree,
    keys: &[WidgetKey],
    selector: Option<&Selector>,
) -> Vec<WidgetKey> {
    let mut visited = HashSet::new();
    let mut out = Vec::new();
    let mut stack = Vec::new();
    for &key in keys {
        let Some(widget) = tree.widgets.get(key) else {
            continue;
        };
        stack.extend(widget.children.iter().rev().copied());
        while let Some(key) = stack.pop() {
            if !visited.insert(key) {
                continue;
            }
            let Some(widget) = tree.widgets.get(key) else {
                continue;
            };
            if selector.map_or(true, |s| s.matches(widget)) {
                out.push(key);
            }
            stack.extend(widget.children.iter().rev().copied());
        }
    }
    out
}

pub(crate) fn is_match(tree: &WidgetTree, key: WidgetKey, selector: Option<&Selector>) -> bool {
    match tree.widgets.get(key) {
        Some(widget) => selector.map_or(true, |s| s.matches(widget)),
        None => false,
    }
}
