//! Snapshot collections of widgets.
//!
//! A `WidgetCollection` is an ordered list of widget keys taken at the time
//! of a selection. Later tree mutations do not change it; members disposed
//! since then simply stop matching and fail bulk operations.

use std::collections::HashSet;
use std::ops::Index;

use marionette_bridge::Properties;
use serde_json::Value;

use crate::error::{BulkError, WidgetError};
use crate::events::Listener;
use crate::query::{is_match, select_deep, select_shallow};
use crate::selector::Selector;
use crate::tree::WidgetTree;
use crate::WidgetKey;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetCollection {
    keys: Vec<WidgetKey>,
}

impl WidgetCollection {
    /// Build a collection, dropping repeated keys but keeping first-seen order.
    pub fn from_keys(keys: impl IntoIterator<Item = WidgetKey>) -> Self {
        let mut seen = HashSet::new();
        Self {
            keys: keys.into_iter().filter(|k| seen.insert(*k)).collect(),
        }
    }

    /// Shallow selection over `keys`.
    pub fn select(tree: &WidgetTree, keys: &[WidgetKey], selector: Option<&Selector>) -> Self {
        Self {
            keys: select_shallow(tree, keys, selector),
        }
    }

    // -- Snapshot access --

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<WidgetKey> {
        self.keys.get(index).copied()
    }

    pub fn keys(&self) -> &[WidgetKey] {
        &self.keys
    }

    pub fn contains(&self, key: WidgetKey) -> bool {
        self.keys.contains(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = WidgetKey> + '_ {
        self.keys.iter().copied()
    }

    // -- Selection --

    /// First member, or first member matching `selector`.
    pub fn first(&self, tree: &WidgetTree, selector: Option<&Selector>) -> Option<WidgetKey> {
        match selector {
            None => self.keys.first().copied(),
            Some(_) => self
                .keys
                .iter()
                .copied()
                .find(|&k| is_match(tree, k, selector)),
        }
    }

    /// Last member, or last member matching `selector`.
    pub fn last(&self, tree: &WidgetTree, selector: Option<&Selector>) -> Option<WidgetKey> {
        match selector {
            None => self.keys.last().copied(),
            Some(_) => self
                .keys
                .iter()
                .rev()
                .copied()
                .find(|&k| is_match(tree, k, selector)),
        }
    }

    /// Members matching `selector`, without descending.
    pub fn filter(&self, tree: &WidgetTree, selector: &Selector) -> Self {
        Self::select(tree, &self.keys, Some(selector))
    }

    /// Distinct parents of the members, in discovery order. `None` when no
    /// member has a live parent.
    pub fn parent(&self, tree: &WidgetTree) -> Option<Self> {
        let parents = Self::from_keys(
            self.keys
                .iter()
                .filter_map(|&k| tree.get(k).and_then(|w| w.parent()))
                .filter(|&p| tree.contains(p)),
        );
        if parents.is_empty() {
            None
        } else {
            Some(parents)
        }
    }

    /// Every member's children, concatenated in member order, then filtered.
    ///
    /// Unlike other selections this does not deduplicate: a child shared by
    /// two members appears twice.
    pub fn children(&self, tree: &WidgetTree, selector: Option<&Selector>) -> Self {
        let keys = self
            .keys
            .iter()
            .filter_map(|&k| tree.get(k))
            .flat_map(|w| w.children().iter().copied())
            .filter(|&k| is_match(tree, k, selector))
            .collect();
        Self { keys }
    }

    /// Deep search below the members.
    pub fn find(&self, tree: &WidgetTree, selector: Option<&Selector>) -> Self {
        Self {
            keys: select_deep(tree, &self.keys, selector),
        }
    }

    /// Append every member to `parent`, in collection order.
    pub fn append_to(&self, tree: &mut WidgetTree, parent: WidgetKey) -> Result<(), WidgetError> {
        tree.append(parent, &self.keys)
    }

    // -- Bulk dispatch --

    /// Set a property on every member.
    pub fn set(&self, tree: &mut WidgetTree, name: &str, value: Value) -> Result<&Self, BulkError> {
        self.each(|key| tree.set(key, name, value.clone()))?;
        Ok(self)
    }

    pub fn on(
        &self,
        tree: &mut WidgetTree,
        event: &str,
        listener: &Listener,
    ) -> Result<&Self, BulkError> {
        self.each(|key| tree.on(key, event, Listener::clone(listener)))?;
        Ok(self)
    }

    pub fn once(
        &self,
        tree: &mut WidgetTree,
        event: &str,
        listener: &Listener,
    ) -> Result<&Self, BulkError> {
        self.each(|key| tree.once(key, event, Listener::clone(listener)))?;
        Ok(self)
    }

    pub fn off(
        &self,
        tree: &mut WidgetTree,
        event: &str,
        listener: &Listener,
    ) -> Result<&Self, BulkError> {
        self.each(|key| tree.off(key, event, listener))?;
        Ok(self)
    }

    pub fn trigger(
        &self,
        tree: &mut WidgetTree,
        event: &str,
        data: Value,
    ) -> Result<&Self, BulkError> {
        self.each(|key| tree.trigger(key, event, data.clone()).map(|_| ()))?;
        Ok(self)
    }

    pub fn animate(
        &self,
        tree: &mut WidgetTree,
        properties: &Properties,
        options: &Properties,
    ) -> Result<(), BulkError> {
        self.each(|key| tree.animate(key, properties, options))
    }

    /// Dispose every member still alive at its turn. Members already taken
    /// down with an ancestor earlier in the same call are skipped.
    pub fn dispose(&self, tree: &mut WidgetTree) -> Result<(), BulkError> {
        self.each(|key| {
            if tree.contains(key) {
                tree.dispose(key)
            } else {
                Ok(())
            }
        })
    }

    /// Run `op` on every member in order, collecting failures instead of
    /// stopping at the first.
    fn each(
        &self,
        mut op: impl FnMut(WidgetKey) -> Result<(), WidgetError>,
    ) -> Result<(), BulkError> {
        let failures = self
            .keys
            .iter()
            .filter_map(|&key| op(key).err().map(|e| (key, e)))
            .collect();
        BulkError::check(self.keys.len(), failures)
    }
}

impl Index<usize> for WidgetCollection {
    type Output = WidgetKey;

    fn index(&self, index: usize) -> &WidgetKey {
        &self.keys[index]
    }
}

impl IntoIterator for WidgetCollection {
    type Item = WidgetKey;
    type IntoIter = std::vec::IntoIter<WidgetKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter()
    }
}

impl<'a> IntoIterator for &'a WidgetCollection {
    type Item = WidgetKey;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, WidgetKey>>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter().copied()
    }
}

impl FromIterator<WidgetKey> for WidgetCollection {
    fn from_iter<I: IntoIterator<Item = WidgetKey>>(iter: I) -> Self {
        Self::from_keys(iter)
    }
}
