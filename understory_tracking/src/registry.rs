// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry: a side table from node handles to their attached events.
//!
//! Nodes never have to cooperate: the host keeps its own per-node data and the
//! registry keeps the event lists, keyed by a stable `Copy + Eq + Hash` handle.
//!
//! An entry is either absent (never set, or cleared with `None`) or a list,
//! possibly empty. Writes replace the whole list; there is no way to remove a
//! single event.

use std::collections::HashMap;
use std::hash::Hash;

use crate::event::Event;

/// Per-node event lists.
#[derive(Clone, Debug)]
pub struct Registry<K> {
    entries: HashMap<K, Vec<Event>>,
}

impl<K> Default for Registry<K> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + Hash> Registry<K> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Duplicates of the events attached to `node`, or `None` if never set.
    pub fn get(&self, node: K) -> Option<Vec<Event>> {
        self.events(node)
            .map(|events| events.iter().map(Event::duplicate).collect())
    }

    /// Borrow the events attached to `node` without copying them.
    pub fn events(&self, node: K) -> Option<&[Event]> {
        self.entries.get(&node).map(Vec::as_slice)
    }

    /// Replace the events attached to `node`. `None` clears the entry.
    pub fn set(&mut self, node: K, events: Option<Vec<Event>>) {
        match events {
            Some(events) => {
                self.entries.insert(node, events);
            }
            None => {
                self.entries.remove(&node);
            }
        }
    }

    /// Clear the entry for `node`, returning what was attached.
    pub fn remove(&mut self, node: K) -> Option<Vec<Event>> {
        self.entries.remove(&node)
    }

    /// Returns `true` if `node` has an entry (possibly empty).
    pub fn contains(&self, node: K) -> bool {
        self.entries.contains_key(&node)
    }

    /// Number of nodes with an entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no node has an entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Keep only entries whose node satisfies `keep`.
    ///
    /// Hosts call this after destroying views so stale handles do not pin events.
    pub fn retain_nodes(&mut self, mut keep: impl FnMut(K) -> bool) {
        self.entries.retain(|node, _| keep(*node));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Action;
    use crate::trigger::Trigger;

    #[test]
    fn unset_node_is_absent() {
        let reg: Registry<u32> = Registry::new();
        assert!(reg.get(1).is_none());
        assert!(reg.events(1).is_none());
        assert!(!reg.contains(1));
        assert!(reg.is_empty());
    }

    #[test]
    fn set_and_get_preserve_order() {
        let mut reg = Registry::new();
        let a = Event::new(Trigger::DID_APPEAR).with_trace("a");
        let b = Event::new(Trigger::DID_END_TOUCH).with_trace("b");
        reg.set(7_u32, Some(vec![a.clone(), b.clone()]));
        assert_eq!(reg.get(7), Some(vec![a, b]));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn get_returns_equal_independent_copies() {
        let mut reg = Registry::new();
        let action = Action::new(|_| {});
        let e = Event::new(Trigger::DID_APPEAR).with_action_handle(action.clone());
        reg.set(1_u32, Some(vec![e.clone()]));

        let mut copy = reg.get(1).unwrap();
        assert_eq!(copy[0], e);
        assert_eq!(copy[0].action.as_ref(), Some(&action));
        copy[0].trace = Some("mutated".into());
        assert!(reg.events(1).unwrap()[0].trace.is_none());
    }

    #[test]
    fn empty_list_is_distinct_from_absent() {
        let mut reg = Registry::new();
        reg.set(1_u32, Some(Vec::new()));
        assert_eq!(reg.get(1), Some(Vec::new()));
        assert!(reg.contains(1));

        reg.set(1, None);
        assert!(reg.get(1).is_none());
        assert!(!reg.contains(1));
    }

    #[test]
    fn later_write_replaces_whole_list() {
        let mut reg = Registry::new();
        reg.set(
            1_u32,
            Some(vec![Event::new(Trigger::DID_APPEAR), Event::new(Trigger::DID_APPEAR)]),
        );
        let replacement = Event::new(Trigger::DID_DISAPPEAR);
        reg.set(1, Some(vec![replacement.clone()]));
        assert_eq!(reg.get(1), Some(vec![replacement]));
    }

    #[test]
    fn entries_are_node_local() {
        let mut reg = Registry::new();
        let e = Event::new(Trigger::DID_APPEAR);
        reg.set(1_u32, Some(vec![e.clone()]));
        reg.set(2, Some(vec![e.duplicate()]));
        reg.set(1, None);
        assert!(reg.get(1).is_none());
        assert_eq!(reg.get(2), Some(vec![e]));
    }

    #[test]
    fn remove_and_retain() {
        let mut reg = Registry::new();
        for n in 0_u32..6 {
            reg.set(n, Some(vec![Event::new(Trigger::NONE)]));
        }
        assert_eq!(reg.remove(0).map(|v| v.len()), Some(1));
        assert!(reg.remove(0).is_none());

        reg.retain_nodes(|n| n % 2 == 0);
        assert_eq!(reg.len(), 2);
        assert!(reg.contains(2) && reg.contains(4));

        reg.clear();
        assert!(reg.is_empty());
    }
}
