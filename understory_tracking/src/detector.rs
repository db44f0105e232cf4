// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Detector: resolves host interactions to attached events and fires them.
//!
//! ## Overview
//!
//! The host calls one entry point per interaction category. Each entry point
//! normalizes its argument into `(node, trigger)` pairs, applies the checks
//! that category requires, and then:
//!
//! 1. looks up the node's events in the [`Registry`],
//! 2. for [`Trigger::DID_END_TOUCH`], optionally retries once against the
//!    nearest containing cell, unless the node is that cell (see [`CellFallback`]),
//! 3. keeps the events whose trigger matches, in attachment order,
//! 4. fires every match and reports whether anything fired.
//!
//! ## Admissibility
//!
//! | Entry point | Trigger | Extra requirement |
//! |---|---|---|
//! | [`Detector::display`] | `didAppear` | none |
//! | [`Detector::end_display`] | `didDisappear` | none |
//! | [`Detector::begin_scroll`] | `didBeginScroll` | container is scrolling |
//! | [`Detector::end_touch`] | `didEndTouch` | first touch ended, interaction enabled, inside |
//! | [`Detector::first_responder_gained`] | `didBecomeFirstResponder` | none |
//! | [`Detector::first_responder_resigned`] | `didResignFirstResponder` | none |
//! | [`Detector::target_action`] | `targetAction` | none |
//! | [`Detector::select`] / [`Detector::deselect`] | `didSelect` / `didDeselect` | none |
//!
//! Every entry point also requires the node to be a live view. Nothing here
//! is an error: unknown nodes, empty input and failed checks all yield `false`.

use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::event::Event;
use crate::registry::Registry;
use crate::trace::TraceSink;
use crate::trigger::Trigger;
use crate::types::{Touch, TouchPhase, ViewKind, ViewLookup};

/// When a touch that ended on a node may be handled by its containing cell.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum CellFallback {
    /// Walk to the cell whenever the touched node has no matching event.
    #[default]
    WhenNoMatch,
    /// Walk to the cell only when the touched node has no entry at all.
    ///
    /// An explicitly empty list stops the walk.
    WhenAbsent,
    /// Never walk.
    Disabled,
}

/// Interaction dispatcher over a host view hierarchy.
///
/// ## Usage
///
/// - Construct with [`Detector::new`] to write traces to the thread's shared
///   [`TraceSink`], or [`Detector::with_sink`] to inject one.
/// - Attach events with [`Detector::attach`] or through [`Detector::registry_mut`].
/// - Call the entry points from the toolkit's callbacks, or translate them
///   into [`HostCallback`](crate::host::HostCallback)s and call
///   [`Detector::handle`].
pub struct Detector<K, V> {
    views: V,
    registry: Registry<K>,
    cell_fallback: CellFallback,
    sink: Rc<TraceSink>,
}

impl<K, V> fmt::Debug for Detector<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Detector")
            .field("cell_fallback", &self.cell_fallback)
            .field("sink", &self.sink)
            .finish_non_exhaustive()
    }
}

impl<K, V> Detector<K, V>
where
    K: Copy + Eq + Hash + fmt::Debug,
    V: ViewLookup<K>,
{
    /// Create a detector writing traces to [`TraceSink::shared`].
    pub fn new(views: V) -> Self {
        Self::with_sink(views, TraceSink::shared())
    }

    /// Create a detector writing traces to `sink`.
    pub fn with_sink(views: V, sink: Rc<TraceSink>) -> Self {
        Self {
            views,
            registry: Registry::new(),
            cell_fallback: CellFallback::default(),
            sink,
        }
    }

    /// Set the cell fallback policy for touch-end dispatch.
    pub fn set_cell_fallback(&mut self, policy: CellFallback) {
        self.cell_fallback = policy;
    }

    /// Current cell fallback policy.
    pub fn cell_fallback(&self) -> CellFallback {
        self.cell_fallback
    }

    /// The host view lookup.
    pub fn views(&self) -> &V {
        &self.views
    }

    /// Mutable access to the host view lookup.
    pub fn views_mut(&mut self) -> &mut V {
        &mut self.views
    }

    /// The event registry.
    pub fn registry(&self) -> &Registry<K> {
        &self.registry
    }

    /// Mutable access to the event registry.
    pub fn registry_mut(&mut self) -> &mut Registry<K> {
        &mut self.registry
    }

    /// The sink fired events trace to.
    pub fn sink(&self) -> &Rc<TraceSink> {
        &self.sink
    }

    /// Replace the events attached to `node`.
    pub fn attach(&mut self, node: K, events: Vec<Event>) {
        self.registry.set(node, Some(events));
    }

    /// Drop registry entries for handles that are no longer live views.
    pub fn prune(&mut self) {
        let views = &self.views;
        self.registry.retain_nodes(|node| views.is_view(&node));
    }

    /// Events that would fire for `trigger` on `node`, without firing them.
    ///
    /// Applies the cell fallback for touch-end but none of the entry-point checks.
    pub fn resolve(&self, node: K, trigger: &Trigger) -> Vec<Event> {
        let own = self.registry.events(node);
        let matches = matching(own, trigger);
        if *trigger != Trigger::DID_END_TOUCH {
            return matches;
        }
        let walk = match self.cell_fallback {
            CellFallback::WhenNoMatch => matches.is_empty(),
            CellFallback::WhenAbsent => own.is_none(),
            CellFallback::Disabled => false,
        };
        if !walk {
            return matches;
        }
        match self.views.containing_cell(&node) {
            Some(cell) if cell != node => {
                trace!(?node, ?cell, "touch falls back to containing cell");
                matching(self.registry.events(cell), trigger)
            }
            _ => matches,
        }
    }

    /// Fire the events attached to live view `node` for `trigger`.
    ///
    /// Works with application-defined triggers.
    pub fn fire(&self, node: K, trigger: Trigger) -> bool {
        self.notify(Some(node), trigger, |_, _| true)
    }

    /// Fire `events` in order. Returns `true` if any of them fired.
    pub fn send(&self, events: &[Event]) -> bool {
        let mut fired = false;
        for event in events {
            fired |= event.fire(&self.sink);
        }
        fired
    }

    /// Nodes appeared on screen.
    ///
    /// Handles that are not live views are skipped.
    pub fn display(&self, nodes: impl IntoIterator<Item = K>) -> bool {
        self.notify_each(nodes, &Trigger::DID_APPEAR)
    }

    /// Nodes disappeared from screen.
    pub fn end_display(&self, nodes: impl IntoIterator<Item = K>) -> bool {
        self.notify_each(nodes, &Trigger::DID_DISAPPEAR)
    }

    /// A scroll container began scrolling.
    pub fn begin_scroll(&self, container: Option<K>) -> bool {
        self.notify(container, Trigger::DID_BEGIN_SCROLL, |views, node| {
            views.is_scrolling(node)
        })
    }

    /// Touches ended. Only the first touch is considered.
    pub fn end_touch(&self, touches: &[Touch<K>]) -> bool {
        let Some(touch) = touches.first() else {
            return false;
        };
        if touch.phase != TouchPhase::Ended {
            trace!(phase = ?touch.phase, "touch has not ended");
            return false;
        }
        let location = touch.location;
        self.notify(touch.node, Trigger::DID_END_TOUCH, |views, node| {
            if !views.is_interaction_enabled(node) {
                return false;
            }
            match views.kind(node) {
                ViewKind::Control => views.is_touch_inside(node),
                _ => views.contains_point(node, location),
            }
        })
    }

    /// A view became first responder.
    pub fn first_responder_gained(&self, node: Option<K>) -> bool {
        self.notify(node, Trigger::DID_BECOME_FIRST_RESPONDER, |_, _| true)
    }

    /// A view resigned first responder.
    pub fn first_responder_resigned(&self, node: Option<K>) -> bool {
        self.notify(node, Trigger::DID_RESIGN_FIRST_RESPONDER, |_, _| true)
    }

    /// A control's target-action fired.
    pub fn target_action(&self, node: Option<K>) -> bool {
        self.notify(node, Trigger::TARGET_ACTION, |_, _| true)
    }

    /// A control was selected.
    pub fn select(&self, control: Option<K>) -> bool {
        self.notify(control, Trigger::DID_SELECT, |_, _| true)
    }

    /// A control was deselected.
    pub fn deselect(&self, control: Option<K>) -> bool {
        self.notify(control, Trigger::DID_DESELECT, |_, _| true)
    }

    fn notify_each(&self, nodes: impl IntoIterator<Item = K>, trigger: &Trigger) -> bool {
        let mut fired = false;
        for node in nodes {
            fired |= self.notify(Some(node), trigger.clone(), |_, _| true);
        }
        fired
    }

    fn notify(
        &self,
        node: Option<K>,
        trigger: Trigger,
        admit: impl FnOnce(&V, &K) -> bool,
    ) -> bool {
        let Some(node) = node else {
            trace!(%trigger, "no node");
            return false;
        };
        if !self.views.is_view(&node) {
            trace!(?node, %trigger, "not a live view");
            return false;
        }
        if !admit(&self.views, &node) {
            trace!(?node, %trigger, "rejected");
            return false;
        }
        let matches = self.resolve(node, &trigger);
        let fired = self.send(&matches);
        debug!(?node, %trigger, matched = matches.len(), fired, "dispatch");
        fired
    }
}

fn matching(events: Option<&[Event]>, trigger: &Trigger) -> Vec<Event> {
    events
        .into_iter()
        .flatten()
        .filter(|event| event.trigger == *trigger)
        .map(Event::duplicate)
        .collect()
}
