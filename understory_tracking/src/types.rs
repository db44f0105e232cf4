// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-facing types: view kinds, touches, and the lookups a host toolkit provides.
//!
//! ## Overview
//!
//! The [`Detector`](crate::detector::Detector) never inspects a view hierarchy
//! directly. It asks a [`ViewLookup`] about node handles `K` (an integer id, a
//! generational key, a pointer-identity wrapper, ...), and receives
//! [`Touch`] records from the host's touch delivery.

use kurbo::Point;

/// How a node takes part in interaction tracking.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum ViewKind {
    /// A plain view. A touch qualifies when its location lies inside the view.
    #[default]
    View,
    /// A control. A touch qualifies when the control reports "touch inside".
    Control,
    /// A scrolling container.
    ScrollView,
    /// A row or item container; touch-end dispatch falls back to it from its subviews.
    Cell,
}

/// Phase of a touch.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TouchPhase {
    /// A finger touched down.
    Began,
    /// A finger moved.
    Moved,
    /// A finger is down but has not moved.
    Stationary,
    /// A finger lifted.
    Ended,
    /// The system cancelled tracking.
    Cancelled,
}

/// A touch record as delivered by the host.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Touch<K> {
    /// Node the touch was delivered to, if any.
    pub node: Option<K>,
    /// Phase of the touch.
    pub phase: TouchPhase,
    /// Location in `node`'s local coordinates.
    pub location: Point,
}

impl<K> Touch<K> {
    /// A touch that ended on `node` at `location` (node-local).
    pub fn ended(node: K, location: Point) -> Self {
        Self {
            node: Some(node),
            phase: TouchPhase::Ended,
            location,
        }
    }
}

/// Look up the parent of a node.
///
/// Used to walk from a touched leaf up to its containing cell.
pub trait ParentLookup<K> {
    /// Returns the parent of `node`, or `None` if `node` is a root.
    fn parent_of(&self, node: &K) -> Option<K>;
}

/// Everything the detector needs to know about host views.
pub trait ViewLookup<K>: ParentLookup<K> {
    /// Returns `true` if `node` refers to a live view. Other handles are skipped.
    fn is_view(&self, node: &K) -> bool;

    /// Role of `node`.
    fn kind(&self, node: &K) -> ViewKind;

    /// Returns `true` if `node` accepts user interaction.
    fn is_interaction_enabled(&self, node: &K) -> bool;

    /// Returns `true` if the current touch on control `node` is inside its bounds.
    fn is_touch_inside(&self, node: &K) -> bool;

    /// Returns `true` if scroll container `node` is actively scrolling.
    fn is_scrolling(&self, node: &K) -> bool;

    /// Returns `true` if `location` (node-local) lies inside `node`.
    fn contains_point(&self, node: &K, location: Point) -> bool;

    /// Nearest cell containing `node`: `node` itself if it is a [`ViewKind::Cell`],
    /// otherwise its nearest cell ancestor.
    fn containing_cell(&self, node: &K) -> Option<K>
    where
        K: Copy,
    {
        let mut cur = Some(*node);
        while let Some(n) = cur {
            if self.kind(&n) == ViewKind::Cell {
                return Some(n);
            }
            cur = self.parent_of(&n);
        }
        None
    }
}

impl<K, T: ParentLookup<K> + ?Sized> ParentLookup<K> for &T {
    fn parent_of(&self, node: &K) -> Option<K> {
        (**self).parent_of(node)
    }
}

impl<K, T: ViewLookup<K> + ?Sized> ViewLookup<K> for &T {
    fn is_view(&self, node: &K) -> bool {
        (**self).is_view(node)
    }

    fn kind(&self, node: &K) -> ViewKind {
        (**self).kind(node)
    }

    fn is_interaction_enabled(&self, node: &K) -> bool {
        (**self).is_interaction_enabled(node)
    }

    fn is_touch_inside(&self, node: &K) -> bool {
        (**self).is_touch_inside(node)
    }

    fn is_scrolling(&self, node: &K) -> bool {
        (**self).is_scrolling(node)
    }

    fn contains_point(&self, node: &K, location: Point) -> bool {
        (**self).contains_point(node, location)
    }

    fn containing_cell(&self, node: &K) -> Option<K>
    where
        K: Copy,
    {
        (**self).containing_cell(node)
    }
}
