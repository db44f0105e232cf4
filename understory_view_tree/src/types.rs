// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the view tree: view identifiers, roles, flags, and local geometry.

use kurbo::Rect;

/// Identifier for a view in the tree.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `ViewId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `ViewId`.
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether a `ViewId` still refers to a live view.
/// Stale `ViewId`s never alias a different live view because the generation must match.
///
/// ## Notes
///
/// - The generation increments on slot reuse and never decreases.
/// - `u32` is ample for practical lifetimes; behavior on generation overflow is unspecified.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ViewId(pub(crate) u32, pub(crate) u32);

impl ViewId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

/// What a view is, as far as interaction tracking cares.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum ViewRole {
    /// A plain view. Touches are admitted by geometric containment.
    #[default]
    View,
    /// A control (button, switch, ...). Touches are admitted by its touch-inside state.
    Control,
    /// A scrolling container.
    ScrollView,
    /// A row or item container in a list or grid.
    Cell,
}

bitflags::bitflags! {
    /// View flags controlling visibility and interaction state.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ViewFlags: u8 {
        /// View is visible (participates in hit testing).
        const VISIBLE      = 0b0000_0001;
        /// View accepts user interaction.
        const INTERACTIVE  = 0b0000_0010;
        /// The current touch sequence on a control is inside its tracking bounds.
        const TOUCH_INSIDE = 0b0000_0100;
        /// A scroll container is actively tracking a drag.
        const SCROLLING    = 0b0000_1000;
    }
}

impl Default for ViewFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::INTERACTIVE
    }
}

/// Local description of a view.
#[derive(Clone, Debug, Default)]
pub struct LocalView {
    /// Frame in the parent's coordinate space. The view's own bounds are
    /// `(0, 0)` to `frame.size()`.
    pub frame: Rect,
    /// Role of the view.
    pub role: ViewRole,
    /// Visibility and interaction flags.
    pub flags: ViewFlags,
}
