// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_view_tree --heading-base-level=0

//! Understory View Tree: a small, Kurbo-native retained view hierarchy.
//!
//! It models the parts of a host UI toolkit that interaction tracking needs:
//!
//! - A hierarchy of views with frames in parent coordinates.
//! - A [`ViewRole`] per view (plain view, control, scroll container, list cell).
//! - [`ViewFlags`] for visibility, user interaction, control touch-inside state, and scrolling state.
//! - Point hit testing that returns the deepest, topmost interactive view and its root→target path.
//!
//! It does not lay out, render, or animate anything.
//! Upstream code positions views and toggles state flags; consumers such as
//! `understory_tracking` read them back.
//!
//! ## API overview
//!
//! - [`Tree`]: container managing views.
//! - [`LocalView`]: per-view local data (frame, role, flags).
//! - [`ViewId`]: generational handle of a view.
//!
//! Key operations:
//! - [`Tree::insert`] → [`ViewId`]
//! - [`Tree::set_frame`] / [`Tree::set_flag`] / [`Tree::set_role`]
//! - [`Tree::hit_test_point`] and [`Tree::to_local`] / [`Tree::contains_local_point`].
//!
//! ## Minimal usage
//!
//! ```
//! use understory_view_tree::{LocalView, Tree, ViewRole};
//! use kurbo::{Point, Rect};
//!
//! let mut tree = Tree::new();
//!
//! let list = tree.insert(
//!     None,
//!     LocalView { frame: Rect::new(0.0, 0.0, 320.0, 480.0), role: ViewRole::ScrollView, ..Default::default() },
//! );
//! let cell = tree.insert(
//!     Some(list),
//!     LocalView { frame: Rect::new(0.0, 44.0, 320.0, 88.0), role: ViewRole::Cell, ..Default::default() },
//! );
//! let label = tree.insert(
//!     Some(cell),
//!     LocalView { frame: Rect::new(16.0, 8.0, 200.0, 36.0), ..Default::default() },
//! );
//!
//! let hit = tree.hit_test_point(Point::new(20.0, 60.0)).unwrap();
//! assert_eq!(hit.view, label);
//! assert_eq!(hit.path, vec![list, cell, label]);
//! assert_eq!(hit.local_point, Point::new(4.0, 8.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::{Hit, Tree};
pub use types::{LocalView, ViewFlags, ViewId, ViewRole};
