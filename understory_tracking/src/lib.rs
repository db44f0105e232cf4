// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tracking --heading-base-level=0

//! Understory Tracking: declarative interaction tracking for UI.
//!
//! ## Overview
//!
//! Views declare lightweight [`Event`](crate::event::Event)s: a [`Trigger`](crate::trigger::Trigger),
//! an optional action callback, optional trace text, and an identifier.
//! A [`Detector`](crate::detector::Detector) sits between the host toolkit's callbacks and those events.
//! When the host reports that a view appeared, a touch ended, a scroll began, and so on, the detector
//! finds the events attached to that view whose trigger matches and fires them in attachment order.
//!
//! The crate does not own a view hierarchy.
//! Hosts describe theirs through [`ViewLookup`](crate::types::ViewLookup) and
//! [`ParentLookup`](crate::types::ParentLookup), keyed by any `Copy + Eq + Hash` handle.
//! Events live in a side table, the [`Registry`](crate::registry::Registry), so attaching them never touches host data.
//!
//! ## Dispatch
//!
//! - Matching is by trigger equality; application-defined triggers work without changes to the detector.
//! - A touch that ends on a view with no matching event may be handled by the nearest containing cell.
//!   See [`CellFallback`](crate::detector::CellFallback).
//! - Every entry point returns `true` when at least one event fired. Unknown nodes, empty input,
//!   and failed preconditions all return `false`; there are no errors.
//!
//! ## Tracing
//!
//! An event with trace text writes its description to a [`TraceSink`](crate::trace::TraceSink)
//! after its action has run. Install a [`TraceDelegate`](crate::trace::TraceDelegate) to route that text
//! into an analytics pipeline; without one, debug builds print it to standard output.
//! Dispatch decisions are also logged through `tracing` at `debug` and `trace` level.
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use kurbo::Point;
//! use understory_tracking::detector::Detector;
//! use understory_tracking::event::Event;
//! use understory_tracking::trigger::Trigger;
//! use understory_tracking::types::{ParentLookup, Touch, ViewKind, ViewLookup};
//!
//! // Node 1 is a list cell; node 2 is a label inside it.
//! struct Host;
//! impl ParentLookup<u32> for Host {
//!     fn parent_of(&self, node: &u32) -> Option<u32> {
//!         (*node == 2).then_some(1)
//!     }
//! }
//! impl ViewLookup<u32> for Host {
//!     fn is_view(&self, node: &u32) -> bool { matches!(node, 1 | 2) }
//!     fn kind(&self, node: &u32) -> ViewKind {
//!         if *node == 1 { ViewKind::Cell } else { ViewKind::View }
//!     }
//!     fn is_interaction_enabled(&self, _: &u32) -> bool { true }
//!     fn is_touch_inside(&self, _: &u32) -> bool { false }
//!     fn is_scrolling(&self, _: &u32) -> bool { false }
//!     fn contains_point(&self, _: &u32, p: Point) -> bool { p.x >= 0.0 && p.y >= 0.0 }
//! }
//!
//! let taps = Rc::new(Cell::new(0));
//! let counter = taps.clone();
//!
//! let mut detector = Detector::<u32, _>::new(Host);
//! detector.attach(
//!     1,
//!     vec![Event::new(Trigger::DID_END_TOUCH)
//!         .with_trace("row tapped")
//!         .with_action(move |_| counter.set(counter.get() + 1))],
//! );
//!
//! // The label has no events of its own, so its cell handles the tap.
//! assert!(detector.end_touch(&[Touch::ended(2, Point::new(4.0, 4.0))]));
//! assert_eq!(taps.get(), 1);
//! ```
//!
//! ## Features
//!
//! - `view_tree_adapter`: implements the host lookups for `understory_view_tree::Tree`
//!   and adds `adapters::view_tree::touch_at_point` for building touches from hit tests.

pub mod adapters;
pub mod detector;
pub mod event;
pub mod host;
pub mod registry;
pub mod trace;
pub mod trigger;
pub mod types;
