// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host callback glue: toolkit delegate callbacks mapped onto detector entry points.
//!
//! A toolkit integration forwards its list/collection, scroll, touch, control
//! and responder callbacks as [`HostCallback`] values to [`Detector::handle`]
//! instead of calling each entry point itself.
//!
//! ```
//! use kurbo::Point;
//! use understory_tracking::detector::Detector;
//! use understory_tracking::event::Event;
//! use understory_tracking::host::HostCallback;
//! use understory_tracking::trigger::Trigger;
//! use understory_tracking::types::{ParentLookup, ViewKind, ViewLookup};
//!
//! // A host where every id is an enabled plain view with no parent.
//! struct Flat;
//! impl ParentLookup<u32> for Flat {
//!     fn parent_of(&self, _: &u32) -> Option<u32> { None }
//! }
//! impl ViewLookup<u32> for Flat {
//!     fn is_view(&self, _: &u32) -> bool { true }
//!     fn kind(&self, _: &u32) -> ViewKind { ViewKind::View }
//!     fn is_interaction_enabled(&self, _: &u32) -> bool { true }
//!     fn is_touch_inside(&self, _: &u32) -> bool { false }
//!     fn is_scrolling(&self, _: &u32) -> bool { false }
//!     fn contains_point(&self, _: &u32, _: Point) -> bool { true }
//! }
//!
//! let mut detector = Detector::<u32, _>::new(Flat);
//! detector.attach(4, vec![Event::new(Trigger::TARGET_ACTION)]);
//!
//! assert!(detector.handle(HostCallback::DidSelectItem(Some(4))));
//! assert!(!detector.handle(HostCallback::WillDisplay(4)));
//! ```

use std::fmt;
use std::hash::Hash;

use tracing::trace;

use crate::detector::Detector;
use crate::types::{Touch, ViewLookup};

/// A toolkit callback relevant to interaction tracking.
#[derive(Clone, Debug, PartialEq)]
pub enum HostCallback<K> {
    /// A cell, header, footer or supplementary view is about to be displayed.
    WillDisplay(K),
    /// A cell, header, footer or supplementary view stopped being displayed.
    DidEndDisplaying(K),
    /// A row or item was selected. Carries its cell, if it is loaded.
    DidSelectItem(Option<K>),
    /// A scroll container is about to start dragging.
    WillBeginDragging(K),
    /// Touches ended on a tracked button or cell.
    TouchesEnded(Vec<Touch<K>>),
    /// A control's selected state turned on.
    Selected(K),
    /// A control's selected state turned off.
    Deselected(K),
    /// A view became first responder.
    BecameFirstResponder(K),
    /// A view resigned first responder.
    ResignedFirstResponder(K),
}

impl<K, V> Detector<K, V>
where
    K: Copy + Eq + Hash + fmt::Debug,
    V: ViewLookup<K>,
{
    /// Dispatch a toolkit callback to the matching entry point.
    ///
    /// Returns whatever that entry point returns.
    pub fn handle(&self, callback: HostCallback<K>) -> bool {
        trace!(?callback, "host callback");
        match callback {
            HostCallback::WillDisplay(node) => self.display(Some(node)),
            HostCallback::DidEndDisplaying(node) => self.end_display(Some(node)),
            HostCallback::DidSelectItem(cell) => self.target_action(cell),
            HostCallback::WillBeginDragging(container) => self.begin_scroll(Some(container)),
            HostCallback::TouchesEnded(touches) => self.end_touch(&touches),
            HostCallback::Selected(control) => self.select(Some(control)),
            HostCallback::Deselected(control) => self.deselect(Some(control)),
            HostCallback::BecameFirstResponder(node) => self.first_responder_gained(Some(node)),
            HostCallback::ResignedFirstResponder(node) => {
                self.first_responder_resigned(Some(node))
            }
        }
    }
}
