// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter for Understory View Tree.
//!
//! ## Feature
//!
//! Enable with `view_tree_adapter`.
//!
//! ## Notes
//!
//! [`Tree`] implements the host lookups directly, so a detector can own a tree:
//! `Detector::new(tree)`. Roles map one to one onto [`ViewKind`]; the
//! `INTERACTIVE`, `TOUCH_INSIDE` and `SCROLLING` flags answer the matching
//! queries. Stale ids are not views.

use kurbo::Point;
use understory_view_tree::{Tree, ViewFlags, ViewId, ViewRole};

use crate::types::{ParentLookup, Touch, TouchPhase, ViewKind, ViewLookup};

impl ParentLookup<ViewId> for Tree {
    fn parent_of(&self, node: &ViewId) -> Option<ViewId> {
        Self::parent_of(self, *node)
    }
}

impl ViewLookup<ViewId> for Tree {
    fn is_view(&self, node: &ViewId) -> bool {
        self.is_alive(*node)
    }

    fn kind(&self, node: &ViewId) -> ViewKind {
        match self.role(*node) {
            Some(ViewRole::Control) => ViewKind::Control,
            Some(ViewRole::ScrollView) => ViewKind::ScrollView,
            Some(ViewRole::Cell) => ViewKind::Cell,
            Some(ViewRole::View) | None => ViewKind::View,
        }
    }

    fn is_interaction_enabled(&self, node: &ViewId) -> bool {
        has_flag(self, *node, ViewFlags::INTERACTIVE)
    }

    fn is_touch_inside(&self, node: &ViewId) -> bool {
        has_flag(self, *node, ViewFlags::TOUCH_INSIDE)
    }

    fn is_scrolling(&self, node: &ViewId) -> bool {
        has_flag(self, *node, ViewFlags::SCROLLING)
    }

    fn contains_point(&self, node: &ViewId, location: Point) -> bool {
        self.contains_local_point(*node, location)
    }
}

fn has_flag(tree: &Tree, id: ViewId, flag: ViewFlags) -> bool {
    tree.flags(id).is_some_and(|f| f.contains(flag))
}

/// Build a touch for the topmost view under a world-space point.
///
/// The touch location is in the hit view's local coordinates. Returns `None`
/// if nothing visible and interactive is under the point.
pub fn touch_at_point(tree: &Tree, pt: Point, phase: TouchPhase) -> Option<Touch<ViewId>> {
    let hit = tree.hit_test_point(pt)?;
    Some(Touch {
        node: Some(hit.view),
        phase,
        location: hit.local_point,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use kurbo::Rect;
    use understory_view_tree::LocalView;

    use crate::detector::Detector;
    use crate::event::Event;
    use crate::trace::TraceSink;
    use crate::trigger::Trigger;

    fn view(frame: Rect, role: ViewRole) -> LocalView {
        LocalView {
            frame,
            role,
            ..Default::default()
        }
    }

    fn list() -> (Tree, ViewId, ViewId, ViewId, ViewId) {
        let mut tree = Tree::new();
        let list = tree.insert(
            None,
            view(Rect::new(0.0, 0.0, 320.0, 480.0), ViewRole::ScrollView),
        );
        let cell = tree.insert(
            Some(list),
            view(Rect::new(0.0, 44.0, 320.0, 88.0), ViewRole::Cell),
        );
        let label = tree.insert(
            Some(cell),
            view(Rect::new(16.0, 8.0, 200.0, 36.0), ViewRole::View),
        );
        let button = tree.insert(
            Some(cell),
            view(Rect::new(240.0, 8.0, 304.0, 36.0), ViewRole::Control),
        );
        (tree, list, cell, label, button)
    }

    #[test]
    fn lookups_follow_roles_and_flags() {
        let (mut tree, list, cell, label, button) = list();
        assert_eq!(ViewLookup::kind(&tree, &list), ViewKind::ScrollView);
        assert_eq!(ViewLookup::kind(&tree, &cell), ViewKind::Cell);
        assert_eq!(ViewLookup::kind(&tree, &label), ViewKind::View);
        assert_eq!(ViewLookup::kind(&tree, &button), ViewKind::Control);
        assert_eq!(tree.containing_cell(&label), Some(cell));
        assert_eq!(tree.containing_cell(&cell), Some(cell));
        assert_eq!(tree.containing_cell(&list), None);

        assert!(tree.is_interaction_enabled(&label));
        assert!(!tree.is_scrolling(&list));
        tree.set_flag(list, ViewFlags::SCROLLING, true);
        assert!(tree.is_scrolling(&list));

        tree.remove(button);
        assert!(!tree.is_view(&button));
        assert!(!tree.is_interaction_enabled(&button));
    }

    #[test]
    fn touch_at_point_localizes_to_hit_view() {
        let (tree, _, _, label, _) = list();
        let touch = touch_at_point(&tree, Point::new(20.0, 60.0), TouchPhase::Ended).unwrap();
        assert_eq!(touch.node, Some(label));
        assert_eq!(touch.location, Point::new(4.0, 8.0));
        assert!(touch_at_point(&tree, Point::new(400.0, 60.0), TouchPhase::Ended).is_none());
    }

    #[test]
    fn tapping_a_label_fires_the_cell_event() {
        let (tree, _, cell, _, _) = list();
        let taps = Rc::new(Cell::new(0));
        let mut detector = Detector::with_sink(tree, Rc::new(TraceSink::new()));
        let t = taps.clone();
        detector.attach(
            cell,
            vec![
                Event::new(Trigger::DID_END_TOUCH).with_action(move |_| t.set(t.get() + 1)),
            ],
        );

        let touch = touch_at_point(detector.views(), Point::new(20.0, 60.0), TouchPhase::Ended)
            .unwrap();
        assert!(detector.end_touch(&[touch]));
        assert_eq!(taps.get(), 1);
    }

    #[test]
    fn button_needs_touch_inside_flag() {
        let (tree, _, _, _, button) = list();
        let mut detector = Detector::with_sink(tree, Rc::new(TraceSink::new()));
        detector.attach(button, vec![Event::new(Trigger::DID_END_TOUCH)]);
        let touch = touch_at_point(detector.views(), Point::new(250.0, 60.0), TouchPhase::Ended)
            .unwrap();
        assert_eq!(touch.node, Some(button));

        assert!(!detector.end_touch(&[touch]));
        detector
            .views_mut()
            .set_flag(button, ViewFlags::TOUCH_INSIDE, true);
        assert!(detector.end_touch(&[touch]));
    }

    #[test]
    fn removed_views_are_skipped() {
        let (tree, _, cell, _, _) = list();
        let mut detector = Detector::with_sink(tree, Rc::new(TraceSink::new()));
        detector.attach(cell, vec![Event::new(Trigger::DID_APPEAR)]);
        assert!(detector.display([cell]));

        detector.views_mut().remove(cell);
        assert!(!detector.display([cell]));

        // The side table keeps the entry until the host purges it.
        assert!(detector.registry().contains(cell));
        detector.prune();
        assert!(detector.registry().is_empty());
    }
}
