// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View tree → tracking adapter.
//!
//! Builds a small list with the view tree, attaches events to its cells, and
//! feeds host callbacks (display, hit-tested taps, selection) to the detector.
//!
//! Run:
//! - `cargo run -p understory_demos --example tracking_view_tree`

use std::cell::Cell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_tracking::adapters::view_tree::touch_at_point;
use understory_tracking::detector::Detector;
use understory_tracking::event::Event;
use understory_tracking::host::HostCallback;
use understory_tracking::trigger::Trigger;
use understory_tracking::types::TouchPhase;
use understory_view_tree::{LocalView, Tree, ViewFlags, ViewId, ViewRole};

const ROW_HEIGHT: f64 = 44.0;

fn main() {
    let mut tree = Tree::new();
    let list = tree.insert(
        None,
        LocalView {
            frame: Rect::new(0.0, 0.0, 320.0, 5.0 * ROW_HEIGHT),
            role: ViewRole::ScrollView,
            ..Default::default()
        },
    );
    let rows: Vec<(ViewId, ViewId)> = (0..5)
        .map(|i| {
            let y = i as f64 * ROW_HEIGHT;
            let cell = tree.insert(
                Some(list),
                LocalView {
                    frame: Rect::new(0.0, y, 320.0, y + ROW_HEIGHT),
                    role: ViewRole::Cell,
                    ..Default::default()
                },
            );
            let label = tree.insert(
                Some(cell),
                LocalView {
                    frame: Rect::new(16.0, 8.0, 240.0, 36.0),
                    ..Default::default()
                },
            );
            (cell, label)
        })
        .collect();

    let impressions = Rc::new(Cell::new(0_u32));
    let mut detector = Detector::new(tree);
    for (i, &(cell, _)) in rows.iter().enumerate() {
        let seen = impressions.clone();
        detector.attach(
            cell,
            vec![
                Event::new(Trigger::DID_APPEAR).with_action(move |_| seen.set(seen.get() + 1)),
                Event::new(Trigger::DID_END_TOUCH).with_trace(format!("row {i} tapped")),
                Event::new(Trigger::TARGET_ACTION).with_trace(format!("row {i} selected")),
            ],
        );
    }

    println!("== will display every row ==");
    for &(cell, _) in &rows {
        detector.handle(HostCallback::WillDisplay(cell));
    }
    println!("  impressions: {}", impressions.get());

    println!("\n== tap at (30, 100) ==");
    let pt = Point::new(30.0, 100.0);
    if let Some(touch) = touch_at_point(detector.views(), pt, TouchPhase::Ended) {
        println!("  hit {:?} at local {:?}", touch.node, touch.location);
        let fired = detector.handle(HostCallback::TouchesEnded(vec![touch]));
        println!("  fired: {fired}");
    }

    println!("\n== select row 3 ==");
    let fired = detector.handle(HostCallback::DidSelectItem(Some(rows[3].0)));
    println!("  fired: {fired}");

    println!("\n== disable the label in row 1 and tap it ==");
    let (row1, label1) = rows[1];
    detector
        .views_mut()
        .set_flag(label1, ViewFlags::INTERACTIVE, false);
    if let Some(touch) = touch_at_point(detector.views(), Point::new(30.0, 50.0), TouchPhase::Ended)
    {
        println!("  hit {:?} (row is {row1:?})", touch.node);
        println!(
            "  fired: {}",
            detector.handle(HostCallback::TouchesEnded(vec![touch]))
        );
    }

    println!("\n== remove row 4, then prune ==");
    detector.views_mut().remove(rows[4].0);
    println!("  entries before: {}", detector.registry().len());
    detector.prune();
    println!("  entries after: {}", detector.registry().len());
}
