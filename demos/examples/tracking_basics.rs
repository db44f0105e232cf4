// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracking basics.
//!
//! Attaches events to a few hand-described views, installs a trace delegate,
//! and drives the detector through appear, tap, scroll and selection.
//!
//! Run:
//! - `cargo run -p understory_demos --example tracking_basics`

use std::collections::HashMap;
use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_tracking::detector::Detector;
use understory_tracking::event::Event;
use understory_tracking::trace::{TraceDelegate, TraceSink};
use understory_tracking::trigger::Trigger;
use understory_tracking::types::{ParentLookup, Touch, ViewKind, ViewLookup};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
struct Node(u32);

struct View {
    parent: Option<Node>,
    kind: ViewKind,
    bounds: Rect,
    touch_inside: bool,
    scrolling: bool,
}

struct Host(HashMap<Node, View>);

impl ParentLookup<Node> for Host {
    fn parent_of(&self, node: &Node) -> Option<Node> {
        self.0.get(node).and_then(|v| v.parent)
    }
}

impl ViewLookup<Node> for Host {
    fn is_view(&self, node: &Node) -> bool {
        self.0.contains_key(node)
    }
    fn kind(&self, node: &Node) -> ViewKind {
        self.0.get(node).map(|v| v.kind).unwrap_or_default()
    }
    fn is_interaction_enabled(&self, node: &Node) -> bool {
        self.0.contains_key(node)
    }
    fn is_touch_inside(&self, node: &Node) -> bool {
        self.0.get(node).is_some_and(|v| v.touch_inside)
    }
    fn is_scrolling(&self, node: &Node) -> bool {
        self.0.get(node).is_some_and(|v| v.scrolling)
    }
    fn contains_point(&self, node: &Node, location: Point) -> bool {
        self.0.get(node).is_some_and(|v| v.bounds.contains(location))
    }
}

/// Forwards traces to the "analytics backend" (stdout with a prefix).
struct Analytics;
impl TraceDelegate for Analytics {
    fn print(&self, trace: &str) {
        for line in trace.lines() {
            println!("  [analytics] {line}");
        }
    }
}

const LIST: Node = Node(1);
const ROW: Node = Node(2);
const TITLE: Node = Node(3);
const BUY: Node = Node(4);

fn view(parent: Option<Node>, kind: ViewKind) -> View {
    View {
        parent,
        kind,
        bounds: Rect::new(0.0, 0.0, 320.0, 44.0),
        touch_inside: false,
        scrolling: false,
    }
}

fn main() {
    let host = Host(HashMap::from([
        (LIST, view(None, ViewKind::ScrollView)),
        (ROW, view(Some(LIST), ViewKind::Cell)),
        (TITLE, view(Some(ROW), ViewKind::View)),
        (BUY, view(Some(ROW), ViewKind::Control)),
    ]));

    let sink = Rc::new(TraceSink::new());
    sink.set_delegate(Some(Rc::new(Analytics)));
    let mut detector = Detector::with_sink(host, sink);

    detector.attach(
        ROW,
        vec![
            Event::new(Trigger::DID_APPEAR).with_trace("row impression"),
            Event::new(Trigger::DID_END_TOUCH)
                .with_trace("row tapped")
                .with_action(|at| println!("  row action at {at:?}")),
        ],
    );
    detector.attach(
        BUY,
        vec![
            Event::new(Trigger::DID_END_TOUCH).with_trace("buy tapped"),
            Event::new(Trigger::DID_SELECT).with_action(|_| println!("  buy selected")),
        ],
    );
    detector.attach(
        LIST,
        vec![Event::new(Trigger::DID_BEGIN_SCROLL).with_trace("list scrolled")],
    );

    println!("== display(row) ==");
    println!("  fired: {}", detector.display([ROW]));

    println!("\n== tap on title (falls back to the row) ==");
    let tap = Touch::ended(TITLE, Point::new(10.0, 10.0));
    println!("  fired: {}", detector.end_touch(&[tap]));

    println!("\n== tap on buy, finger dragged outside ==");
    let tap = Touch::ended(BUY, Point::new(10.0, 10.0));
    println!("  fired: {}", detector.end_touch(&[tap]));

    println!("\n== tap on buy, finger inside ==");
    if let Some(buy) = detector.views_mut().0.get_mut(&BUY) {
        buy.touch_inside = true;
    }
    println!("  fired: {}", detector.end_touch(&[tap]));

    println!("\n== begin_scroll(list) before and after dragging ==");
    println!("  fired: {}", detector.begin_scroll(Some(LIST)));
    if let Some(list) = detector.views_mut().0.get_mut(&LIST) {
        list.scrolling = true;
    }
    println!("  fired: {}", detector.begin_scroll(Some(LIST)));

    println!("\n== select(buy) ==");
    println!("  fired: {}", detector.select(Some(BUY)));

    println!("\n== custom trigger with no events ==");
    println!(
        "  fired: {}",
        detector.fire(ROW, Trigger::new("didLongPress"))
    );
}
