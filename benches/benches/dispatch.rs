// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::rc::Rc;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_tracking::adapters::view_tree::touch_at_point;
use understory_tracking::detector::Detector;
use understory_tracking::event::Event;
use understory_tracking::trace::TraceSink;
use understory_tracking::trigger::Trigger;
use understory_tracking::types::TouchPhase;
use understory_view_tree::{LocalView, Tree, ViewId, ViewRole};

const ROW_HEIGHT: f64 = 44.0;

/// A scrolling list of `n` cells, each holding a label.
fn gen_list(n: usize) -> (Tree, Vec<ViewId>, Vec<ViewId>) {
    let mut tree = Tree::new();
    let list = tree.insert(
        None,
        LocalView {
            frame: Rect::new(0.0, 0.0, 320.0, n as f64 * ROW_HEIGHT),
            role: ViewRole::ScrollView,
            ..Default::default()
        },
    );
    let mut cells = Vec::with_capacity(n);
    let mut labels = Vec::with_capacity(n);
    for i in 0..n {
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
        cells.push(cell);
        labels.push(label);
    }
    (tree, cells, labels)
}

/// Each cell carries `per_cell` events, only one of which is `didAppear`.
fn attach_events(detector: &mut Detector<ViewId, Tree>, cells: &[ViewId], per_cell: usize) {
    for &cell in cells {
        let mut events = Vec::with_capacity(per_cell);
        for i in 0..per_cell {
            let trigger = if i == per_cell / 2 {
                Trigger::DID_APPEAR
            } else if i % 2 == 0 {
                Trigger::DID_END_TOUCH
            } else {
                Trigger::custom(format!("custom{i}"))
            };
            events.push(Event::new(trigger).with_action(|at| {
                black_box(at);
            }));
        }
        detector.attach(cell, events);
    }
}

fn detector_for(n: usize, per_cell: usize) -> (Detector<ViewId, Tree>, Vec<ViewId>, Vec<ViewId>) {
    let (tree, cells, labels) = gen_list(n);
    let mut detector = Detector::with_sink(tree, Rc::new(TraceSink::new()));
    attach_events(&mut detector, &cells, per_cell);
    (detector, cells, labels)
}

fn bench_display(c: &mut Criterion) {
    let mut group = c.benchmark_group("display");
    for &n in &[16_usize, 256, 1024] {
        let (detector, cells, _) = detector_for(n, 8);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("display_n{}", n), |b| {
            b.iter(|| black_box(detector.display(cells.iter().copied())));
        });
    }
    for &per_cell in &[1_usize, 8, 64] {
        let (detector, cells, _) = detector_for(64, per_cell);
        group.bench_function(format!("filter_per_cell{}", per_cell), |b| {
            b.iter(|| black_box(detector.display(cells.iter().copied())));
        });
    }
    group.finish();
}

fn bench_touch(c: &mut Criterion) {
    let mut group = c.benchmark_group("touch");
    let (detector, _, labels) = detector_for(256, 8);

    group.bench_function("end_touch_cell_fallback", |b| {
        let pt = Point::new(30.0, 128.0 * ROW_HEIGHT + 20.0);
        let touch = touch_at_point(detector.views(), pt, TouchPhase::Ended);
        let touches: Vec<_> = touch.into_iter().collect();
        b.iter(|| black_box(detector.end_touch(&touches)));
    });

    group.bench_function("hit_test_then_end_touch", |b| {
        let mut i = 0_usize;
        b.iter(|| {
            i = (i + 37) % labels.len();
            let pt = Point::new(30.0, i as f64 * ROW_HEIGHT + 20.0);
            let touches: Vec<_> = touch_at_point(detector.views(), pt, TouchPhase::Ended)
                .into_iter()
                .collect();
            black_box(detector.end_touch(&touches))
        });
    });
    group.finish();
}

fn bench_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");
    group.bench_function("attach_1024x8", |b| {
        b.iter_batched(
            || gen_list(1024),
            |(tree, cells, _)| {
                let mut detector = Detector::with_sink(tree, Rc::new(TraceSink::new()));
                attach_events(&mut detector, &cells, 8);
                black_box(detector.registry().len())
            },
            BatchSize::LargeInput,
        );
    });
    group.bench_function("prune_after_removing_half", |b| {
        b.iter_batched(
            || {
                let (mut detector, cells, _) = detector_for(1024, 1);
                for cell in cells.iter().step_by(2) {
                    detector.views_mut().remove(*cell);
                }
                detector
            },
            |mut detector| {
                detector.prune();
                black_box(detector.registry().len())
            },
            BatchSize::LargeInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_display, bench_touch, bench_registry);
criterion_main!(benches);
