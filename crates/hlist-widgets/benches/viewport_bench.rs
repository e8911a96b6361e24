//! Benchmarks for pool remapping and selection bookkeeping.
//!
//! Run with: cargo bench -p hlist-widgets

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use hlist_widgets::{PoolBinding, RecyclingViewport, SelectionModel, SelectionSet, ViewportLayout};
use std::hint::black_box;

const ROWS: usize = 1_000_000;

fn layout(viewport_width: u32) -> ViewportLayout {
    ViewportLayout {
        column_width: 22,
        viewport_width,
        viewport_height: 40,
        min_content_width: 0,
    }
}

fn laid_out(viewport_width: u32, selection: &SelectionSet) -> RecyclingViewport {
    let mut vp = RecyclingViewport::new();
    vp.layout(layout(viewport_width), PoolBinding::new(selection, ROWS));
    vp
}

/// Every third column selected across the first `n` rows.
fn striped(n: usize) -> SelectionSet {
    (0..n).filter(|i| i % 3 == 0).collect()
}

fn bench_scroll_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("viewport/scroll_step");
    let selection = striped(10_000);

    for viewport_width in [100u32, 800, 4_000] {
        let mut vp = laid_out(viewport_width, &selection);
        let binding = PoolBinding::new(&selection, ROWS);
        let mut forward = true;
        group.bench_with_input(
            BenchmarkId::new("one_column", viewport_width),
            &viewport_width,
            |b, _| {
                b.iter(|| {
                    let delta = if forward { 22 } else { -22 };
                    if !vp.scroll_by(delta, binding) {
                        forward = !forward;
                    }
                    black_box(vp.take_repaint_requests().len())
                })
            },
        );
    }

    group.finish();
}

fn bench_scroll_jump(c: &mut Criterion) {
    let mut group = c.benchmark_group("viewport/scroll_jump");
    let selection = striped(10_000);

    for viewport_width in [100u32, 800, 4_000] {
        let mut vp = laid_out(viewport_width, &selection);
        let binding = PoolBinding::new(&selection, ROWS);
        let far = vp.max_scroll_offset();
        let mut at_end = false;
        group.bench_with_input(
            BenchmarkId::new("end_to_end", viewport_width),
            &viewport_width,
            |b, _| {
                b.iter(|| {
                    at_end = !at_end;
                    let target = if at_end { far } else { 0 };
                    vp.set_scroll_offset(target, binding);
                    black_box(vp.take_repaint_requests().len())
                })
            },
        );
    }

    group.finish();
}

fn bench_reveal(c: &mut Criterion) {
    let mut group = c.benchmark_group("viewport/reveal");
    let selection = SelectionSet::new();
    let binding = PoolBinding::new(&selection, ROWS);

    group.bench_function("walk_right", |b| {
        b.iter_batched(
            || laid_out(800, &selection),
            |mut vp| {
                for index in (0..2_000).step_by(7) {
                    vp.scroll_to_reveal(index, binding);
                }
                black_box(vp.scroll_offset())
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_selection_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/set");

    for n in [1_000usize, 100_000] {
        let set = striped(n);
        group.bench_with_input(BenchmarkId::new("contains", n), &set, |b, set| {
            b.iter(|| {
                let mut hits = 0usize;
                for i in (0..n).step_by(97) {
                    hits += usize::from(set.contains(black_box(i)));
                }
                black_box(hits)
            })
        });

        group.bench_with_input(BenchmarkId::new("nth", n), &set, |b, set| {
            b.iter(|| black_box(set.nth(set.len() / 2)))
        });
    }

    group.bench_function("add_range_merge", |b| {
        b.iter_batched(
            || striped(10_000),
            |mut set| {
                set.add_range(0..10_000);
                black_box(set.ranges().len())
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_selection_model(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/model");

    group.bench_function("select_range_whole_list", |b| {
        b.iter_batched(
            || {
                let mut model = SelectionModel::new();
                model.set_multiple_selection(true);
                model.select(ROWS / 2, false, ROWS);
                model
            },
            |mut model| {
                model.select_range(ROWS / 2, 0, ROWS);
                model.select_range(0, ROWS - 1, ROWS);
                black_box(model.len())
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("clamp_to_shrink", |b| {
        b.iter_batched(
            || {
                let mut model = SelectionModel::new();
                model.set_multiple_selection(true);
                model.set_selected(striped(100_000), ROWS);
                model
            },
            |mut model| black_box(model.clamp_to(50_000)),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_scroll_step,
    bench_scroll_jump,
    bench_reveal,
    bench_selection_set,
    bench_selection_model,
);

criterion_main!(benches);
