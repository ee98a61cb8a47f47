use criterion::{Criterion, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

use playoff_scenarios::highlight::HighlightEngine;
use playoff_scenarios::layout::{FILTER_OPTIONS, ViewLayout};
use playoff_scenarios::model::parse_dataset_json;
use playoff_scenarios::store::ScenarioStore;
use playoff_scenarios::views::build_views;

use ratatui::layout::Rect;

const FIXTURE: &str = include_str!("../tests/fixtures/scenarios.json");

fn fixture_store() -> ScenarioStore {
    ScenarioStore::new(parse_dataset_json(FIXTURE).expect("valid fixture json"))
}

fn bench_dataset_parse(c: &mut Criterion) {
    c.bench_function("dataset_parse", |b| {
        b.iter(|| {
            let dataset = parse_dataset_json(black_box(FIXTURE)).unwrap();
            black_box(dataset.scenarios.len());
        })
    });
}

fn bench_build_views(c: &mut Criterion) {
    let store = fixture_store();
    let mut engine = HighlightEngine::for_store(&store);
    c.bench_function("build_views", |b| {
        b.iter(|| {
            let views = build_views(black_box(&store), &[], &mut engine);
            black_box(views.cell_count());
        })
    });
}

fn bench_random_filters(c: &mut Criterion) {
    let store = fixture_store();
    let mut engine = HighlightEngine::for_store(&store);
    let _views = build_views(&store, &[], &mut engine);
    let ids = store.match_ids();

    let mut rng = StdRng::seed_from_u64(7);
    let filters: Vec<Vec<_>> = (0..64)
        .map(|_| {
            ids.iter()
                .map(|_| FILTER_OPTIONS[rng.gen_range(0..FILTER_OPTIONS.len())])
                .collect()
        })
        .collect();

    c.bench_function("filter_recompute", |b| {
        b.iter(|| {
            for values in &filters {
                for (id, value) in ids.iter().zip(values) {
                    engine.set_filter(&store, id, *value);
                }
                black_box(engine.matched_scenarios(&store));
            }
        })
    });
}

fn bench_hover_sweep(c: &mut Criterion) {
    let store = fixture_store();
    let mut engine = HighlightEngine::for_store(&store);
    let views = build_views(&store, &[], &mut engine);
    let cells: Vec<usize> = views.cells().map(|cell| cell.id).collect();

    c.bench_function("hover_sweep", |b| {
        b.iter(|| {
            for cell in &cells {
                black_box(engine.hover_cell(&store, *cell));
            }
            engine.leave(&store);
        })
    });
}

fn bench_layout(c: &mut Criterion) {
    let store = fixture_store();
    let mut engine = HighlightEngine::for_store(&store);
    let views = build_views(&store, &[], &mut engine);

    c.bench_function("view_layout", |b| {
        b.iter(|| {
            let layout = ViewLayout::compute(black_box(Rect::new(0, 7, 120, 26)), &views);
            black_box(layout.placed().count());
        })
    });
}

criterion_group!(
    benches,
    bench_dataset_parse,
    bench_build_views,
    bench_random_filters,
    bench_hover_sweep,
    bench_layout
);
criterion_main!(benches);
