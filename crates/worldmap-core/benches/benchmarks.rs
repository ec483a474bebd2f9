// crates/worldmap-core/benches/benchmarks.rs
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use worldmap_core::geo::LatLng;
use worldmap_core::loader::parse_feature_collection;
use worldmap_core::region::RegionLayer;
use worldmap_core::search::search_local;
use worldmap_core::text::Query;

/// A grid of 1° squares, roughly the feature count of a world boundary file.
fn grid_collection(n: usize) -> String {
    let features: Vec<String> = (0..n)
        .map(|i| {
            let lat = (i / 36) as f64 * 5.0 - 80.0;
            let lng = (i % 36) as f64 * 10.0 - 180.0;
            format!(
                r#"{{"type":"Feature","properties":{{"name":"R{i}"}},"geometry":{{"type":"Polygon","coordinates":[[[{lng},{lat}],[{e},{lat}],[{e},{n}],[{lng},{n}],[{lng},{lat}]]]}}}}"#,
                e = lng + 1.0,
                n = lat + 1.0,
            )
        })
        .collect();
    format!(r#"{{"type":"FeatureCollection","features":[{}]}}"#, features.join(","))
}

fn bench_local_search(c: &mut Criterion) {
    let layer = RegionLayer::with_manual_regions();
    let latin = Query::new("land");
    let localized = Query::new("岛");

    c.bench_function("search_local_latin", |b| {
        b.iter(|| black_box(search_local(black_box(&latin), &layer, 8)))
    });
    c.bench_function("search_local_localized", |b| {
        b.iter(|| black_box(search_local(black_box(&localized), &layer, 8)))
    });
}

fn bench_boundaries(c: &mut Criterion) {
    let json = grid_collection(180);

    c.bench_function("parse_feature_collection_180", |b| {
        b.iter(|| black_box(parse_feature_collection(black_box(&json))))
    });

    let mut fx = worldmap_core::Effects::new();
    let mut vp = worldmap_core::Viewport::initialize(
        &worldmap_core::Config::default(),
        "map",
        &worldmap_core::headless(),
        &mut fx,
    )
    .expect("viewport");
    let mut layer = RegionLayer::default();
    let mut loader = worldmap_core::loader::BoundaryLoader::from_config(&worldmap_core::Config::default());
    loader
        .complete(Ok(json), &mut layer, &mut vp, &Default::default(), &mut fx)
        .expect("load");

    c.bench_function("boundary_at_point", |b| {
        b.iter(|| black_box(layer.boundary_at(black_box(LatLng::new(60.5, 170.5)))))
    });
}

criterion_group!(benches, bench_local_search, bench_boundaries);
criterion_main!(benches);
