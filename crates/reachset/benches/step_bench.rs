//! Criterion benchmarks for the per-step pipeline.
//! Zero-state polygon construction, and one full step (drivable area plus
//! reachable set) over a growing number of predecessor nodes.
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use reachset::geom2::Rect;
use reachset::graph::ReachNode;
use reachset::ops::create_zero_state_polygon;
use reachset::oracle::ObstacleOracle;
use reachset::{Configuration, ReachabilityAnalysis};

fn random_nodes(n: usize, seed: u64) -> Vec<ReachNode> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|id| {
            let p_lon = rng.gen_range(0.0..20.0);
            let p_lat = rng.gen_range(-3.0..3.0);
            let v_lon = rng.gen_range(2.0..15.0);
            let v_lat = rng.gen_range(-1.0..1.0);
            let lon = Rect::new(p_lon, v_lon, p_lon + 0.4, v_lon + 0.5);
            let lat = Rect::new(p_lat, v_lat, p_lat + 0.3, v_lat + 0.2);
            let mut node = ReachNode::new(lon.to_polygon().unwrap(), lat.to_polygon().unwrap(), 0);
            node.id = id;
            node
        })
        .collect()
}

fn obstacles(seed: u64) -> ObstacleOracle {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..10).fold(ObstacleOracle::new(), |oracle, _| {
        let x = rng.gen_range(0.0..25.0);
        let y = rng.gen_range(-4.0..4.0);
        oracle.with_static(Rect::new(x, y, x + 1.0, y + 0.5))
    })
}

fn bench_zero_state(c: &mut Criterion) {
    c.bench_function("zero_state_polygon", |b| {
        b.iter(|| create_zero_state_polygon(0.1, -6.0, 6.0).unwrap())
    });
}

fn bench_step(c: &mut Criterion) {
    let mut config = Configuration::default();
    config.reachable_set.num_threads = 4;
    let analysis = ReachabilityAnalysis::new(config, obstacles(7)).unwrap();
    let mut group = c.benchmark_group("pipeline_step");
    for &n in &[1usize, 10, 50] {
        group.bench_with_input(BenchmarkId::new("nodes", n), &n, |b, &n| {
            b.iter_batched(
                || random_nodes(n, 42),
                |nodes| {
                    let (drivable, propagated) =
                        analysis.compute_drivable_area_at_step(1, &nodes).unwrap();
                    analysis.compute_reachable_set_at_step(1, &propagated, &drivable)
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_zero_state, bench_step);
criterion_main!(benches);
