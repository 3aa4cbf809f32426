//! Criterion benchmarks for the configuration-space builders and path search.
//! Maps come from `cspace::random` with fixed replay tokens.
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use cspace::prelude::*;
use cspace::random::{random_map, MapCfg, ReplayToken};

fn workspace(obstacles: usize, seed: u64) -> Workspace {
    let cfg = MapCfg {
        obstacles,
        walls: obstacles / 2,
        ..MapCfg::default()
    };
    let map = random_map(&cfg, ReplayToken { seed, index: 0 }).expect("bench map");
    Workspace::new(map)
}

fn bench_builders(c: &mut Criterion) {
    let mut group = c.benchmark_group("builders");
    let params = BuildParams {
        radius: 0.3,
        step: Some(0.5),
        visibility: VisibilityCfg::default(),
    };
    for &n in &[2usize, 8, 16] {
        let ws = workspace(n, 41);
        for algo in Algorithm::ALL {
            group.bench_with_input(BenchmarkId::new(algo.name(), n), &n, |b, _| {
                b.iter(|| algo.build(&ws, params).expect("build"))
            });
        }
    }
    group.finish();
}

fn bench_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("min_path");
    let ws = workspace(8, 42);
    let params = BuildParams {
        radius: 0.3,
        step: Some(0.25),
        visibility: VisibilityCfg::default(),
    };
    let mut graph = Algorithm::Discretization.build(&ws, params).expect("build");
    graph.set_begin(Point::new(0.0, 0.0), Placement::Snap, params.radius, &ws);
    graph.set_end(Point::new(20.0, 20.0), Placement::Snap, params.radius, &ws);
    group.bench_function("dijkstra_discretization", |b| {
        b.iter(|| MinPathBuilder::new(&graph).build())
    });
    group.finish();
}

criterion_group!(benches, bench_builders, bench_path);
criterion_main!(benches);
