//! Benchmarks for orientation generation, placement enumeration and search.

use std::time::{Duration, Instant};

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use polytile::{
    polyomino::RegionTiling,
    shape::{orientations, Footprint},
    Catalog, ExactCover, Orchestrator, Region, Shape, SolveConfig,
};

fn l_tetromino(id: usize) -> Shape {
    Shape::new(id, [(0, 0), (0, 1), (0, 2), (1, 2)]).unwrap()
}

/// Benchmark computing all orientations of an asymmetric pentomino.
fn bench_orientations(c: &mut Criterion) {
    let f_pentomino = Footprint::normalize([(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)]);

    c.bench_function("orientations", |b| {
        b.iter(|| orientations(black_box(&f_pentomino)))
    });
}

/// Benchmark enumerating every placement of 12 L tetrominoes in a 7x7 region.
fn bench_placements(c: &mut Criterion) {
    let shape = l_tetromino(0);

    c.bench_function("placements_7x7", |b| {
        b.iter(|| RegionTiling::new(7, 7, [(black_box(&shape), 12)]))
    });
}

/// Benchmark a complete search that finds a tiling of a 4x4 square.
fn bench_solve_square(c: &mut Criterion) {
    let shape = l_tetromino(0);
    let tiling = RegionTiling::new(4, 4, [(&shape, 4)]);

    c.bench_function("solve_l_4x4", |b| {
        b.iter(|| {
            let mut solver = black_box(&tiling).solver(Instant::now() + Duration::from_secs(60));
            solver.solve()
        })
    });
}

/// Benchmark the full pipeline over a handful of regions.
fn bench_classify(c: &mut Criterion) {
    let catalog = Catalog::new([
        Shape::from_rows(0, ["##", "##"]).unwrap(),
        Shape::from_rows(1, ["####"]).unwrap(),
        Shape::from_rows(2, [".##", "##."]).unwrap(),
        l_tetromino(3),
    ])
    .unwrap();
    let regions = [
        Region::new(4, 4, [(1, 4)]).unwrap(),
        Region::new(4, 4, [(2, 4)]).unwrap(),
        Region::new(6, 4, [(0, 2), (1, 2), (2, 1)]).unwrap(),
    ];
    let orchestrator = Orchestrator::new(&catalog, SolveConfig::default()).unwrap();

    let mut group = c.benchmark_group("classify");
    group.sample_size(20);
    group.bench_function("small_regions", |b| {
        b.iter(|| orchestrator.classify_all(black_box(&regions)))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_orientations,
    bench_placements,
    bench_solve_square,
    bench_classify
);
criterion_main!(benches);
