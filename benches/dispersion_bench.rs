//! Benchmarks for root finding and curve assembly.
//!
//! Run with: `cargo bench --bench dispersion_bench`
//!
//! Measures a single-period solve at several tolerances and a full
//! curve over a period grid, serial and parallel.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use disper_rs::{
    compute_curve, solve_phase_velocity_with, LayerInterval, LayeredModel, SearchWindow,
    SolverConfig,
};

#[cfg(feature = "parallel")]
use disper_rs::compute_curve_parallel;

/// Soft layer over a stiff half-space.
fn two_layer() -> LayeredModel {
    let window = SearchWindow::new(150.0, 380.0, 5.0).expect("valid window");
    LayeredModel::from_intervals(
        &[
            LayerInterval::new(0.0, 10.0, 200.0),
            LayerInterval::new(10.0, 11.0, 400.0),
        ],
        window,
    )
    .expect("valid model")
}

fn period_grid() -> Vec<f64> {
    vec![0.02, 0.05, 0.08, 0.1, 0.15, 0.2, 0.25, 0.3, 0.4, 0.5]
}

/// Benchmark one solve at the tested tolerance ladder.
fn bench_tolerances(c: &mut Criterion) {
    let mut group = c.benchmark_group("root_finding");
    let model = two_layer();

    for tolerance in [0.1, 0.01, 0.001] {
        let config = SolverConfig::default().with_tolerance(tolerance);
        group.bench_with_input(
            BenchmarkId::from_parameter(tolerance),
            &config,
            |b, config| {
                b.iter(|| solve_phase_velocity_with(black_box(&model), black_box(0.1), config));
            },
        );
    }

    group.finish();
}

/// Benchmark curve assembly over the period grid.
fn bench_curve(c: &mut Criterion) {
    let mut group = c.benchmark_group("curve");
    let model = two_layer();
    let periods = period_grid();
    let config = SolverConfig::default();

    group.bench_function("serial", |b| {
        b.iter(|| compute_curve(black_box(&model), black_box(&periods), &config));
    });

    #[cfg(feature = "parallel")]
    group.bench_function("parallel", |b| {
        b.iter(|| compute_curve_parallel(black_box(&model), black_box(&periods), &config));
    });

    group.finish();
}

criterion_group!(benches, bench_tolerances, bench_curve);
criterion_main!(benches);
