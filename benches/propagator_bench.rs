//! Benchmarks for the delta-matrix propagator.
//!
//! Run with: `cargo bench --bench propagator_bench`
//!
//! Measures how one characteristic-function evaluation scales with
//! layer count and with the requested derivative order.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use disper_rs::{evaluate_characteristic, DerivativeOrder, LayeredModel, SearchWindow};
use std::f64::consts::PI;

const SQRT3: f64 = 1.732050807568877;

/// Build a model with `n_layers` layers: a shear-velocity ramp from
/// 200 to 400 m/s over rock at 500 m/s.
fn stack_model(n_layers: usize) -> LayeredModel {
    let window = SearchWindow::new(150.0, 460.0, 5.0).expect("valid window");
    let mut thickness = Vec::with_capacity(n_layers);
    let mut density = Vec::with_capacity(n_layers);
    let mut vp = Vec::with_capacity(n_layers);
    let mut vs = Vec::with_capacity(n_layers);

    for i in 0..n_layers - 1 {
        let v = 200.0 + 200.0 * i as f64 / (n_layers - 1) as f64;
        thickness.push(10.0);
        density.push(2.0);
        vp.push(v * SQRT3);
        vs.push(v);
    }
    thickness.push(10.0);
    density.push(2.0);
    vp.push(500.0 * SQRT3);
    vs.push(500.0);

    LayeredModel::new(thickness, density, vp, vs, window).expect("valid model")
}

/// Benchmark evaluation cost against layer count.
fn bench_layer_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("propagator_layers");
    let angular_frequency = 2.0 * PI / 0.1;

    for n_layers in [2, 5, 10, 20] {
        let model = stack_model(n_layers);
        group.bench_with_input(
            BenchmarkId::from_parameter(n_layers),
            &model,
            |b, model| {
                b.iter(|| {
                    evaluate_characteristic(
                        black_box(model),
                        black_box(300.0),
                        black_box(angular_frequency),
                        DerivativeOrder::Value,
                    )
                });
            },
        );
    }

    group.finish();
}

/// Benchmark the three derivative orders on one model.
fn bench_derivative_orders(c: &mut Criterion) {
    let mut group = c.benchmark_group("propagator_order");
    let model = stack_model(10);
    let angular_frequency = 2.0 * PI / 0.1;

    for (name, order) in [
        ("value", DerivativeOrder::Value),
        ("phase_velocity", DerivativeOrder::PhaseVelocity),
        ("frequency", DerivativeOrder::Frequency),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &order, |b, &order| {
            b.iter(|| {
                evaluate_characteristic(
                    black_box(&model),
                    black_box(300.0),
                    black_box(angular_frequency),
                    order,
                )
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_layer_scaling, bench_derivative_orders);
criterion_main!(benches);
