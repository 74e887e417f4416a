//! Fundamental-mode phase-velocity root finding.
//!
//! Finds the phase velocity at which the characteristic function
//! changes sign for a given period. A bracketing scan walks the search
//! window from its origin in steps of `delta`; once a sign change is
//! found, a Brent-style refinement (inverse quadratic and secant steps
//! with a bisection safeguard) narrows the bracket to the requested
//! relative accuracy.
//!
//! The scan is the accuracy/performance trade-off of the method: a
//! coarse step is cheap but can miss a bracket when two modes lie
//! closer together than `delta`. See [`crate::model::SearchWindow`].

use std::f64::consts::PI;
use std::mem;

use crate::model::LayeredModel;

use super::propagator::{evaluate_characteristic, DerivativeOrder, EPS};

// ============================================================
// Configuration
// ============================================================

/// Root-finder configuration.
///
/// The defaults match common practice for site-characterization work:
/// one percent relative accuracy and a generous iteration cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Relative accuracy of the refined phase velocity. Values at or
    /// below zero select probe mode, which returns the scan origin
    /// after a single evaluation.
    pub tolerance: f64,
    /// Refinement iteration cap. Exhausting it yields the current best
    /// estimate flagged as unconverged.
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            max_iterations: 100,
        }
    }
}

impl SolverConfig {
    /// Set the relative accuracy target.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the refinement iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

// ============================================================
// Solution
// ============================================================

/// Root of the dispersion relation with solve statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispersionSolution {
    /// Fundamental-mode phase velocity (m/s)
    pub phase_velocity: f64,
    /// Surface ellipticity at the root, when defined
    pub ellipticity: Option<f64>,
    /// Refinement iterations taken
    pub iterations: usize,
    /// Characteristic-function evaluations, including the scan
    pub evaluations: usize,
    /// False when the iteration cap was exhausted before the bracket
    /// closed; the phase velocity is then the best available estimate
    pub converged: bool,
}

/// Root estimate before the detail evaluation at the root.
struct RootEstimate {
    c: f64,
    iterations: usize,
    evaluations: usize,
    converged: bool,
}

// ============================================================
// Entry points
// ============================================================

/// Phase velocity at a period with the default configuration.
///
/// Returns `None` when the scan exhausts the window without a sign
/// change or a trial evaluation fails.
pub fn solve_phase_velocity(model: &LayeredModel, period: f64) -> Option<f64> {
    solve_phase_velocity_with(model, period, &SolverConfig::default())
}

/// Phase velocity at a period.
pub fn solve_phase_velocity_with(
    model: &LayeredModel,
    period: f64,
    config: &SolverConfig,
) -> Option<f64> {
    find_root(model, period, config).map(|estimate| estimate.c)
}

/// Phase velocity at a frequency (Hz) with the default configuration.
pub fn solve_at_frequency(model: &LayeredModel, frequency: f64) -> Option<f64> {
    solve_at_frequency_with(model, frequency, &SolverConfig::default())
}

/// Phase velocity at a frequency (Hz).
pub fn solve_at_frequency_with(
    model: &LayeredModel,
    frequency: f64,
    config: &SolverConfig,
) -> Option<f64> {
    solve_phase_velocity_with(model, 1.0 / frequency, config)
}

/// Full-detail solve: root, ellipticity and statistics.
///
/// On success the root is evaluated once more with the full derivative
/// state to report the surface ellipticity alongside the velocity.
pub fn solve_dispersion(
    model: &LayeredModel,
    period: f64,
    config: &SolverConfig,
) -> Option<DispersionSolution> {
    let estimate = find_root(model, period, config)?;
    let w = 2.0 * PI / period;
    let ellipticity = evaluate_characteristic(model, estimate.c, w, DerivativeOrder::Frequency)
        .ok()
        .and_then(|out| out.ellipticity);
    Some(DispersionSolution {
        phase_velocity: estimate.c,
        ellipticity,
        iterations: estimate.iterations,
        evaluations: estimate.evaluations + 1,
        converged: estimate.converged,
    })
}

// ============================================================
// Scan and refinement
// ============================================================

/// Unit sign: -1 for negative values, +1 otherwise.
fn sign_unit(v: f64) -> f64 {
    if v < 0.0 {
        -1.0
    } else {
        1.0
    }
}

fn find_root(model: &LayeredModel, period: f64, config: &SolverConfig) -> Option<RootEstimate> {
    if !(period > 0.0) {
        return None;
    }
    let w = 2.0 * PI / period;
    let window = model.window();

    // A positive tolerance is floored at machine epsilon
    let mut tol = config.tolerance;
    if tol > 0.0 {
        tol = tol.max(EPS);
    }

    let mut evaluations = 0_usize;
    let mut c3 = window.min;
    let mut f3 = match evaluate_characteristic(model, c3, w, DerivativeOrder::Value) {
        Ok(out) => out.value,
        Err(_) => return None,
    };
    evaluations += 1;
    if f3 == 0.0 && tol > 0.0 {
        return Some(RootEstimate {
            c: c3,
            iterations: 0,
            evaluations,
            converged: true,
        });
    }
    if tol <= 0.0 {
        // Probe mode reports the characteristic at the scan origin only
        return Some(RootEstimate {
            c: c3,
            iterations: 0,
            evaluations,
            converged: true,
        });
    }

    // ------------------------------------------------------------
    // Bracketing scan
    // ------------------------------------------------------------
    let mut c1 = 0.0;
    let mut f1 = 0.0;
    let mut bracketed = false;
    for k in 1..=window.steps() {
        let cc = window.min + k as f64 * window.delta;
        c1 = c3;
        f1 = f3;
        c3 = cc;
        f3 = match evaluate_characteristic(model, c3, w, DerivativeOrder::Value) {
            Ok(out) => out.value,
            Err(_) => return None,
        };
        evaluations += 1;
        if f3 * sign_unit(f1) <= 0.0 {
            bracketed = true;
            break;
        }
    }
    if !bracketed {
        return None;
    }
    if f3 == 0.0 {
        return Some(RootEstimate {
            c: c3,
            iterations: 0,
            evaluations,
            converged: true,
        });
    }

    // ------------------------------------------------------------
    // Brent-style refinement
    // ------------------------------------------------------------
    // c1 carries the opposite-signed endpoint, c2 the best estimate
    // and c3 the current trial
    let mut c2 = c3;
    let mut f2 = f3;
    let mut e = c1 - c2;
    let mut d = e / 2.0;
    c3 = c2 + d;
    for iteration in 1..=config.max_iterations {
        f3 = match evaluate_characteristic(model, c3, w, DerivativeOrder::Value) {
            Ok(out) => out.value,
            Err(_) => return None,
        };
        evaluations += 1;

        if f3 * sign_unit(f2) > 0.0 {
            mem::swap(&mut c1, &mut c2);
            mem::swap(&mut f1, &mut f2);
        }
        if f3.abs() > f2.abs() {
            mem::swap(&mut c2, &mut c3);
            mem::swap(&mut f2, &mut f3);
        }
        e = c2 - c3;
        if f3 == 0.0 {
            return Some(RootEstimate {
                c: c3,
                iterations: iteration,
                evaluations,
                converged: true,
            });
        }

        let tolc = c3 * tol;
        let dd = d;
        let r32 = f3 / f2;
        let r31 = f3 / f1;
        let r21 = f2 / f1;
        let mut q = r32 * (e * (1.0 - r31) + r21 * (r31 - r21) * (c1 - c3));
        let mut s = (r21 - 1.0) * (r32 - 1.0) * (r31 - 1.0);
        if q < 0.0 {
            s = -s;
        }
        q = q.abs();
        d = if q >= e * s - (tolc * s).abs() {
            // Secant step
            e * r32 / (r32 - 1.0)
        } else {
            // Inverse quadratic step
            q / s
        };

        c1 = c2;
        f1 = f2;
        c2 = c3;
        f2 = f3;
        c3 = c2 + d;
        if e.abs() <= tolc {
            return Some(RootEstimate {
                c: c3,
                iterations: iteration,
                evaluations,
                converged: true,
            });
        }
        if d.abs() <= tolc {
            // Degenerate step: bisect, or nudge by the tolerance when
            // the previous step was still substantial
            if dd.abs() <= tolc {
                d = e / 2.0;
                c3 = c2 + d;
            } else {
                c3 = c2 + if d < 0.0 { -tolc } else { tolc };
            }
        }
    }

    // Iteration cap exhausted: report the best estimate, unconverged
    Some(RootEstimate {
        c: c3,
        iterations: config.max_iterations,
        evaluations,
        converged: false,
    })
}
