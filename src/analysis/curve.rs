//! Dispersion-curve assembly over period and frequency grids.
//!
//! A curve is a sequence of per-period solves against one shared model.
//! Periods where the root finder reports no root become gaps rather
//! than errors, so a partially resolvable model still yields a usable
//! curve. Solves are independent, which is what makes the parallel
//! path a drop-in replacement for the serial one.

use crate::model::LayeredModel;
use crate::solver::{solve_dispersion, solve_phase_velocity_with, SolverConfig};

use std::fmt;

// ============================================================
// Curve types
// ============================================================

/// One sample of a dispersion curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DispersionPoint {
    /// Period (s)
    pub period: f64,
    /// Fundamental-mode phase velocity (m/s); `None` marks a gap
    pub phase_velocity: Option<f64>,
}

/// Dispersion curve over a period grid.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct DispersionCurve {
    /// Samples in the order the periods were given
    pub points: Vec<DispersionPoint>,
}

impl DispersionCurve {
    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the curve has no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of gaps (periods without a root).
    pub fn gap_count(&self) -> usize {
        self.points
            .iter()
            .filter(|p| p.phase_velocity.is_none())
            .count()
    }

    /// Periods of all samples, in order.
    pub fn periods(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.period).collect()
    }

    /// Phase velocities of all samples, in order, gaps included.
    pub fn velocities(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.phase_velocity).collect()
    }

    /// Iterate over the samples.
    pub fn iter(&self) -> std::slice::Iter<'_, DispersionPoint> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a DispersionCurve {
    type Item = &'a DispersionPoint;
    type IntoIter = std::slice::Iter<'a, DispersionPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

// ============================================================
// Curve assembly
// ============================================================

/// Compute a dispersion curve over a period grid (s).
pub fn compute_curve(
    model: &LayeredModel,
    periods: &[f64],
    config: &SolverConfig,
) -> DispersionCurve {
    let points = periods
        .iter()
        .map(|&period| DispersionPoint {
            period,
            phase_velocity: solve_phase_velocity_with(model, period, config),
        })
        .collect();
    DispersionCurve { points }
}

/// Compute a dispersion curve over a frequency grid (Hz).
///
/// Samples are stored with `period = 1 / frequency`.
pub fn compute_curve_from_frequencies(
    model: &LayeredModel,
    frequencies: &[f64],
    config: &SolverConfig,
) -> DispersionCurve {
    let periods: Vec<f64> = frequencies.iter().map(|&f| 1.0 / f).collect();
    compute_curve(model, &periods, config)
}

/// Parallel curve assembly over a period grid.
///
/// Point-for-point identical to [`compute_curve`]; the per-period
/// solves share the immutable model and nothing else.
#[cfg(feature = "parallel")]
pub fn compute_curve_parallel(
    model: &LayeredModel,
    periods: &[f64],
    config: &SolverConfig,
) -> DispersionCurve {
    use rayon::prelude::*;

    let points = periods
        .par_iter()
        .map(|&period| DispersionPoint {
            period,
            phase_velocity: solve_phase_velocity_with(model, period, config),
        })
        .collect();
    DispersionCurve { points }
}

// ============================================================
// Misfit
// ============================================================

/// RMS misfit between observed picks and the modeled curve.
///
/// Each observation is a `(period, phase_velocity)` pair. Periods where
/// the model has a gap are skipped; `None` means nothing overlapped.
pub fn misfit_rmse(
    model: &LayeredModel,
    observed: &[(f64, f64)],
    config: &SolverConfig,
) -> Option<f64> {
    let mut sum_sq = 0.0;
    let mut n = 0_usize;
    for &(period, observed_velocity) in observed {
        if let Some(model_velocity) = solve_phase_velocity_with(model, period, config) {
            let residual = model_velocity - observed_velocity;
            sum_sq += residual * residual;
            n += 1;
        }
    }
    if n == 0 {
        None
    } else {
        Some((sum_sq / n as f64).sqrt())
    }
}

// ============================================================
// Diagnostics
// ============================================================

/// Aggregate solve statistics over a period grid.
///
/// Evaluation and iteration counts cover the solved points only; gaps
/// contribute to `n_gaps` alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CurveDiagnostics {
    /// Periods requested
    pub n_points: usize,
    /// Periods with a root
    pub n_solved: usize,
    /// Periods without a root
    pub n_gaps: usize,
    /// Characteristic-function evaluations across solved points
    pub total_evaluations: usize,
    /// Largest per-point refinement iteration count
    pub max_iterations: usize,
    /// Solved points that exhausted the iteration cap
    pub non_converged: usize,
}

impl CurveDiagnostics {
    /// Solve a period grid and collect statistics.
    pub fn compute(model: &LayeredModel, periods: &[f64], config: &SolverConfig) -> Self {
        let mut diag = Self {
            n_points: periods.len(),
            ..Self::default()
        };
        for &period in periods {
            match solve_dispersion(model, period, config) {
                Some(solution) => {
                    diag.n_solved += 1;
                    diag.total_evaluations += solution.evaluations;
                    diag.max_iterations = diag.max_iterations.max(solution.iterations);
                    if !solution.converged {
                        diag.non_converged += 1;
                    }
                }
                None => diag.n_gaps += 1,
            }
        }
        diag
    }
}

impl fmt::Display for CurveDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} points: {} solved, {} gaps, {} evaluations, \
             worst refinement {} iterations, {} unconverged",
            self.n_points,
            self.n_solved,
            self.n_gaps,
            self.total_evaluations,
            self.max_iterations,
            self.non_converged
        )
    }
}
