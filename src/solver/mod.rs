//! Rayleigh-wave dispersion solver.
//!
//! # Submodules
//!
//! - `propagator`: delta-matrix evaluation of the characteristic
//!   function for one (phase velocity, frequency) pair
//! - `dispersion`: bracketing scan plus bracketed refinement that
//!   drives the propagator to a fundamental-mode root
//!
//! The propagator is the inner kernel: it carries the secular function
//! of the layered model from the half-space to the free surface and
//! reports its surface value. The dispersion layer walks that function
//! across the model's search window until it changes sign, then closes
//! in on the zero crossing. Everything above (curves, site metrics)
//! composes these two calls.

mod dispersion;
mod propagator;

pub use dispersion::{
    solve_at_frequency, solve_at_frequency_with, solve_dispersion, solve_phase_velocity,
    solve_phase_velocity_with, DispersionSolution, SolverConfig,
};
pub use propagator::{
    evaluate_characteristic, CharacteristicOutput, DerivativeOrder, SolverError, BIG, EPS,
};
