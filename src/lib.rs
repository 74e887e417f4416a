//! # disper-rs
//!
//! A Rayleigh surface-wave dispersion library for layered earth models.
//!
//! This crate provides the core building blocks for dispersion analysis:
//! - Layered velocity model representation with validation
//! - Phase-velocity search windows
//! - Delta-matrix propagation of the Rayleigh characteristic function
//! - Fundamental-mode root finding (bracketing scan + bracketed refinement)
//! - Dispersion-curve assembly over period and frequency grids
//! - Vs30 and ASCE 7 site classification

pub mod analysis;
pub mod model;
pub mod solver;

// Re-export main types for convenience
// Model types
pub use model::{LayerInterval, LayeredModel, ModelError, SearchWindow, DEFAULT_DENSITY};

// Solver entry points
pub use solver::{
    evaluate_characteristic, solve_at_frequency, solve_at_frequency_with, solve_dispersion,
    solve_phase_velocity, solve_phase_velocity_with, CharacteristicOutput, DerivativeOrder,
    DispersionSolution, SolverConfig, SolverError,
};

// Curve and site analysis
pub use analysis::{
    compute_curve, compute_curve_from_frequencies, misfit_rmse, site_class, site_class_for_version,
    time_averaged_vs, vs30, AsceEdition, CurveDiagnostics, DispersionCurve, DispersionPoint,
    SiteClass,
};

#[cfg(feature = "parallel")]
pub use analysis::compute_curve_parallel;
