//! Layered velocity models and phase-velocity search windows.
//!
//! A [`LayeredModel`] describes a stack of homogeneous elastic layers
//! over a half-space together with the [`SearchWindow`] the root finder
//! scans. Construction validates every property up front so the solver
//! can assume a physically consistent model.

use thiserror::Error;

mod layered;
mod window;

pub use layered::{LayerInterval, LayeredModel, DEFAULT_DENSITY};
pub use window::SearchWindow;

/// Error type for model construction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    /// Model has no layers
    #[error("model has no layers")]
    Empty,

    /// Property arrays of differing lengths
    #[error(
        "property arrays disagree in length: thickness {thickness}, density {density}, \
         vp {vp}, vs {vs}"
    )]
    LengthMismatch {
        thickness: usize,
        density: usize,
        vp: usize,
        vs: usize,
    },

    /// Layer thickness must be positive
    #[error("layer {index}: thickness {value} m must be positive")]
    NonPositiveThickness { index: usize, value: f64 },

    /// Layer density must be positive
    #[error("layer {index}: density {value} must be positive")]
    NonPositiveDensity { index: usize, value: f64 },

    /// Compressional velocity must be positive
    #[error("layer {index}: P-wave velocity {value} m/s must be positive")]
    NonPositiveVp { index: usize, value: f64 },

    /// Shear velocity must be non-negative (zero marks a liquid layer)
    #[error("layer {index}: S-wave velocity {value} m/s must be non-negative")]
    NegativeVs { index: usize, value: f64 },

    /// Search window bounds or step are invalid
    #[error(
        "invalid search window: min {min} m/s, max {max} m/s, delta {delta} m/s \
         (require 0 < min < max and delta > 0)"
    )]
    InvalidWindow { min: f64, max: f64, delta: f64 },

    /// Solid half-space slower than the scan origin leaves no root to find
    #[error("half-space S-wave velocity {vs} m/s must exceed the window minimum {min} m/s")]
    HalfspaceBelowWindow { vs: f64, min: f64 },

    /// Depth interval with non-positive extent
    #[error("interval {index}: end depth {end} m must exceed start depth {start} m")]
    InvalidInterval { index: usize, start: f64, end: f64 },
}
