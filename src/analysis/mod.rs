//! Dispersion curves, misfit, and site-response metrics.
//!
//! This module provides tools for:
//! - Assembling fundamental-mode dispersion curves over period or frequency grids
//! - Scoring observed picks against a model (RMS misfit)
//! - Time-averaged shear velocity to a target depth, including Vs30
//! - ASCE 7 seismic site classification from Vs30
//!
//! # Example - Dispersion Curve
//!
//! ```ignore
//! use disper_rs::analysis::compute_curve;
//! use disper_rs::model::{LayerInterval, LayeredModel, SearchWindow};
//! use disper_rs::solver::SolverConfig;
//!
//! let window = SearchWindow::new(150.0, 380.0, 5.0)?;
//! let model = LayeredModel::from_intervals(
//!     &[LayerInterval::new(0.0, 10.0, 200.0), LayerInterval::new(10.0, 11.0, 400.0)],
//!     window,
//! )?;
//!
//! let curve = compute_curve(&model, &[0.02, 0.05, 0.1, 0.2], &SolverConfig::default());
//! for point in &curve {
//!     match point.phase_velocity {
//!         Some(c) => println!("T = {:.2} s  c = {:.1} m/s", point.period, c),
//!         None => println!("T = {:.2} s  (no root in window)", point.period),
//!     }
//! }
//! ```
//!
//! # Example - Site Classification
//!
//! ```ignore
//! use disper_rs::analysis::{site_class, vs30, AsceEdition};
//!
//! let v = vs30(&model);
//! let class = site_class(AsceEdition::Asce7_22, v);
//! println!("Vs30 = {:.0} m/s, site class {}", v, class);
//! ```

mod curve;
mod site;

pub use curve::{
    compute_curve, compute_curve_from_frequencies, misfit_rmse, CurveDiagnostics, DispersionCurve,
    DispersionPoint,
};
pub use site::{
    site_class, site_class_for_version, site_class_from_ft, time_averaged_vs, vs30, AsceEdition,
    SiteClass, UnknownEdition, FT_PER_M,
};

#[cfg(feature = "parallel")]
pub use curve::compute_curve_parallel;
