//! Layered elastic half-space model.

use std::fmt;

use super::{ModelError, SearchWindow};

/// Default bulk density (g/cm^3) when an interval record carries none.
pub const DEFAULT_DENSITY: f64 = 2.0;

/// Depth interval with material properties.
///
/// Boundary tables describe a model as ordered depth intervals; the
/// last interval stands in for the half-space. Compressional velocity
/// is derived from `vs` with the Poisson-solid ratio when a model is
/// built from intervals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerInterval {
    /// Top of the interval (m below the surface)
    pub start_depth: f64,
    /// Bottom of the interval (m below the surface)
    pub end_depth: f64,
    /// Shear velocity over the interval (m/s)
    pub vs: f64,
    /// Bulk density (g/cm^3); `None` selects [`DEFAULT_DENSITY`]
    pub density: Option<f64>,
}

impl LayerInterval {
    /// Create an interval with the default density.
    pub fn new(start_depth: f64, end_depth: f64, vs: f64) -> Self {
        Self {
            start_depth,
            end_depth,
            vs,
            density: None,
        }
    }

    /// Set an explicit bulk density (g/cm^3).
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = Some(density);
        self
    }
}

/// Stack of homogeneous elastic layers over a half-space.
///
/// Layer 0 is at the surface; the last layer is the half-space, whose
/// thickness is never propagated through. All properties are validated
/// at construction, so the solver can assume positive thicknesses,
/// densities and P-wave velocities, non-negative S-wave velocities
/// (zero marks a liquid layer) and a consistent search window.
///
/// # Example
///
/// ```
/// use disper_rs::{LayeredModel, SearchWindow};
///
/// let window = SearchWindow::new(50.0, 1500.0, 2.0).unwrap();
/// let model = LayeredModel::new(
///     vec![30.0, 14.0, 56.0],
///     vec![2.0, 2.0, 2.0],
///     vec![1316.0, 1837.0, 2200.0],
///     vec![760.0, 1061.0, 1270.0],
///     window,
/// )
/// .unwrap();
///
/// assert_eq!(model.layer_count(), 3);
/// assert_eq!(model.vs(0), 760.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LayeredModel {
    thickness: Vec<f64>,
    density: Vec<f64>,
    vp: Vec<f64>,
    vs: Vec<f64>,
    window: SearchWindow,
}

impl LayeredModel {
    /// Create a validated model from per-layer property arrays.
    ///
    /// # Arguments
    ///
    /// * `thickness` - Layer thicknesses (m), surface first
    /// * `density` - Bulk densities (g/cm^3)
    /// * `vp` - Compressional velocities (m/s)
    /// * `vs` - Shear velocities (m/s); zero marks a liquid layer
    /// * `window` - Phase-velocity scan window
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] naming the first offending layer when a
    /// property is out of range, when the arrays disagree in length, or
    /// when a solid half-space is not faster than the scan origin.
    pub fn new(
        thickness: Vec<f64>,
        density: Vec<f64>,
        vp: Vec<f64>,
        vs: Vec<f64>,
        window: SearchWindow,
    ) -> Result<Self, ModelError> {
        if thickness.is_empty() {
            return Err(ModelError::Empty);
        }
        let n = thickness.len();
        if density.len() != n || vp.len() != n || vs.len() != n {
            return Err(ModelError::LengthMismatch {
                thickness: n,
                density: density.len(),
                vp: vp.len(),
                vs: vs.len(),
            });
        }

        // NaN fails every comparison, so the negated forms reject it too
        for (index, &value) in thickness.iter().enumerate() {
            if !(value > 0.0) {
                return Err(ModelError::NonPositiveThickness { index, value });
            }
        }
        for (index, &value) in density.iter().enumerate() {
            if !(value > 0.0) {
                return Err(ModelError::NonPositiveDensity { index, value });
            }
        }
        for (index, &value) in vp.iter().enumerate() {
            if !(value > 0.0) {
                return Err(ModelError::NonPositiveVp { index, value });
            }
        }
        for (index, &value) in vs.iter().enumerate() {
            if !(value >= 0.0) {
                return Err(ModelError::NegativeVs { index, value });
            }
        }

        // A solid half-space at or below the scan origin leaves the
        // whole window above the root region
        let vs_bottom = vs[n - 1];
        if vs_bottom > 0.0 && vs_bottom <= window.min {
            return Err(ModelError::HalfspaceBelowWindow {
                vs: vs_bottom,
                min: window.min,
            });
        }

        Ok(Self {
            thickness,
            density,
            vp,
            vs,
            window,
        })
    }

    /// Build a model from ordered depth intervals.
    ///
    /// Thickness is `end_depth - start_depth` per record, compressional
    /// velocity follows the Poisson-solid ratio `vp = vs * sqrt(3)` and
    /// a missing density defaults to [`DEFAULT_DENSITY`].
    pub fn from_intervals(
        intervals: &[LayerInterval],
        window: SearchWindow,
    ) -> Result<Self, ModelError> {
        let mut thickness = Vec::with_capacity(intervals.len());
        let mut density = Vec::with_capacity(intervals.len());
        let mut vp = Vec::with_capacity(intervals.len());
        let mut vs = Vec::with_capacity(intervals.len());
        for (index, interval) in intervals.iter().enumerate() {
            let extent = interval.end_depth - interval.start_depth;
            if !(extent > 0.0) {
                return Err(ModelError::InvalidInterval {
                    index,
                    start: interval.start_depth,
                    end: interval.end_depth,
                });
            }
            thickness.push(extent);
            density.push(interval.density.unwrap_or(DEFAULT_DENSITY));
            vp.push(interval.vs * 3.0_f64.sqrt());
            vs.push(interval.vs);
        }
        Self::new(thickness, density, vp, vs, window)
    }

    /// Build a uniform half-space model.
    ///
    /// The single layer is the half-space itself; its stored thickness
    /// is infinite and never enters the propagation.
    pub fn half_space(
        vs: f64,
        vp: f64,
        density: f64,
        window: SearchWindow,
    ) -> Result<Self, ModelError> {
        Self::new(
            vec![f64::INFINITY],
            vec![density],
            vec![vp],
            vec![vs],
            window,
        )
    }

    /// Number of layers including the half-space.
    #[inline]
    pub fn layer_count(&self) -> usize {
        self.thickness.len()
    }

    /// Thickness of layer `i` (m).
    #[inline]
    pub fn thickness(&self, i: usize) -> f64 {
        self.thickness[i]
    }

    /// Bulk density of layer `i` (g/cm^3).
    #[inline]
    pub fn density(&self, i: usize) -> f64 {
        self.density[i]
    }

    /// Compressional velocity of layer `i` (m/s).
    #[inline]
    pub fn vp(&self, i: usize) -> f64 {
        self.vp[i]
    }

    /// Shear velocity of layer `i` (m/s).
    #[inline]
    pub fn vs(&self, i: usize) -> f64 {
        self.vs[i]
    }

    /// Thickness profile, surface first.
    #[inline]
    pub fn thickness_profile(&self) -> &[f64] {
        &self.thickness
    }

    /// Density profile, surface first.
    #[inline]
    pub fn density_profile(&self) -> &[f64] {
        &self.density
    }

    /// Compressional velocity profile, surface first.
    #[inline]
    pub fn vp_profile(&self) -> &[f64] {
        &self.vp
    }

    /// Shear velocity profile, surface first.
    #[inline]
    pub fn vs_profile(&self) -> &[f64] {
        &self.vs
    }

    /// Phase-velocity scan window.
    #[inline]
    pub fn window(&self) -> SearchWindow {
        self.window
    }

    /// Scan origin (m/s).
    #[inline]
    pub fn phase_vel_min(&self) -> f64 {
        self.window.min
    }

    /// Scan ceiling (m/s).
    #[inline]
    pub fn phase_vel_max(&self) -> f64 {
        self.window.max
    }

    /// Scan step (m/s).
    #[inline]
    pub fn phase_vel_delta(&self) -> f64 {
        self.window.delta
    }

    /// Total thickness of the stack (m); infinite when the half-space
    /// thickness is stored as such.
    pub fn total_thickness(&self) -> f64 {
        self.thickness.iter().sum()
    }

    /// Whether any layer is liquid (vs = 0).
    pub fn has_liquid_layer(&self) -> bool {
        self.vs.iter().any(|&v| v == 0.0)
    }
}

impl fmt::Display for LayeredModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} layers, half-space vs {:.1} m/s, window {}",
            self.layer_count(),
            self.vs[self.vs.len() - 1],
            self.window
        )
    }
}
