//! Phase-velocity search window.

use std::fmt;

use super::ModelError;

/// Phase-velocity window for the bracketing scan.
///
/// The root finder walks trial velocities `min, min + delta, ...` up to
/// `max` looking for a sign change of the characteristic function.
/// A coarse `delta` keeps the scan cheap but can step over two closely
/// spaced sign changes (adjacent modes) and bracket the wrong one or
/// none at all, so the step trades scan cost against mode resolution.
///
/// # Example
///
/// ```
/// use disper_rs::SearchWindow;
///
/// let window = SearchWindow::new(50.0, 1500.0, 2.0).unwrap();
///
/// assert_eq!(window.width(), 1450.0);
/// assert!(window.contains(760.0));
/// assert_eq!(window.steps(), 725);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchWindow {
    /// Lowest trial phase velocity (m/s)
    pub min: f64,
    /// Highest trial phase velocity (m/s)
    pub max: f64,
    /// Scan step (m/s)
    pub delta: f64,
}

impl SearchWindow {
    /// Create a validated search window.
    ///
    /// Requires finite values with `0 < min < max` and `delta > 0`.
    /// NaN and infinities are rejected with the same error; an infinite
    /// bound would otherwise saturate [`steps`](Self::steps) and the
    /// bracketing scan with it.
    pub fn new(min: f64, max: f64, delta: f64) -> Result<Self, ModelError> {
        let finite = min.is_finite() && max.is_finite() && delta.is_finite();
        if !finite || !(min > 0.0) || !(max > min) || !(delta > 0.0) {
            return Err(ModelError::InvalidWindow { min, max, delta });
        }
        Ok(Self { min, max, delta })
    }

    /// Build a window from slowness limits (s/m).
    ///
    /// Dispersion picks are commonly plotted against slowness; the
    /// velocity window is the reciprocal interval, `min = 1 / max_slowness`
    /// and `max = 1 / min_slowness`.
    pub fn from_slowness_limits(
        min_slowness: f64,
        max_slowness: f64,
        delta: f64,
    ) -> Result<Self, ModelError> {
        Self::new(1.0 / max_slowness, 1.0 / min_slowness, delta)
    }

    /// Widen the window by a relative margin on each side.
    ///
    /// `margin = 0.1` maps `[min, max]` to `[0.9 min, 1.1 max]`, giving
    /// the scan headroom around the plotted picks.
    pub fn expanded(&self, margin: f64) -> Result<Self, ModelError> {
        Self::new(
            self.min * (1.0 - margin),
            self.max * (1.0 + margin),
            self.delta,
        )
    }

    /// Window width (m/s).
    #[inline]
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Check if a phase velocity lies inside the window (inclusive).
    #[inline]
    pub fn contains(&self, c: f64) -> bool {
        c >= self.min && c <= self.max
    }

    /// Number of scan steps above `min`, at least 1.
    ///
    /// Matches the bracketing loop: `round((max - min) / delta)` trial
    /// velocities are visited after the scan origin.
    #[inline]
    pub fn steps(&self) -> usize {
        let k = ((self.max - self.min) / self.delta + 0.5).floor();
        if k < 1.0 {
            1
        } else {
            k as usize
        }
    }
}

impl fmt::Display for SearchWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.1}, {:.1}] m/s, step {:.1} m/s",
            self.min, self.max, self.delta
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_creation() {
        let w = SearchWindow::new(50.0, 1500.0, 2.0).unwrap();
        assert_eq!(w.min, 50.0);
        assert_eq!(w.max, 1500.0);
        assert_eq!(w.delta, 2.0);
    }

    #[test]
    fn test_rejects_invalid_bounds() {
        assert!(SearchWindow::new(0.0, 100.0, 1.0).is_err());
        assert!(SearchWindow::new(-10.0, 100.0, 1.0).is_err());
        assert!(SearchWindow::new(100.0, 100.0, 1.0).is_err());
        assert!(SearchWindow::new(200.0, 100.0, 1.0).is_err());
        assert!(SearchWindow::new(50.0, 100.0, 0.0).is_err());
        assert!(SearchWindow::new(50.0, 100.0, -1.0).is_err());
    }

    #[test]
    fn test_rejects_nan() {
        assert!(SearchWindow::new(f64::NAN, 100.0, 1.0).is_err());
        assert!(SearchWindow::new(50.0, f64::NAN, 1.0).is_err());
        assert!(SearchWindow::new(50.0, 100.0, f64::NAN).is_err());
    }

    #[test]
    fn test_rejects_infinite_bounds() {
        // An infinite max orders correctly against any finite min, so
        // the ordering checks alone would let it through into steps()
        assert!(SearchWindow::new(50.0, f64::INFINITY, 2.0).is_err());
        assert!(SearchWindow::new(f64::INFINITY, 1500.0, 2.0).is_err());
        assert!(SearchWindow::new(50.0, 1500.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_width_and_contains() {
        let w = SearchWindow::new(100.0, 300.0, 5.0).unwrap();
        assert_eq!(w.width(), 200.0);
        assert!(w.contains(100.0));
        assert!(w.contains(300.0));
        assert!(w.contains(250.0));
        assert!(!w.contains(99.9));
        assert!(!w.contains(300.1));
    }

    #[test]
    fn test_steps_rounding() {
        // 725 whole steps of 2 m/s across 1450 m/s
        let w = SearchWindow::new(50.0, 1500.0, 2.0).unwrap();
        assert_eq!(w.steps(), 725);

        // Fractional step counts round to nearest
        let w = SearchWindow::new(100.0, 103.0, 2.0).unwrap();
        assert_eq!(w.steps(), 2);

        // Step wider than the window still scans once
        let w = SearchWindow::new(100.0, 101.0, 50.0).unwrap();
        assert_eq!(w.steps(), 1);
    }

    #[test]
    fn test_from_slowness_limits() {
        // 1/0.02 = 50 m/s up to 1/0.000667 ~ 1500 m/s
        let w = SearchWindow::from_slowness_limits(1.0 / 1500.0, 1.0 / 50.0, 2.0).unwrap();
        assert!((w.min - 50.0).abs() < 1e-9);
        assert!((w.max - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn test_expanded() {
        let w = SearchWindow::new(100.0, 1000.0, 2.0).unwrap();
        let e = w.expanded(0.1).unwrap();
        assert!((e.min - 90.0).abs() < 1e-12);
        assert!((e.max - 1100.0).abs() < 1e-12);
        assert_eq!(e.delta, 2.0);

        // A margin of 1 or more would zero the lower bound
        assert!(w.expanded(1.0).is_err());
    }

    #[test]
    fn test_display() {
        let w = SearchWindow::new(50.0, 1500.0, 2.0).unwrap();
        assert_eq!(format!("{}", w), "[50.0, 1500.0] m/s, step 2.0 m/s");
    }
}
