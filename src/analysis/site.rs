//! Time-averaged shear velocity and ASCE site classification.
//!
//! Vs30, the travel-time average of the shear velocity over the top
//! 30 m, is the standard site parameter of the building codes. The
//! classification tables of ASCE 7-16 and ASCE 7-22 are expressed in
//! ft/s with strictly-greater threshold comparisons, so a value exactly
//! at a boundary belongs to the lower (slower) class.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::model::LayeredModel;

/// Feet per meter, for the ft/s threshold tables.
pub const FT_PER_M: f64 = 3.28084;

// ============================================================
// Time-averaged shear velocity
// ============================================================

/// Travel-time averaged shear velocity from the surface to a depth.
///
/// Sums thickness over shear slowness layer by layer, truncating the
/// last layer to the remaining depth. A model shallower than
/// `target_depth` is averaged over the available column instead.
///
/// # Example
///
/// ```
/// use disper_rs::{time_averaged_vs, LayeredModel, SearchWindow};
///
/// let window = SearchWindow::new(50.0, 1500.0, 2.0).unwrap();
/// let model = LayeredModel::new(
///     vec![30.0, 70.0],
///     vec![2.0, 2.0],
///     vec![1316.0, 2200.0],
///     vec![760.0, 1270.0],
///     window,
/// )
/// .unwrap();
///
/// // The top 30 m is a single uniform layer
/// assert_eq!(time_averaged_vs(&model, 30.0), 760.0);
/// ```
pub fn time_averaged_vs(model: &LayeredModel, target_depth: f64) -> f64 {
    let mut remaining = target_depth;
    let mut travel_length = 0.0;
    let mut travel_time = 0.0;
    for i in 0..model.layer_count() {
        let t = model.thickness(i).min(remaining);
        travel_length += t;
        travel_time += t / model.vs(i);
        remaining -= t;
        if remaining <= 0.0 {
            break;
        }
    }
    travel_length / travel_time
}

/// Vs30: travel-time averaged shear velocity over the top 30 m.
pub fn vs30(model: &LayeredModel) -> f64 {
    time_averaged_vs(model, 30.0)
}

// ============================================================
// ASCE site classes
// ============================================================

/// ASCE 7 edition selecting a site-class threshold table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AsceEdition {
    /// ASCE 7-16, five classes A through E
    Asce7_16,
    /// ASCE 7-22, eight classes with the intermediate BC/CD/DE bands
    Asce7_22,
}

impl fmt::Display for AsceEdition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsceEdition::Asce7_16 => write!(f, "ASCE 7-16"),
            AsceEdition::Asce7_22 => write!(f, "ASCE 7-22"),
        }
    }
}

/// Unrecognized ASCE edition string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown ASCE edition: {0:?}")]
pub struct UnknownEdition(pub String);

impl FromStr for AsceEdition {
    type Err = UnknownEdition;

    /// Parse an edition name, accepting display form ("ASCE 7-16") and
    /// key form ("asce_7_16") in any case, with spaces and hyphens
    /// interchangeable with underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "asce_7_16" => Ok(AsceEdition::Asce7_16),
            "asce_7_22" => Ok(AsceEdition::Asce7_22),
            _ => Err(UnknownEdition(s.to_string())),
        }
    }
}

/// ASCE 7 site class, hardest (A) to softest (E).
///
/// The derived ordering follows the declaration: a faster site compares
/// less than a slower one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SiteClass {
    A,
    B,
    BC,
    C,
    CD,
    D,
    DE,
    E,
}

impl fmt::Display for SiteClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SiteClass::A => "A",
            SiteClass::B => "B",
            SiteClass::BC => "BC",
            SiteClass::C => "C",
            SiteClass::CD => "CD",
            SiteClass::D => "D",
            SiteClass::DE => "DE",
            SiteClass::E => "E",
        };
        write!(f, "{}", s)
    }
}

/// Site class for a Vs30 in m/s.
pub fn site_class(edition: AsceEdition, vs30_m_per_s: f64) -> SiteClass {
    site_class_from_ft(edition, vs30_m_per_s * FT_PER_M)
}

/// Site class for a Vs30 already expressed in ft/s.
///
/// All comparisons are strictly greater, so a velocity exactly at a
/// table boundary falls into the lower class.
pub fn site_class_from_ft(edition: AsceEdition, vs30_ft_per_s: f64) -> SiteClass {
    let v = vs30_ft_per_s;
    match edition {
        AsceEdition::Asce7_16 => {
            if v > 5000.0 {
                SiteClass::A
            } else if v > 2500.0 {
                SiteClass::B
            } else if v > 1200.0 {
                SiteClass::C
            } else if v > 600.0 {
                SiteClass::D
            } else {
                SiteClass::E
            }
        }
        AsceEdition::Asce7_22 => {
            if v > 5000.0 {
                SiteClass::A
            } else if v > 3000.0 {
                SiteClass::B
            } else if v > 2100.0 {
                SiteClass::BC
            } else if v > 1450.0 {
                SiteClass::C
            } else if v > 1000.0 {
                SiteClass::CD
            } else if v > 700.0 {
                SiteClass::D
            } else if v > 500.0 {
                SiteClass::DE
            } else {
                SiteClass::E
            }
        }
    }
}

/// String-keyed site classification.
///
/// Returns `None` for an unrecognized edition string, mirroring the
/// behavior of table-driven callers.
pub fn site_class_for_version(version: &str, vs30_m_per_s: f64) -> Option<SiteClass> {
    version
        .parse::<AsceEdition>()
        .ok()
        .map(|edition| site_class(edition, vs30_m_per_s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SearchWindow;

    fn window() -> SearchWindow {
        SearchWindow::new(50.0, 1500.0, 2.0).unwrap()
    }

    #[test]
    fn test_vs30_single_layer() {
        let model = LayeredModel::new(
            vec![40.0],
            vec![2.0],
            vec![1316.0],
            vec![760.0],
            window(),
        )
        .unwrap();
        assert_eq!(vs30(&model), 760.0);
    }

    #[test]
    fn test_vs30_spanning_a_boundary() {
        let model = LayeredModel::new(
            vec![20.0, 80.0],
            vec![2.0, 2.0],
            vec![519.6, 1039.2],
            vec![300.0, 600.0],
            window(),
        )
        .unwrap();
        // 30 m = 20 m at 300 m/s plus 10 m at 600 m/s
        let expected = 30.0 / (20.0 / 300.0 + 10.0 / 600.0);
        let got = time_averaged_vs(&model, 30.0);
        assert!(
            (got - expected).abs() < 1e-9,
            "vs30 {} differs from hand value {}",
            got,
            expected
        );
    }

    #[test]
    fn test_shallow_model_averages_available_column() {
        let model = LayeredModel::new(
            vec![10.0, 5.0],
            vec![2.0, 2.0],
            vec![346.4, 519.6],
            vec![200.0, 300.0],
            window(),
        )
        .unwrap();
        // Only 15 m of column exists below the surface
        let expected = 15.0 / (10.0 / 200.0 + 5.0 / 300.0);
        let got = time_averaged_vs(&model, 30.0);
        assert!((got - expected).abs() < 1e-9);
    }

    #[test]
    fn test_edition_parsing() {
        assert_eq!("asce_7_16".parse::<AsceEdition>(), Ok(AsceEdition::Asce7_16));
        assert_eq!("ASCE 7-22".parse::<AsceEdition>(), Ok(AsceEdition::Asce7_22));
        assert_eq!("Asce-7-16".parse::<AsceEdition>(), Ok(AsceEdition::Asce7_16));
        assert!("asce_7_10".parse::<AsceEdition>().is_err());
        assert_eq!(format!("{}", AsceEdition::Asce7_22), "ASCE 7-22");
    }

    #[test]
    fn test_site_class_tables_in_ft() {
        use AsceEdition::{Asce7_16, Asce7_22};
        use SiteClass::*;

        assert_eq!(site_class_from_ft(Asce7_16, 5001.0), A);
        assert_eq!(site_class_from_ft(Asce7_16, 5000.0), B);
        assert_eq!(site_class_from_ft(Asce7_16, 2500.0), C);
        assert_eq!(site_class_from_ft(Asce7_16, 1200.0), D);
        assert_eq!(site_class_from_ft(Asce7_16, 600.0), E);

        assert_eq!(site_class_from_ft(Asce7_22, 5000.5), A);
        assert_eq!(site_class_from_ft(Asce7_22, 5000.0), B);
        assert_eq!(site_class_from_ft(Asce7_22, 3000.0), BC);
        assert_eq!(site_class_from_ft(Asce7_22, 2100.0), C);
        assert_eq!(site_class_from_ft(Asce7_22, 1450.0), CD);
        assert_eq!(site_class_from_ft(Asce7_22, 1000.0), D);
        assert_eq!(site_class_from_ft(Asce7_22, 700.0), DE);
        assert_eq!(site_class_from_ft(Asce7_22, 500.0), E);
        assert_eq!(site_class_from_ft(Asce7_22, 499.0), E);
    }

    #[test]
    fn test_site_class_in_m_per_s() {
        // 760 m/s is 2493.4 ft/s
        assert_eq!(site_class(AsceEdition::Asce7_16, 760.0), SiteClass::C);
        assert_eq!(site_class(AsceEdition::Asce7_22, 760.0), SiteClass::BC);
    }

    #[test]
    fn test_site_class_for_version() {
        assert_eq!(
            site_class_for_version("asce_7_16", 760.0),
            Some(SiteClass::C)
        );
        assert_eq!(
            site_class_for_version("ASCE 7-22", 760.0),
            Some(SiteClass::BC)
        );
        assert_eq!(site_class_for_version("ibc_2018", 760.0), None);
    }

    #[test]
    fn test_class_ordering_tracks_stiffness() {
        assert!(SiteClass::A < SiteClass::B);
        assert!(SiteClass::BC < SiteClass::C);
        assert!(SiteClass::DE < SiteClass::E);
    }
}
