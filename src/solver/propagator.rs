//! Characteristic function of the layered half-space.
//!
//! Propagates a compound-matrix state vector from the bottom half-space
//! up through the layer stack at a trial phase velocity and angular
//! frequency. The surface value is the dispersion-relation residual: it
//! changes sign across a modal phase velocity, which is what the root
//! finder brackets.
//!
//! # Mathematical Background
//!
//! The displacement-stress field of a Rayleigh wave in a stack of
//! homogeneous elastic layers satisfies a two-point boundary problem
//! solved by layer-matrix propagation (Thomson 1950, Haskell 1953).
//! Propagating the 4x4 layer matrices directly loses precision at high
//! frequency because growing and decaying exponentials mix. The
//! delta-matrix form (Dunkin 1965) propagates the five independent 2x2
//! subdeterminants instead and stays well conditioned.
//!
//! The state carries 5 components for the value alone, or 10 and 15
//! when derivative blocks are propagated alongside. Evanescent layers
//! use scaled hyperbolic forms: the accumulated normalizer `noq`
//! removes the common cosh growth factor of each layer, and a final
//! rescaling by [`EPS`] caps the state magnitude at [`BIG`].
//!
//! References: Dunkin (1965), J. Geophys. Res. 70; Saito (1988),
//! DISPER80 normal-mode package.

use thiserror::Error;

use crate::model::LayeredModel;

// ============================================================
// Constants
// ============================================================

/// Seed scale for the half-space state vector.
pub const EPS: f64 = f64::EPSILON;

/// Magnitude cap for the propagated state; larger states are rescaled.
pub const BIG: f64 = 1e11;

// ============================================================
// Types
// ============================================================

/// Which derivative blocks to propagate with the state vector.
///
/// The value block is always carried. Each additional block roughly
/// doubles the per-layer work, so the root finder scans with
/// [`DerivativeOrder::Value`] and reserves the larger states for the
/// final evaluation at the root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum DerivativeOrder {
    /// Characteristic value only (5 components).
    Value,
    /// Value plus its phase-velocity derivative (10 components).
    PhaseVelocity,
    /// Value plus phase-velocity and frequency derivatives (15 components).
    Frequency,
}

/// Error type for characteristic-function evaluation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolverError {
    /// Trial phase velocity at or above the half-space shear velocity
    #[error(
        "no Rayleigh root at phase velocity {phase_velocity} m/s: \
         at or above half-space vs {vs} m/s"
    )]
    NoRootBelowHalfspace { phase_velocity: f64, vs: f64 },

    /// Liquid layer above the bottom half-space
    #[error(
        "layer {index} is liquid (vs = 0); \
         liquid layers above the half-space are not supported"
    )]
    LiquidLayerAboveHalfspace { index: usize },
}

/// Surface output of one characteristic evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharacteristicOutput {
    /// Normalizing component at the surface
    pub reference: f64,
    /// Dispersion-relation residual; changes sign across a modal
    /// phase velocity
    pub value: f64,
    /// Horizontal over vertical surface displacement ratio, when the
    /// surface is solid and the value is not sentinel-saturated
    pub ellipticity: Option<f64>,
}

// ============================================================
// Evaluation
// ============================================================

/// Evaluate the characteristic function at a trial phase velocity.
///
/// Seeds the state vector in the bottom half-space, applies each layer
/// matrix from the bottom up and extracts the surface residual.
///
/// # Arguments
///
/// * `model` - Validated layered model
/// * `phase_velocity` - Trial phase velocity (m/s)
/// * `angular_frequency` - Angular frequency (rad/s)
/// * `order` - Derivative blocks to carry through the recursion
///
/// # Errors
///
/// Fails when the trial velocity reaches the shear velocity of a solid
/// half-space (the surface-wave pole region ends there) or when a layer
/// above the half-space is liquid.
pub fn evaluate_characteristic(
    model: &LayeredModel,
    phase_velocity: f64,
    angular_frequency: f64,
    order: DerivativeOrder,
) -> Result<CharacteristicOutput, SolverError> {
    let c = phase_velocity;
    let cc = c * c;
    let wn = angular_frequency / c;
    let need_dc = order >= DerivativeOrder::PhaseVelocity;
    let need_dw = order >= DerivativeOrder::Frequency;

    let last = model.layer_count() - 1;
    let mut y = [0.0_f64; 15];

    // ------------------------------------------------------------
    // Half-space seed
    // ------------------------------------------------------------
    let ro = model.density(last);
    let roc = ro * cc;
    let mut sv = model.vs(last);
    let cp = c / model.vp(last);
    let raa = (1.0 + cp) * (1.0 - cp);
    let ra = raa.sqrt();

    let liquid_bottom = sv <= 0.0;
    if liquid_bottom {
        y[0] = ra * EPS;
        y[1] = -roc * EPS;
        if need_dc {
            y[2] = -cp * cp * EPS / ra;
            y[3] = -2.0 * roc * EPS;
        }
    } else {
        if c >= sv {
            return Err(SolverError::NoRootBelowHalfspace {
                phase_velocity: c,
                vs: sv,
            });
        }
        let cs = c / sv;
        let rbb = (1.0 + cs) * (1.0 - cs);
        let rb = rbb.sqrt();
        let rg = 2.0 * ro * sv * sv;
        y[2] = -ra * EPS;
        y[3] = -rb * EPS;
        y[1] = -EPS * (cp * cp * rbb + cs * cs) / (roc * (ra * rb + 1.0));
        y[0] = rg * y[1] + EPS;
        y[4] = -rg * (y[0] + EPS) + roc * EPS;
        if need_dc {
            y[7] = EPS * cp * cp / ra;
            y[8] = EPS * cs * cs / rb;
            y[6] = -(rb * y[7] + ra * y[8]) / roc - 2.0 * y[1];
            y[5] = rg * y[6];
            y[9] = -rg * y[5] + EPS * roc * 2.0;
        }
    }

    // Components participating in the final rescale
    let jx = match (liquid_bottom, order) {
        (true, DerivativeOrder::Value) => 2,
        (true, DerivativeOrder::PhaseVelocity) => 4,
        (true, DerivativeOrder::Frequency) => 6,
        (false, DerivativeOrder::Value) => 5,
        (false, DerivativeOrder::PhaseVelocity) => 10,
        (false, DerivativeOrder::Frequency) => 15,
    };

    // ------------------------------------------------------------
    // Layer recursion, bottom up
    // ------------------------------------------------------------
    for i in (0..last).rev() {
        let ro = model.density(i);
        let roc = ro * cc;
        let pv = model.vp(i);
        sv = model.vs(i);
        if sv <= 0.0 {
            return Err(SolverError::LiquidLayerAboveHalfspace { index: i });
        }

        let z = y;
        let r2 = 1.0 / roc;
        let cp = c / pv;
        let raa = (1.0 + cp) * (1.0 - cp);
        let cs = c / sv;
        let rbb = (1.0 + cs) * (1.0 - cs);
        let hk = model.thickness(i) * wn;
        let hkk = hk * hk;

        // P pass then S pass; noq accumulates the removed cosh factors
        let mut noq = 1.0;
        let (cha, sha, dha) = hyperbolic_pass(raa * hkk, hk, hkk, need_dc, &mut noq);
        let (chb, shb, dhb) = hyperbolic_pass(rbb * hkk, hk, hkk, need_dc, &mut noq);

        // Value block
        let g1 = 2.0 / cs / cs;
        let rg = g1 * roc;
        let r4 = rg - roc;
        let e1 = cha * chb;
        let e2 = e1 - noq;
        let e3 = sha * shb;
        let e5 = sha * chb;
        let e6 = shb * cha;
        let f1 = e2 - e3;
        let f2 = r2 * f1;
        let f3 = g1 * f1 + e3;
        let b33 = e1;
        let b34 = raa * e3;
        let b43 = rbb * e3;
        let b25 = -r2 * (f2 + r2 * (e2 - raa * b43));
        let b15 = rg * b25 + f2;
        let b16 = -rg * b15 - f3;
        let b22 = b16 + e1;
        let b12 = rg * b16 - r4 * f3;
        let b52 = -rg * b12 + r4 * (rg * f3 + r4 * e3);
        let b23 = r2 * (e5 - rbb * e6);
        let b13 = rg * b23 - e5;
        let b42 = -rg * b13 + r4 * e5;
        let b24 = r2 * (e6 - raa * e5);
        let b14 = rg * b24 - e6;
        let b32 = -rg * b14 + r4 * e6;
        let b11 = noq - b16 - b16;
        let b21 = b15 + b15;
        let b31 = b14 + b14;
        let b41 = b13 + b13;
        let b51 = b12 + b12;

        y[0] = b11 * z[0] + b12 * z[1] + b13 * z[2] + b14 * z[3] + b15 * z[4];
        y[1] = b21 * z[0] + b22 * z[1] + b23 * z[2] + b24 * z[3] + b25 * z[4];
        y[2] = b31 * z[0] + b32 * z[1] + b33 * z[2] + b34 * z[3] + b24 * z[4];
        y[3] = b41 * z[0] + b42 * z[1] + b43 * z[2] + b33 * z[3] + b23 * z[4];
        y[4] = b51 * z[0] + b52 * z[1] + b42 * z[2] + b32 * z[3] + b22 * z[4];

        if need_dc {
            // Phase-velocity derivative block
            let raac = -2.0 * cp * cp;
            let rbbc = -2.0 * cs * cs;
            let r1c = roc + roc;
            let e1c = -hk * (e5 + e6);
            let e3c = -e3 - e3 - hk * (dha * shb + dhb * sha);
            let e5c = -e5 - hk * (dha * chb + e3);
            let e6c = -e6 - hk * (dhb * cha + e3);
            let f1c = e1c - e3c;
            let f2c = r2 * (f1c - f1 - f1);
            let f3c = g1 * (f1c - f1 - f1) + e3c;
            let c33 = e1c;
            let c34 = raa * e3c + raac * e3;
            let c43 = rbb * e3c + rbbc * e3;
            let c25 = -r2 * (f2c + r2 * (e1c - raa * c43 - raac * b43))
                - 2.0 * (b25 + b25 + r2 * f2);
            let c15 = rg * c25 + f2c;
            let c16 = -rg * c15 - f3c;
            let c22 = c16 + e1c;
            let c12 = rg * c16 + r1c * f3 - r4 * f3c;
            let c52 = -rg * c12 + r4 * (rg * f3c + r4 * e3c) - r1c * (rg * f3 + 2.0 * r4 * e3);
            let c23 = r2 * (e5c - rbb * e6c - rbbc * e6) - b23 - b23;
            let c13 = rg * c23 - e5c;
            let c42 = -rg * c13 + r4 * e5c - r1c * e5;
            let c24 = r2 * (e6c - raa * e5c - raac * e5) - b24 - b24;
            let c14 = rg * c24 - e6c;
            let c32 = -rg * c14 + r4 * e6c - r1c * e6;
            let c11 = -c16 - c16;
            let c21 = c15 + c15;
            let c31 = c14 + c14;
            let c41 = c13 + c13;
            let c51 = c12 + c12;

            y[5] = b11 * z[5] + b12 * z[6] + b13 * z[7] + b14 * z[8] + b15 * z[9]
                + c11 * z[0] + c12 * z[1] + c13 * z[2] + c14 * z[3] + c15 * z[4];
            y[6] = b21 * z[5] + b22 * z[6] + b23 * z[7] + b24 * z[8] + b25 * z[9]
                + c21 * z[0] + c22 * z[1] + c23 * z[2] + c24 * z[3] + c25 * z[4];
            y[7] = b31 * z[5] + b32 * z[6] + b33 * z[7] + b34 * z[8] + b24 * z[9]
                + c31 * z[0] + c32 * z[1] + c33 * z[2] + c34 * z[3] + c24 * z[4];
            y[8] = b41 * z[5] + b42 * z[6] + b43 * z[7] + b33 * z[8] + b23 * z[9]
                + c41 * z[0] + c42 * z[1] + c43 * z[2] + c33 * z[3] + c23 * z[4];
            y[9] = b51 * z[5] + b52 * z[6] + b42 * z[7] + b32 * z[8] + b22 * z[9]
                + c51 * z[0] + c52 * z[1] + c42 * z[2] + c32 * z[3] + c22 * z[4];

            if need_dw {
                // Frequency derivative block
                let e1w = hk * (raa * e5 + rbb * e6);
                let e3w = hk * (e5 + e6);
                let e5w = hk * (e1 + b43);
                let e6w = hk * (e1 + b34);
                let f1w = e1w - e3w;
                let f2w = r2 * f1w;
                let f3w = g1 * f1w + e3w;
                let w33 = e1w;
                let w34 = raa * e3w;
                let w43 = rbb * e3w;
                let w25 = -r2 * (f2w + r2 * (e1w - raa * w43));
                let w15 = rg * w25 + f2w;
                let w16 = -rg * w15 - f3w;
                let w22 = w16 + e1w;
                let w12 = rg * w16 - r4 * f3w;
                let w52 = -rg * w12 + r4 * (rg * f3w + r4 * e3w);
                let w23 = r2 * (e5w - rbb * e6w);
                let w13 = rg * w23 - e5w;
                let w42 = -rg * w13 + r4 * e5w;
                let w24 = r2 * (e6w - raa * e5w);
                let w14 = rg * w24 - e6w;
                let w32 = -rg * w14 + r4 * e6w;
                let w11 = -w16 - w16;
                let w21 = w15 + w15;
                let w31 = w14 + w14;
                let w41 = w13 + w13;
                let w51 = w12 + w12;

                y[10] = b11 * z[10] + b12 * z[11] + b13 * z[12] + b14 * z[13] + b15 * z[14]
                    + w11 * z[0] + w12 * z[1] + w13 * z[2] + w14 * z[3] + w15 * z[4];
                y[11] = b21 * z[10] + b22 * z[11] + b23 * z[12] + b24 * z[13] + b25 * z[14]
                    + w21 * z[0] + w22 * z[1] + w23 * z[2] + w24 * z[3] + w25 * z[4];
                y[12] = b31 * z[10] + b32 * z[11] + b33 * z[12] + b34 * z[13] + b24 * z[14]
                    + w31 * z[0] + w32 * z[1] + w33 * z[2] + w34 * z[3] + w24 * z[4];
                y[13] = b41 * z[10] + b42 * z[11] + b43 * z[12] + b33 * z[13] + b23 * z[14]
                    + w41 * z[0] + w42 * z[1] + w43 * z[2] + w33 * z[3] + w23 * z[4];
                y[14] = b51 * z[10] + b52 * z[11] + b42 * z[12] + b32 * z[13] + b22 * z[14]
                    + w51 * z[0] + w52 * z[1] + w42 * z[2] + w32 * z[3] + w22 * z[4];
            }
        }
    }

    // ------------------------------------------------------------
    // Rescale and extract the surface residual
    // ------------------------------------------------------------
    let mut peak = 0.0_f64;
    for &v in &y[..jx] {
        peak = peak.max(v.abs());
    }
    if peak > BIG {
        for v in &mut y[..jx] {
            *v *= EPS;
        }
    }

    if sv <= 0.0 {
        // Liquid surface
        let reference = y[0];
        let value = if y[1].abs() * EPS <= y[0].abs() {
            y[1] / y[0].abs()
        } else {
            signed_big(y[1])
        };
        Ok(CharacteristicOutput {
            reference,
            value,
            ellipticity: None,
        })
    } else {
        // Solid surface
        let reference = y[2];
        if y[4].abs() * EPS <= y[2].abs() {
            Ok(CharacteristicOutput {
                reference,
                value: y[4] / y[2].abs(),
                ellipticity: Some(-y[0] / y[2]),
            })
        } else {
            Ok(CharacteristicOutput {
                reference,
                value: signed_big(y[4]),
                ellipticity: None,
            })
        }
    }
}

// ============================================================
// Kernels
// ============================================================

/// One hyperbolic pass of the layer recursion.
///
/// For argument `xx = r * hk^2` returns `(ch, hk * sh, dh)` where `ch`
/// and `sh` are cosh(sqrt(xx)) and sinh(sqrt(xx))/sqrt(xx) continued to
/// negative arguments as cos and sin. Evanescent arguments are scaled:
/// `ch` is held at 1 and the removed cosh factor is folded into `noq`,
/// with arguments beyond 100 zeroing it outright.
fn hyperbolic_pass(xx: f64, hk: f64, hkk: f64, need_dh: bool, noq: &mut f64) -> (f64, f64, f64) {
    let aa = xx.abs();
    let ch;
    let sh;
    let mut dh = 0.0;
    if aa <= 1.0 {
        sh = sh0(xx);
        let s4 = sh0(xx / 4.0);
        ch = 1.0 + xx * s4 * s4 / 2.0;
        if need_dh {
            dh = sh1(xx) * hkk;
        }
    } else {
        let root = aa.sqrt();
        if xx <= 0.0 {
            ch = root.cos();
            sh = root.sin() / root;
        } else {
            if root > 100.0 {
                *noq = 0.0;
            } else {
                *noq /= root.cosh();
            }
            ch = 1.0;
            sh = root.tanh() / root;
        }
        if need_dh {
            dh = (hkk / xx) * (ch - sh);
        }
    }
    (ch, hk * sh, dh)
}

/// Series kernel for sinh(sqrt(x))/sqrt(x) on |x| <= 1.
///
/// Negative arguments give sin(sqrt(-x))/sqrt(-x).
fn sh0(x: f64) -> f64 {
    1.0 + x
        * (1.666666666666667e-1
            + x * (8.333333333334e-3
                + x * (1.984126984127e-4
                    + x * (2.7557319189e-6
                        + x * (2.50121084e-8 + x * (1.605961e-10 + x * 7.647e-13))))))
}

/// Series kernel for (cosh(sqrt(x)) - sinh(sqrt(x))/sqrt(x)) / x on |x| <= 1.
fn sh1(x: f64) -> f64 {
    3.333333333333333e-1
        + x * (3.33333333333333e-2
            + x * (1.1904761904762e-3
                + x * (2.20458553792e-5
                    + x * (2.505210837e-7
                        + x * (1.9270853e-9 + x * (1.07063e-11 + x * 4.50e-14))))))
}

/// Overflow sentinel with the sign of `v`.
///
/// Strictly negative values select [-BIG]; zero (either sign) and
/// positive values select [BIG], so `-0.0` maps to the positive branch.
fn signed_big(v: f64) -> f64 {
    if v < 0.0 {
        -BIG
    } else {
        BIG
    }
}
