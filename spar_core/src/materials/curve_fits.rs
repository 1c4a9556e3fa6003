//! # Non-Dimensional Buckling Curves
//!
//! The chart-derived relations shared by several components: the crippling
//! curve for thin-walled open sections, the flat-panel shear-buckling
//! coefficient, the inter-rivet-buckling allowable, and the required
//! stiffener-inertia fraction.

use crate::curves::{Bound, Lookup, OutOfDomain, PiecewiseLinear};
use crate::materials::E_ALUMINUM_MPA;
use crate::units::{ksi_to_mpa, mpa_to_ksi};

/// Lower edge of the crippling chart
const CRIPPLING_X_MIN: f64 = 0.1;

/// Upper edge of the crippling chart
const CRIPPLING_X_MAX: f64 = 10.0;

/// Shear-buckling coefficient k vs. panel aspect ratio `max(a/b, b/a)`
static SHEAR_BUCKLING_K: PiecewiseLinear = PiecewiseLinear::new(
    "shear buckling k",
    &[
        (0.9, 11.0),
        (1.0, 8.0),
        (1.2, 7.0),
        (1.5, 6.2),
        (2.0, 5.8),
        (3.0, 5.3),
        (4.0, 5.1),
        (5.0, 5.0),
        (8.0, 4.8),
        (12.0, 4.8),
    ],
);

/// Inter-rivet buckling allowable F_ir [ksi] vs. pitch/thickness ratio
static INTER_RIVET_BUCKLING_KSI: PiecewiseLinear = PiecewiseLinear::new(
    "inter-rivet buckling F_ir",
    &[
        (9.0, 68.0),
        (12.0, 64.0),
        (16.0, 60.0),
        (20.0, 56.0),
        (23.0, 50.0),
        (28.0, 45.0),
        (30.0, 40.0),
        (33.0, 32.0),
        (35.0, 30.0),
        (40.0, 23.0),
        (48.0, 16.0),
        (60.0, 10.0),
        (80.0, 6.0),
    ],
);

/// Required stiffener inertia as a fraction of `he * t_web^3`, vs. `he/de`
static REQUIRED_INERTIA_FRACTION: PiecewiseLinear = PiecewiseLinear::new(
    "required stiffener inertia fraction",
    &[
        (0.0, 0.0),
        (1.0, 0.1),
        (1.5, 0.6),
        (2.0, 1.5),
        (2.5, 2.5),
        (3.0, 3.7),
        (3.5, 4.8),
        (4.0, 6.2),
    ],
);

/// Crippling-stress ratio `F_cc / F_cy` from the non-dimensional chart.
///
/// Input is `x = sqrt(F_cy / E) * (b / t)`. Three regimes:
/// a flat segment below `x0 = 0.1 * 5^(27/33)`, the power law
/// `10^-0.20761 * x^-0.78427` up to 10, and undefined beyond the chart.
pub fn crippling_ratio(x: f64) -> Lookup {
    let x0 = 0.1 * 5f64.powf(27.0 / 33.0);
    if !(x >= CRIPPLING_X_MIN) {
        Err(OutOfDomain {
            curve: "crippling F_cc/F_cy",
            bound: Bound::BelowMin,
            value: x,
        })
    } else if x < x0 {
        Ok(0.5 * 2f64.powf(2.2 / 1.5))
    } else if x < CRIPPLING_X_MAX {
        Ok(10f64.powf(-0.20761) * x.powf(-0.78427))
    } else {
        Err(OutOfDomain {
            curve: "crippling F_cc/F_cy",
            bound: Bound::AboveMax,
            value: x,
        })
    }
}

/// Crippling allowable F_cc in MPa for an L-section leg.
///
/// `fcy_mpa` is the member's compressive yield allowable and `b_over_t`
/// the slenderness of the attached leg. The chart multiplies in ksi, so
/// the yield value converts out and the product converts back.
pub fn crippling_stress_mpa(fcy_mpa: f64, b_over_t: f64) -> Lookup {
    let x = (fcy_mpa / E_ALUMINUM_MPA).sqrt() * b_over_t;
    let ratio = crippling_ratio(x)?;
    Ok(ksi_to_mpa(ratio * mpa_to_ksi(fcy_mpa)))
}

/// Shear-buckling coefficient k for a flat panel.
///
/// `a` and `b` are the panel edge lengths; the chart abscissa is the
/// aspect ratio with the longer edge on top, undefined beyond 12.
pub fn shear_buckling_coefficient(a: f64, b: f64) -> Lookup {
    let mut ratio = a / b;
    if ratio < 1.0 {
        ratio = 1.0 / ratio;
    }
    SHEAR_BUCKLING_K.eval(ratio)
}

/// Inter-rivet buckling allowable in MPa at a pitch/thickness ratio
pub fn inter_rivet_buckling_mpa(pitch_over_thickness: f64) -> Lookup {
    Ok(ksi_to_mpa(
        INTER_RIVET_BUCKLING_KSI.eval(pitch_over_thickness)?,
    ))
}

/// Required stiffener-inertia fraction at `he/de`.
///
/// Above 4 the chart ends; the caller treats that as "no stiffener
/// requirement applies" rather than a failure.
pub fn required_inertia_fraction(he_over_de: f64) -> Lookup {
    REQUIRED_INERTIA_FRACTION.eval(he_over_de)
}
