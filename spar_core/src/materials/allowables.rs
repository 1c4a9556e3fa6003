//! # Thickness-Keyed Allowable Stresses
//!
//! Step-table lookups of material allowables by member thickness, read from
//! the alloy property tables. Thicknesses are tabulated in inches; the
//! lookups take millimeters and convert.
//!
//! Each table reproduces the published breakpoints and the original
//! boundary ownership (inclusive vs. strict upper bounds differ between
//! tables and are kept as published). Outside the tabulated range the
//! lookup returns [`OutOfDomain`](crate::curves::OutOfDomain) rather than
//! extrapolating.

use crate::curves::{Bound, Lookup, OutOfDomain};
use crate::units::{ksi_to_mpa, mm_to_inch};

/// AD rivet ultimate shear allowable in MPa
pub const RIVET_FSU_AD_MPA: f64 = 30.0 * crate::units::KSI_TO_MPA;

/// DD rivet ultimate shear allowable in MPa
pub const RIVET_FSU_DD_MPA: f64 = 41.0 * crate::units::KSI_TO_MPA;

/// Ultimate shear allowable F_su for 7075 sheet (web material), by web
/// thickness in mm.
///
/// Breakpoints (inches, inclusive upper bounds): 0.011 minimum gauge,
/// then 42 ksi to 0.039, 42 ksi to 0.062, 44 ksi to 0.187, 45 ksi to
/// 0.249.
pub fn web_shear_ultimate_mpa(thickness_mm: f64) -> Lookup {
    let t = mm_to_inch(thickness_mm);
    if t <= 0.011 {
        Err(OutOfDomain {
            curve: "web F_su (7075 sheet)",
            bound: Bound::BelowMin,
            value: t,
        })
    } else if t <= 0.039 {
        Ok(ksi_to_mpa(42.0))
    } else if t <= 0.062 {
        Ok(ksi_to_mpa(42.0))
    } else if t <= 0.187 {
        Ok(ksi_to_mpa(44.0))
    } else if t <= 0.249 {
        Ok(ksi_to_mpa(45.0))
    } else {
        Err(OutOfDomain {
            curve: "web F_su (7075 sheet)",
            bound: Bound::AboveMax,
            value: t,
        })
    }
}

/// Compressive yield allowable F_cy for 7075 sheet (stiffener material),
/// by stiffener thickness in mm.
pub fn stiffener_compression_yield_mpa(thickness_mm: f64) -> Lookup {
    let t = mm_to_inch(thickness_mm);
    if t < 0.012 {
        Err(OutOfDomain {
            curve: "stiffener F_cy (7075)",
            bound: Bound::BelowMin,
            value: t,
        })
    } else if t < 0.040 {
        Ok(ksi_to_mpa(61.0))
    } else if t < 0.062 {
        Ok(ksi_to_mpa(62.0))
    } else if t < 0.187 {
        Ok(ksi_to_mpa(64.0))
    } else if t < 0.249 {
        Ok(ksi_to_mpa(65.0))
    } else {
        Err(OutOfDomain {
            curve: "stiffener F_cy (7075)",
            bound: Bound::AboveMax,
            value: t,
        })
    }
}

/// Compressive yield allowable F_cy for 7075 extrusion (compression
/// flange), by flange thickness in mm.
pub fn compression_flange_yield_mpa(thickness_mm: f64) -> Lookup {
    let t = mm_to_inch(thickness_mm);
    if t < 0.499 {
        Ok(ksi_to_mpa(68.0))
    } else if t < 5.000 {
        Ok(ksi_to_mpa(69.0))
    } else {
        Err(OutOfDomain {
            curve: "compression flange F_cy (7075 extrusion)",
            bound: Bound::AboveMax,
            value: t,
        })
    }
}

/// Ultimate tension allowable F_tu for 2024-T3511 extrusion (tension
/// flange), by flange thickness in mm.
pub fn tension_flange_ultimate_mpa(thickness_mm: f64) -> Lookup {
    let t = mm_to_inch(thickness_mm);
    if t < 0.249 {
        Ok(ksi_to_mpa(57.0))
    } else if t < 0.499 {
        Ok(ksi_to_mpa(60.0))
    } else if t < 0.749 {
        Ok(ksi_to_mpa(60.0))
    } else if t < 1.499 {
        Ok(ksi_to_mpa(65.0))
    } else if t < 2.999 {
        Ok(ksi_to_mpa(70.0))
    } else if t < 4.499 {
        Ok(ksi_to_mpa(70.0))
    } else {
        Err(OutOfDomain {
            curve: "tension flange F_tu (2024-T3511)",
            bound: Bound::AboveMax,
            value: t,
        })
    }
}
