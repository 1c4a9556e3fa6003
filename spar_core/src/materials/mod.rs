//! # Materials Data
//!
//! Empirical allowable stresses and buckling curves for the aluminum alloys
//! used in the spar: 7075 sheet (web, stiffener), 7075 extrusion
//! (compression flange), 2024-T3511 extrusion (tension flange), and AD/DD
//! rivets.
//!
//! ## Sources
//!
//! All values are literal control points read from the handbook charts and
//! tables; none are re-fit. Allowables keyed by thickness are step tables
//! ([`allowables`]); the non-dimensional crippling, shear-buckling, and
//! inter-rivet-buckling relations are interpolated or closed-form curves
//! ([`curve_fits`]); S-N fatigue data lives in [`fatigue`].
//!
//! ## Example
//!
//! ```rust
//! use spar_core::materials::{allowables, E_ALUMINUM_MPA};
//!
//! let f_su = allowables::web_shear_ultimate_mpa(2.03).unwrap();
//! assert!(f_su > 280.0 && f_su < 320.0);
//! assert!(E_ALUMINUM_MPA > 70_000.0);
//! ```

pub mod allowables;
pub mod curve_fits;
pub mod fatigue;

pub use allowables::{
    compression_flange_yield_mpa, stiffener_compression_yield_mpa, tension_flange_ultimate_mpa,
    web_shear_ultimate_mpa, RIVET_FSU_AD_MPA, RIVET_FSU_DD_MPA,
};
pub use curve_fits::{
    crippling_ratio, crippling_stress_mpa, inter_rivet_buckling_mpa, required_inertia_fraction,
    shear_buckling_coefficient,
};
pub use fatigue::{FatigueAssessment, SnCurve};

use crate::units::KSI_TO_MPA;

/// Young's modulus of the aluminum members (7075/2024 families) in MPa
pub const E_ALUMINUM_MPA: f64 = 10.3e3 * KSI_TO_MPA;
