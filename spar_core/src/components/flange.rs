//! # Spar Flanges
//!
//! The L-section flanges at the top and bottom of the spar. Under the spar
//! bending moment the flange pair forms a force couple over the centroid
//! distance `he`; each flange carries the couple force as nearly uniform
//! axial stress.
//!
//! The upper (compression) flange is 7075 extrusion checked against local
//! crippling; the lower (tension) flange is 2024-T3511 checked against
//! ultimate tension. Both share the same section geometry.

use serde::{Deserialize, Serialize};

use crate::curves::Lookup;
use crate::errors::{SparError, SparResult};
use crate::materials::{self, FatigueAssessment, SnCurve};

/// Effective web contribution to the flange area, as a multiple of the
/// web thickness squared
const WEB_CONTRIBUTION_FACTOR: f64 = 30.0;

/// Shared L-section geometry of a spar flange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlangeSection {
    /// Flange thickness [mm]
    pub thickness_mm: f64,
    /// Bottom-leg length bf1 [mm]
    pub bottom_mm: f64,
    /// Upstanding-leg length bf2 [mm]
    pub height_mm: f64,
}

impl FlangeSection {
    /// Build a flange section, validating the geometry
    pub fn new(thickness_mm: f64, bottom_mm: f64, height_mm: f64) -> SparResult<FlangeSection> {
        if thickness_mm <= 0.0 {
            return Err(SparError::invalid_input(
                "thickness_mm",
                thickness_mm.to_string(),
                "Flange thickness must be positive",
            ));
        }
        if bottom_mm <= thickness_mm || height_mm <= thickness_mm {
            return Err(SparError::invalid_input(
                "bottom_mm/height_mm",
                format!("{}/{}", bottom_mm, height_mm),
                "Flange legs must be longer than the thickness",
            ));
        }
        Ok(FlangeSection {
            thickness_mm,
            bottom_mm,
            height_mm,
        })
    }

    /// Effective area carrying the couple force [mm^2].
    ///
    /// Includes the empirical effective-web strip `30 * t_web^2`.
    pub fn area_mm2(&self, web_thickness_mm: f64) -> f64 {
        (self.bottom_mm + self.height_mm) * self.thickness_mm
            + WEB_CONTRIBUTION_FACTOR * web_thickness_mm.powi(2)
    }

    /// Metal area of the L-section alone, for mass estimates [mm^2]
    pub fn metal_area_mm2(&self) -> f64 {
        (self.bottom_mm + self.height_mm) * self.thickness_mm - self.thickness_mm.powi(2)
    }

    /// Centroid offset from the spar outer surface [mm].
    ///
    /// Equal-area axis of the L-section. Two branches: the axis falls
    /// either inside the bottom leg or up the standing leg, depending on
    /// how the area splits.
    pub fn centroid_offset_mm(&self) -> f64 {
        let t = self.thickness_mm;
        let half_area = (self.bottom_mm + self.height_mm) * t / 2.0;
        let bottom_area = (self.bottom_mm + t / 2.0) * t;
        let residual = half_area - bottom_area;
        if residual < 0.0 {
            half_area / (self.bottom_mm + t / 2.0)
        } else {
            t + residual / t
        }
    }

    /// Couple force in the flange from the spar moment [N].
    ///
    /// `moment` in N*m, `he` in mm.
    pub fn axial_force_n(&self, moment_nm: f64, he_mm: f64) -> f64 {
        moment_nm / he_mm * 1000.0
    }

    /// Axial stress in the flange [MPa]
    pub fn stress_mpa(&self, moment_nm: f64, he_mm: f64, web_thickness_mm: f64) -> f64 {
        self.axial_force_n(moment_nm, he_mm) / self.area_mm2(web_thickness_mm)
    }

    /// Extruded volume over a rib bay [cm^3]
    pub fn volume_cm3(&self, bay_span_mm: f64) -> f64 {
        self.metal_area_mm2() * bay_span_mm / 1000.0
    }
}

/// Upper spar flange, 7075 extrusion, checked against crippling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionFlange {
    /// Section geometry
    pub section: FlangeSection,
}

impl CompressionFlange {
    /// Build a compression flange
    pub fn new(thickness_mm: f64, bottom_mm: f64, height_mm: f64) -> SparResult<CompressionFlange> {
        Ok(CompressionFlange {
            section: FlangeSection::new(thickness_mm, bottom_mm, height_mm)?,
        })
    }

    /// Compressive yield allowable F_cy [MPa]
    pub fn compressive_yield(&self) -> Lookup {
        materials::compression_flange_yield_mpa(self.section.thickness_mm)
    }

    /// Chart abscissa `sqrt(F_cy/E) * (b/t)` for the crippling lookup
    pub fn nondim_x(&self) -> Lookup {
        let fcy = self.compressive_yield()?;
        Ok((fcy / materials::E_ALUMINUM_MPA).sqrt()
            * (self.section.bottom_mm / self.section.thickness_mm))
    }

    /// Crippling allowable F_cc [MPa]
    pub fn crippling_stress(&self) -> Lookup {
        let fcy = self.compressive_yield()?;
        materials::crippling_stress_mpa(
            fcy,
            self.section.bottom_mm / self.section.thickness_mm,
        )
    }

    /// Margin of safety: F_cc / f_c - 1
    pub fn margin_of_safety(&self, moment_nm: f64, he_mm: f64, web_thickness_mm: f64) -> Lookup {
        let fcc = self.crippling_stress()?;
        Ok(fcc / self.section.stress_mpa(moment_nm, he_mm, web_thickness_mm) - 1.0)
    }

    /// Spectrum fatigue assessment at the flange's peak stress
    pub fn fatigue(&self, peak_stress_mpa: f64) -> FatigueAssessment {
        FatigueAssessment::assess(SnCurve::CompressionFlange, peak_stress_mpa)
    }
}

/// Lower spar flange, 2024-T3511 extrusion, checked against ultimate
/// tension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensionFlange {
    /// Section geometry
    pub section: FlangeSection,
}

impl TensionFlange {
    /// Build a tension flange
    pub fn new(thickness_mm: f64, bottom_mm: f64, height_mm: f64) -> SparResult<TensionFlange> {
        Ok(TensionFlange {
            section: FlangeSection::new(thickness_mm, bottom_mm, height_mm)?,
        })
    }

    /// Ultimate tension allowable F_tu [MPa]
    pub fn ultimate_tension(&self) -> Lookup {
        materials::tension_flange_ultimate_mpa(self.section.thickness_mm)
    }

    /// Margin of safety: F_tu / f_t - 1
    pub fn margin_of_safety(&self, moment_nm: f64, he_mm: f64, web_thickness_mm: f64) -> Lookup {
        let ftu = self.ultimate_tension()?;
        Ok(ftu / self.section.stress_mpa(moment_nm, he_mm, web_thickness_mm) - 1.0)
    }

    /// Spectrum fatigue assessment at the flange's peak stress
    pub fn fatigue(&self, peak_stress_mpa: f64) -> FatigueAssessment {
        FatigueAssessment::assess(SnCurve::TensionFlange, peak_stress_mpa)
    }
}
