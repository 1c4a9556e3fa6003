//! # Shear Web
//!
//! The web panel of the front spar between two rib stations. Stiffeners
//! divide the bay into `division_count` panels; strength is checked on the
//! inboard panel, approximated as a rectangle using the larger (inboard)
//! spar height.

use serde::{Deserialize, Serialize};

use crate::curves::Lookup;
use crate::errors::{SparError, SparResult};
use crate::loads::front_spar_height_mm;
use crate::materials::{self, E_ALUMINUM_MPA};

/// Shear web panel between two rib stations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Web {
    /// Inboard (smaller STA) edge of the bay [mm]
    pub y_left_mm: f64,
    /// Outboard edge of the bay [mm]
    pub y_right_mm: f64,
    /// Number of panels the stiffeners divide the bay into
    pub division_count: u32,
    /// Web sheet thickness [mm]
    pub thickness_mm: f64,
    /// Front-spar height at the inboard edge [mm]
    pub spar_height_mm: f64,
}

impl Web {
    /// Build a web for a rib bay, taking the spar height from the standard
    /// height profile at the inboard station.
    pub fn new(
        y_left_mm: f64,
        y_right_mm: f64,
        division_count: u32,
        thickness_mm: f64,
    ) -> SparResult<Web> {
        Web::with_spar_height(
            y_left_mm,
            y_right_mm,
            division_count,
            thickness_mm,
            front_spar_height_mm(y_left_mm),
        )
    }

    /// Build a web with an explicit spar height (alternative height
    /// profiles, tests).
    pub fn with_spar_height(
        y_left_mm: f64,
        y_right_mm: f64,
        division_count: u32,
        thickness_mm: f64,
        spar_height_mm: f64,
    ) -> SparResult<Web> {
        if y_right_mm <= y_left_mm {
            return Err(SparError::invalid_input(
                "y_right_mm",
                y_right_mm.to_string(),
                "Bay must extend outboard of its left station",
            ));
        }
        if division_count < 1 {
            return Err(SparError::invalid_input(
                "division_count",
                division_count.to_string(),
                "At least one panel is required",
            ));
        }
        if thickness_mm <= 0.0 {
            return Err(SparError::invalid_input(
                "thickness_mm",
                thickness_mm.to_string(),
                "Web thickness must be positive",
            ));
        }
        if spar_height_mm <= 0.0 {
            return Err(SparError::invalid_input(
                "spar_height_mm",
                spar_height_mm.to_string(),
                "Spar height must be positive",
            ));
        }
        Ok(Web {
            y_left_mm,
            y_right_mm,
            division_count,
            thickness_mm,
            spar_height_mm,
        })
    }

    /// Panel width between stiffeners [mm]
    pub fn panel_width_mm(&self) -> f64 {
        (self.y_right_mm - self.y_left_mm) / self.division_count as f64
    }

    /// Maximum shear flow in the web [N/m].
    ///
    /// `sf` is the front-spar shear [N], `he` the flange centroid
    /// distance [mm].
    pub fn shear_flow(&self, sf_n: f64, he_mm: f64) -> f64 {
        sf_n / he_mm * 1000.0
    }

    /// Web shear stress f_s [MPa]
    pub fn shear_stress(&self, sf_n: f64, he_mm: f64) -> f64 {
        sf_n / (he_mm * self.thickness_mm)
    }

    /// Shear-buckling coefficient k for the inboard panel
    pub fn buckling_coefficient(&self) -> Lookup {
        materials::shear_buckling_coefficient(self.spar_height_mm, self.panel_width_mm())
    }

    /// Initial shear-buckling allowable F_scr [MPa]
    pub fn shear_buckling_allowable(&self) -> Lookup {
        let k = self.buckling_coefficient()?;
        let ratio = self.thickness_mm / self.panel_width_mm();
        Ok(k * E_ALUMINUM_MPA * ratio * ratio)
    }

    /// Ultimate shear allowable F_su from the sheet gauge table [MPa]
    pub fn ultimate_shear_allowable(&self) -> Lookup {
        materials::web_shear_ultimate_mpa(self.thickness_mm)
    }

    /// Margin of safety against web shear.
    ///
    /// The allowable is the lesser of the buckling and ultimate values.
    pub fn margin_of_safety(&self, sf_n: f64, he_mm: f64) -> Lookup {
        let f_scr = self.shear_buckling_allowable()?;
        let f_su = self.ultimate_shear_allowable()?;
        Ok(f_su.min(f_scr) / self.shear_stress(sf_n, he_mm) - 1.0)
    }

    /// Net-section shear stress at a rivet line f_sj [MPa].
    ///
    /// `pitch` and `diameter` describe the fastener row through the web.
    pub fn net_section_shear_stress(
        &self,
        pitch_mm: f64,
        diameter_mm: f64,
        sf_n: f64,
        he_mm: f64,
    ) -> f64 {
        self.shear_stress(sf_n, he_mm) * pitch_mm / (pitch_mm - diameter_mm)
    }

    /// Margin of safety against hole loss at a rivet line
    pub fn hole_loss_margin(
        &self,
        pitch_mm: f64,
        diameter_mm: f64,
        sf_n: f64,
        he_mm: f64,
    ) -> Lookup {
        let f_su = self.ultimate_shear_allowable()?;
        Ok(f_su / self.net_section_shear_stress(pitch_mm, diameter_mm, sf_n, he_mm) - 1.0)
    }

    /// Sheet volume of the bay [cm^3].
    ///
    /// The tapered bay is approximated by the mean of the edge heights.
    pub fn volume_cm3(&self) -> f64 {
        let mean_height =
            (front_spar_height_mm(self.y_left_mm) + front_spar_height_mm(self.y_right_mm)) / 2.0;
        self.thickness_mm * mean_height * (self.y_right_mm - self.y_left_mm) / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::ksi_to_mpa;

    fn test_web() -> Web {
        Web::new(625.0, 1000.0, 3, 2.03).unwrap()
    }

    #[test]
    fn test_geometry() {
        let web = test_web();
        assert!((web.panel_width_mm() - 125.0).abs() < 1e-9);
        assert!((web.spar_height_mm - 320.0).abs() < 1e-9);
    }

    #[test]
    fn test_validation() {
        assert!(Web::new(1000.0, 625.0, 3, 2.03).is_err());
        assert!(Web::new(625.0, 1000.0, 0, 2.03).is_err());
        assert!(Web::new(625.0, 1000.0, 3, 0.0).is_err());
        assert!(Web::new(625.0, 1000.0, 3, -1.0).is_err());
    }

    #[test]
    fn test_shear_flow_and_stress() {
        let web = test_web();
        let q = web.shear_flow(38_429.0, 297.0);
        assert!((q - 38_429.0 / 297.0 * 1000.0).abs() < 1e-6);

        let fs = web.shear_stress(38_429.0, 297.0);
        assert!((fs - 38_429.0 / (297.0 * 2.03)).abs() < 1e-9);
    }

    #[test]
    fn test_buckling_allowable() {
        let web = test_web();
        // aspect ratio 320/125 = 2.56, k between 5.3 and 5.8
        let k = web.buckling_coefficient().unwrap();
        assert!(k > 5.3 && k < 5.8);

        let f_scr = web.shear_buckling_allowable().unwrap();
        let expected = k * E_ALUMINUM_MPA * (2.03 / 125.0) * (2.03 / 125.0);
        assert!((f_scr - expected).abs() < 1e-9);
    }

    #[test]
    fn test_ultimate_allowable_band() {
        // 2.03 mm = 0.0799 in, in the 44 ksi band
        let web = test_web();
        let f_su = web.ultimate_shear_allowable().unwrap();
        assert!((f_su - ksi_to_mpa(44.0)).abs() < 1e-9);
    }

    #[test]
    fn test_margin_of_safety() {
        let web = test_web();
        let ms = web.margin_of_safety(38_429.0, 297.0).unwrap();
        let f_scr = web.shear_buckling_allowable().unwrap();
        let f_su = web.ultimate_shear_allowable().unwrap();
        let fs = web.shear_stress(38_429.0, 297.0);
        assert!((ms - (f_su.min(f_scr) / fs - 1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_aspect_ratio_out_of_range() {
        // 1-panel bay over a long span pushes the aspect ratio past 12
        let web = Web::with_spar_height(625.0, 1000.0, 30, 2.03, 320.0).unwrap();
        assert!(web.buckling_coefficient().is_err());
        assert!(web.margin_of_safety(38_429.0, 297.0).is_err());
    }

    #[test]
    fn test_hole_loss() {
        let web = test_web();
        let pitch = 19.05;
        let d = 3.175;
        let fs = web.shear_stress(32_117.0, 297.0);
        let fsj = web.net_section_shear_stress(pitch, d, 32_117.0, 297.0);
        assert!((fsj - fs * pitch / (pitch - d)).abs() < 1e-9);
        // Net section stress exceeds gross stress
        assert!(fsj > fs);
        let hole_ms = web.hole_loss_margin(pitch, d, 32_117.0, 297.0).unwrap();
        let f_su = web.ultimate_shear_allowable().unwrap();
        assert!((hole_ms - (f_su / fsj - 1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_volume_increases_with_thickness() {
        let thin = test_web();
        let thick = Web::new(625.0, 1000.0, 3, 2.29).unwrap();
        assert!(thick.volume_cm3() > thin.volume_cm3());
        // Mean of 320 and 305.2 over a 375 mm bay
        let expected = 2.03 * (320.0 + front_spar_height_mm(1000.0)) / 2.0 * 375.0 / 1000.0;
        assert!((thin.volume_cm3() - expected).abs() < 1e-9);
    }
}
