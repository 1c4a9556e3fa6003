//! # Rivet Joints
//!
//! The two riveted joints of the spar cross-section: web-to-flange and
//! web-to-stiffener. Both are checked for rivet shear and for the hole
//! loss they inflict on the web.
//!
//! The web-to-flange pitch is a design input (a pitch/diameter ratio).
//! The web-to-stiffener pitch is *derived*: candidates are scanned from
//! the loose end `6D` toward the tight end `4D`, and the first pitch whose
//! inter-rivet-buckling allowable clears the stiffener crippling stress is
//! selected, keeping the joint as sparse as the web permits.

use serde::{Deserialize, Serialize};

use crate::components::stiffener::Stiffener;
use crate::components::web::Web;
use crate::curves::Lookup;
use crate::errors::{SparError, SparResult};
use crate::materials::{self, RIVET_FSU_AD_MPA};

/// Empirical web-to-stiffener load transfer constant [MPa]
const STIFFENER_RIVET_K_MPA: f64 = 172.0;

/// Number of candidate pitches scanned between 6D and 4D
const PITCH_SEARCH_SAMPLES: usize = 100;

/// Single-rivet ultimate shear allowable [N]: `pi/4 * D^2 * F_su`
pub fn shear_allowable_n(diameter_mm: f64) -> f64 {
    std::f64::consts::FRAC_PI_4 * diameter_mm.powi(2) * RIVET_FSU_AD_MPA
}

/// Rivet row joining the web to both flanges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebFlangeRivets {
    /// Rivet diameter [mm]
    pub diameter_mm: f64,
    /// Rivet pitch along the flange [mm]
    pub pitch_mm: f64,
    /// Number of rivet rows sharing the shear flow
    pub rows: u32,
}

impl WebFlangeRivets {
    /// Build a flange rivet row from a pitch/diameter ratio (typically
    /// 4 to 6)
    pub fn new(diameter_mm: f64, pitch_to_diameter: f64, rows: u32) -> SparResult<WebFlangeRivets> {
        if diameter_mm <= 0.0 {
            return Err(SparError::invalid_input(
                "diameter_mm",
                diameter_mm.to_string(),
                "Rivet diameter must be positive",
            ));
        }
        if pitch_to_diameter <= 1.0 {
            return Err(SparError::invalid_input(
                "pitch_to_diameter",
                pitch_to_diameter.to_string(),
                "Pitch must exceed the rivet diameter",
            ));
        }
        if rows < 1 {
            return Err(SparError::invalid_input(
                "rows",
                rows.to_string(),
                "At least one rivet row is required",
            ));
        }
        Ok(WebFlangeRivets {
            diameter_mm,
            pitch_mm: diameter_mm * pitch_to_diameter,
            rows,
        })
    }

    /// Allowable shear load per rivet [N]
    pub fn shear_allowable_n(&self) -> f64 {
        shear_allowable_n(self.diameter_mm)
    }

    /// Applied shear load per rivet P_s [N]
    pub fn shear_load_n(&self, sf_n: f64, he_mm: f64) -> f64 {
        let q = sf_n / he_mm;
        q * self.pitch_mm / self.rows as f64
    }

    /// Margin of safety on rivet shear
    pub fn margin_of_safety(&self, sf_n: f64, he_mm: f64) -> f64 {
        self.shear_allowable_n() / self.shear_load_n(sf_n, he_mm) - 1.0
    }

    /// Margin of safety on the web hole loss at this rivet line
    pub fn hole_loss_margin(&self, web: &Web, sf_n: f64, he_mm: f64) -> Lookup {
        web.hole_loss_margin(self.pitch_mm, self.diameter_mm, sf_n, he_mm)
    }
}

/// Rivet row joining the web to a stiffener, with a derived pitch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebStiffenerRivets {
    /// Rivet diameter [mm]
    pub diameter_mm: f64,
    /// Selected pitch, or `None` when no candidate between 6D and 4D
    /// clears the stiffener crippling stress
    pub pitch_mm: Option<f64>,
}

impl WebStiffenerRivets {
    /// Build a stiffener rivet row, deriving the pitch.
    ///
    /// Scans 100 evenly spaced candidates from `6D` down to `4D` and
    /// selects the first whose inter-rivet-buckling allowable at
    /// `pitch / t_web` exceeds the stiffener crippling stress. An
    /// undefined crippling stress or an exhausted scan leaves the pitch
    /// unset; the rib evaluation reports it as a diagnostic.
    pub fn new(
        diameter_mm: f64,
        stiffener: &Stiffener,
        web: &Web,
    ) -> SparResult<WebStiffenerRivets> {
        if diameter_mm <= 0.0 {
            return Err(SparError::invalid_input(
                "diameter_mm",
                diameter_mm.to_string(),
                "Rivet diameter must be positive",
            ));
        }
        let pitch_mm = decide_pitch(diameter_mm, stiffener, web);
        Ok(WebStiffenerRivets {
            diameter_mm,
            pitch_mm,
        })
    }

    /// Allowable shear load per rivet [N]
    pub fn shear_allowable_n(&self) -> f64 {
        shear_allowable_n(self.diameter_mm)
    }

    /// Rivet load P_f transferred from the stiffener [N].
    ///
    /// `P_f = (K * A_s / d_c) * pitch` with the stiffener spacing `d_c`
    /// equal to the web panel width.
    pub fn rivet_load_n(&self, stiffener: &Stiffener, web: &Web) -> Option<f64> {
        let pitch = self.pitch_mm?;
        Some(STIFFENER_RIVET_K_MPA * stiffener.area_mm2() / web.panel_width_mm() * pitch)
    }

    /// Margin of safety on rivet shear, `None` when the pitch is unset
    pub fn margin_of_safety(&self, stiffener: &Stiffener, web: &Web) -> Option<f64> {
        let pf = self.rivet_load_n(stiffener, web)?;
        Some(self.shear_allowable_n() / pf - 1.0)
    }

    /// Margin of safety on the web hole loss, `None` when the pitch is
    /// unset
    pub fn hole_loss_margin(&self, web: &Web, sf_n: f64, he_mm: f64) -> Option<Lookup> {
        let pitch = self.pitch_mm?;
        Some(web.hole_loss_margin(pitch, self.diameter_mm, sf_n, he_mm))
    }

    /// Inter-rivet-buckling allowable at the selected pitch [MPa]
    pub fn inter_rivet_buckling(&self, web: &Web) -> Option<Lookup> {
        let pitch = self.pitch_mm?;
        Some(materials::inter_rivet_buckling_mpa(pitch / web.thickness_mm))
    }
}

/// Scan candidate pitches from 6D down to 4D for the loosest one whose
/// inter-rivet-buckling allowable exceeds the stiffener crippling stress
fn decide_pitch(diameter_mm: f64, stiffener: &Stiffener, web: &Web) -> Option<f64> {
    let fcc = stiffener.crippling_stress().ok()?;
    let loose = 6.0 * diameter_mm;
    let tight = 4.0 * diameter_mm;
    for i in 0..PITCH_SEARCH_SAMPLES {
        let t = i as f64 / (PITCH_SEARCH_SAMPLES - 1) as f64;
        let pitch = loose + (tight - loose) * t;
        match materials::inter_rivet_buckling_mpa(pitch / web.thickness_mm) {
            Ok(fir) if fir > fcc => return Some(pitch),
            _ => continue,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::ksi_to_mpa;

    fn test_web() -> Web {
        Web::new(625.0, 1000.0, 3, 2.03).unwrap()
    }

    fn test_stiffener() -> Stiffener {
        Stiffener::new(2.03, 20.0, 20.0).unwrap()
    }

    #[test]
    fn test_shear_allowable_formula() {
        // P_allow = pi/4 * D^2 * F_su(AD) for a -4 rivet
        let p = shear_allowable_n(3.175);
        let expected = std::f64::consts::FRAC_PI_4 * 3.175 * 3.175 * ksi_to_mpa(30.0);
        assert!((p - expected).abs() < 1e-9);
        // Around 1.64 kN
        assert!(p > 1600.0 && p < 1680.0);
    }

    #[test]
    fn test_flange_rivets_validation() {
        assert!(WebFlangeRivets::new(0.0, 4.0, 2).is_err());
        assert!(WebFlangeRivets::new(3.175, 0.5, 2).is_err());
        assert!(WebFlangeRivets::new(3.175, 4.0, 0).is_err());
    }

    #[test]
    fn test_flange_rivet_loads() {
        let rivets = WebFlangeRivets::new(6.35, 4.0, 2).unwrap();
        assert!((rivets.pitch_mm - 25.4).abs() < 1e-12);

        let ps = rivets.shear_load_n(32_117.0, 297.0);
        let expected = 32_117.0 / 297.0 * 25.4 / 2.0;
        assert!((ps - expected).abs() < 1e-9);

        let ms = rivets.margin_of_safety(32_117.0, 297.0);
        assert!((ms - (rivets.shear_allowable_n() / ps - 1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_flange_rivet_hole_loss_delegates_to_web() {
        let web = test_web();
        let rivets = WebFlangeRivets::new(6.35, 4.0, 2).unwrap();
        let direct = web.hole_loss_margin(rivets.pitch_mm, 6.35, 32_117.0, 297.0);
        let via = rivets.hole_loss_margin(&web, 32_117.0, 297.0);
        assert_eq!(direct, via);
    }

    #[test]
    fn test_pitch_search_returns_loosest() {
        // F_ir at 6D (p/t = 9.4, about 67.5 ksi) is far above the
        // stiffener crippling stress, so the scan stops immediately
        let web = test_web();
        let stiffener = test_stiffener();
        let rivets = WebStiffenerRivets::new(3.175, &stiffener, &web).unwrap();
        assert!((rivets.pitch_mm.unwrap() - 6.0 * 3.175).abs() < 1e-9);
    }

    #[test]
    fn test_pitch_search_failure_reported() {
        // A stocky stiffener in the flat crippling regime: F_cc well
        // above anything the inter-rivet chart allows down to 4D
        let web = test_web();
        let stocky = Stiffener::new(5.0, 10.0, 10.0).unwrap();
        let fcc = stocky.crippling_stress().unwrap();
        assert!(fcc > ksi_to_mpa(68.0));

        let rivets = WebStiffenerRivets::new(3.175, &stocky, &web).unwrap();
        assert_eq!(rivets.pitch_mm, None);
        assert!(rivets.margin_of_safety(&stocky, &web).is_none());
        assert!(rivets.hole_loss_margin(&web, 32_117.0, 297.0).is_none());
    }

    #[test]
    fn test_stiffener_rivet_load() {
        let web = test_web();
        let stiffener = test_stiffener();
        let rivets = WebStiffenerRivets::new(3.175, &stiffener, &web).unwrap();
        let pf = rivets.rivet_load_n(&stiffener, &web).unwrap();
        let expected =
            172.0 * stiffener.area_mm2() / web.panel_width_mm() * rivets.pitch_mm.unwrap();
        assert!((pf - expected).abs() < 1e-9);

        let ms = rivets.margin_of_safety(&stiffener, &web).unwrap();
        assert!((ms - (rivets.shear_allowable_n() / pf - 1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_tighter_pitch_selected_when_crippling_rises() {
        // A slender stiffener leg puts F_cc around 60 ksi, between the
        // allowables at 6D and 4D: the scan must walk past the loose
        // candidates whose F_ir falls short and stop strictly inside
        // the range
        let web = test_web();
        let stiffener = Stiffener::new(2.03, 15.0, 20.0).unwrap();
        let fcc = stiffener.crippling_stress().unwrap();
        assert!(fcc > ksi_to_mpa(58.0) && fcc < ksi_to_mpa(63.0));

        let rivets = WebStiffenerRivets::new(6.35, &stiffener, &web).unwrap();
        let pitch = rivets.pitch_mm.unwrap();
        assert!(pitch < 6.0 * 6.35 - 0.5);
        assert!(pitch >= 4.0 * 6.35 - 1e-9);
        let fir = rivets.inter_rivet_buckling(&web).unwrap().unwrap();
        assert!(fir > fcc);
    }

    #[test]
    fn test_rivet_serialization() {
        let web = test_web();
        let rivets = WebStiffenerRivets::new(3.175, &test_stiffener(), &web).unwrap();
        let json = serde_json::to_string(&rivets).unwrap();
        let roundtrip: WebStiffenerRivets = serde_json::from_str(&json).unwrap();
        assert_eq!(rivets, roundtrip);
    }
}
