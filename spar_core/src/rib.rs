//! # Rib Aggregate
//!
//! One rib bay of the front spar: the web, its stiffener, the compression
//! and tension flanges, and the two rivet joints, evaluated together
//! against the spar loads at the bay's inboard station.
//!
//! ## Construction
//!
//! [`RibBuilder`] collects the six components and only yields an immutable
//! [`Rib`] once all of them are present, so the flange-centroid distance
//! `he` can never be read before both flanges exist. The stiffener rivet
//! pitch search also runs at build time, since it needs both the web and
//! the stiffener.
//!
//! ## Verdict policy
//!
//! [`MarginSet::passes`] is the conjunction of all *computed* margins
//! being non-negative. A margin whose allowable fell outside its handbook
//! chart is reported as not-applicable and excluded from the conjunction;
//! in particular a `he/de` ratio above the stiffener chart means "no
//! stiffener requirement applies", not "stiffener failed". Every
//! not-applicable margin is surfaced as a diagnostic so the exclusion is
//! visible.
//!
//! ## Example
//!
//! ```rust
//! use spar_core::loads::StationTable;
//! use spar_core::rib::RibBuilder;
//!
//! let stations = StationTable::standard_wing();
//! let rib = RibBuilder::new(&stations, 0).unwrap()
//!     .web(2.03, 3).unwrap()
//!     .stiffener(2.03, 20.0, 20.0).unwrap()
//!     .compression_flange(6.0, 34.5, 34.5).unwrap()
//!     .tension_flange(6.6, 36.0, 42.5).unwrap()
//!     .stiffener_rivets(3.175).unwrap()
//!     .flange_rivets(6.35, 4.0, 2).unwrap()
//!     .build().unwrap();
//!
//! let result = rib.evaluate(38_429.0, 74_623.0);
//! println!("he = {:.1} mm, pass = {}", result.he_mm, result.margins.passes());
//! ```

use serde::{Deserialize, Serialize};

use crate::components::{
    CompressionFlange, Stiffener, TensionFlange, Web, WebFlangeRivets, WebStiffenerRivets,
};
use crate::curves::{Bound, Lookup, OutOfDomain};
use crate::errors::{SparError, SparResult};
use crate::loads::{SpanwiseLoads, StationTable};

/// Effective alloy density used for mass estimates [g/cm^3]
pub const EFFECTIVE_DENSITY_G_CM3: f64 = 3.0;

/// Why a margin could not be computed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NaCause {
    /// An empirical curve was evaluated outside its tabulated domain
    OutOfTable {
        /// Curve name
        curve: String,
        /// Which end of the table was missed
        bound: Bound,
        /// The offending input
        value: f64,
    },
    /// The stiffener rivet-pitch search found no satisfying pitch
    RivetPitchUndefined,
}

impl From<OutOfDomain> for NaCause {
    fn from(err: OutOfDomain) -> Self {
        NaCause::OutOfTable {
            curve: err.curve.to_string(),
            bound: err.bound,
            value: err.value,
        }
    }
}

/// One margin of safety, or the reason it does not apply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarginValue {
    /// Margin of safety `allowable / applied - 1`
    Computed(f64),
    /// The check does not apply at this geometry
    NotApplicable(NaCause),
}

impl MarginValue {
    fn from_lookup(lookup: Lookup) -> MarginValue {
        match lookup {
            Ok(ms) => MarginValue::Computed(ms),
            Err(err) => MarginValue::NotApplicable(err.into()),
        }
    }

    /// The computed margin, if the check applies
    pub fn value(&self) -> Option<f64> {
        match self {
            MarginValue::Computed(ms) => Some(*ms),
            MarginValue::NotApplicable(_) => None,
        }
    }

    /// Whether this margin blocks the overall verdict
    pub fn is_failing(&self) -> bool {
        matches!(self, MarginValue::Computed(ms) if *ms < 0.0)
    }
}

/// The eight margins of a rib evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginSet {
    /// Web shear: min(F_su, F_scr) / f_s - 1
    pub web_shear: MarginValue,
    /// Stiffener column stability: I / I_req - 1
    pub stiffener_stability: MarginValue,
    /// Compression flange crippling: F_cc / f_c - 1
    pub compression_flange_crippling: MarginValue,
    /// Tension flange ultimate: F_tu / f_t - 1
    pub tension_flange_ultimate: MarginValue,
    /// Stiffener rivet shear: P_allow / P_f - 1
    pub stiffener_rivet_shear: MarginValue,
    /// Web hole loss at the stiffener rivet line
    pub stiffener_rivet_hole_loss: MarginValue,
    /// Flange rivet shear: P_allow / P_s - 1
    pub flange_rivet_shear: MarginValue,
    /// Web hole loss at the flange rivet line
    pub flange_rivet_hole_loss: MarginValue,
}

impl MarginSet {
    /// All margins with their report names
    pub fn entries(&self) -> [(&'static str, &MarginValue); 8] {
        [
            ("web shear", &self.web_shear),
            ("stiffener stability", &self.stiffener_stability),
            (
                "compression flange crippling",
                &self.compression_flange_crippling,
            ),
            ("tension flange ultimate", &self.tension_flange_ultimate),
            ("stiffener rivet shear", &self.stiffener_rivet_shear),
            (
                "stiffener rivet hole loss",
                &self.stiffener_rivet_hole_loss,
            ),
            ("flange rivet shear", &self.flange_rivet_shear),
            ("flange rivet hole loss", &self.flange_rivet_hole_loss),
        ]
    }

    /// Overall verdict: every computed margin is non-negative.
    ///
    /// Not-applicable margins are excluded from the conjunction.
    pub fn passes(&self) -> bool {
        self.entries().iter().all(|(_, m)| !m.is_failing())
    }

    /// The smallest computed margin and its name, if any check applied
    pub fn governing(&self) -> Option<(&'static str, f64)> {
        self.entries()
            .iter()
            .filter_map(|(name, m)| m.value().map(|ms| (*name, ms)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

/// Non-fatal conditions collected during an evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// The stiffener rivet-pitch search between 6D and 4D found no pitch
    /// whose inter-rivet-buckling allowable clears the crippling stress
    RivetPitchSearchFailed {
        /// Rivet diameter the search ran for [mm]
        diameter_mm: f64,
    },
    /// A margin was excluded from the verdict as not applicable
    MarginNotApplicable {
        /// Report name of the margin
        margin: String,
        /// Why it did not apply
        cause: NaCause,
    },
}

/// Result of evaluating one rib against its spar loads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RibEvaluation {
    /// Front-spar shear at the inboard station [N]
    pub sf_n: f64,
    /// Front-spar bending moment at the inboard station [N*m]
    pub mf_nm: f64,
    /// Flange centroid-to-centroid distance [mm]
    pub he_mm: f64,
    /// The eight margins
    pub margins: MarginSet,
    /// Structural mass of the bay [kg]
    pub mass_kg: f64,
    /// Collected non-fatal conditions
    pub diagnostics: Vec<Diagnostic>,
}

/// One rib bay with all six components, ready to evaluate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rib {
    /// Bay index in the station table
    pub station_index: usize,
    /// Inboard station [mm]
    pub y_left_mm: f64,
    /// Outboard station [mm]
    pub y_right_mm: f64,
    web: Web,
    stiffener: Stiffener,
    compression_flange: CompressionFlange,
    tension_flange: TensionFlange,
    stiffener_rivets: WebStiffenerRivets,
    flange_rivets: WebFlangeRivets,
    he_mm: f64,
}

impl Rib {
    /// Flange centroid-to-centroid distance [mm]
    pub fn he_mm(&self) -> f64 {
        self.he_mm
    }

    /// The web panel
    pub fn web(&self) -> &Web {
        &self.web
    }

    /// The stiffener
    pub fn stiffener(&self) -> &Stiffener {
        &self.stiffener
    }

    /// The compression flange
    pub fn compression_flange(&self) -> &CompressionFlange {
        &self.compression_flange
    }

    /// The tension flange
    pub fn tension_flange(&self) -> &TensionFlange {
        &self.tension_flange
    }

    /// The web-to-stiffener rivet row
    pub fn stiffener_rivets(&self) -> &WebStiffenerRivets {
        &self.stiffener_rivets
    }

    /// The web-to-flange rivet row
    pub fn flange_rivets(&self) -> &WebFlangeRivets {
        &self.flange_rivets
    }

    /// Structural mass of the bay [kg]: component volumes times the
    /// effective density
    pub fn total_mass_kg(&self) -> f64 {
        let span = self.y_right_mm - self.y_left_mm;
        let volume_cm3 = self.web.volume_cm3()
            + self.stiffener.volume_cm3(&self.web)
            + self.compression_flange.section.volume_cm3(span)
            + self.tension_flange.section.volume_cm3(span);
        volume_cm3 * EFFECTIVE_DENSITY_G_CM3 / 1000.0
    }

    /// Evaluate all eight margins against a shear / moment pair
    pub fn evaluate(&self, sf_n: f64, mf_nm: f64) -> RibEvaluation {
        let he = self.he_mm;
        let web_t = self.web.thickness_mm;

        let margins = MarginSet {
            web_shear: MarginValue::from_lookup(self.web.margin_of_safety(sf_n, he)),
            stiffener_stability: MarginValue::from_lookup(
                self.stiffener.margin_of_safety(he, &self.web),
            ),
            compression_flange_crippling: MarginValue::from_lookup(
                self.compression_flange.margin_of_safety(mf_nm, he, web_t),
            ),
            tension_flange_ultimate: MarginValue::from_lookup(
                self.tension_flange.margin_of_safety(mf_nm, he, web_t),
            ),
            stiffener_rivet_shear: match self
                .stiffener_rivets
                .margin_of_safety(&self.stiffener, &self.web)
            {
                Some(ms) => MarginValue::Computed(ms),
                None => MarginValue::NotApplicable(NaCause::RivetPitchUndefined),
            },
            stiffener_rivet_hole_loss: match self
                .stiffener_rivets
                .hole_loss_margin(&self.web, sf_n, he)
            {
                Some(lookup) => MarginValue::from_lookup(lookup),
                None => MarginValue::NotApplicable(NaCause::RivetPitchUndefined),
            },
            flange_rivet_shear: MarginValue::Computed(
                self.flange_rivets.margin_of_safety(sf_n, he),
            ),
            flange_rivet_hole_loss: MarginValue::from_lookup(
                self.flange_rivets.hole_loss_margin(&self.web, sf_n, he),
            ),
        };

        let mut diagnostics = Vec::new();
        if self.stiffener_rivets.pitch_mm.is_none() {
            diagnostics.push(Diagnostic::RivetPitchSearchFailed {
                diameter_mm: self.stiffener_rivets.diameter_mm,
            });
        }
        for (name, margin) in margins.entries() {
            if let MarginValue::NotApplicable(cause) = margin {
                diagnostics.push(Diagnostic::MarginNotApplicable {
                    margin: name.to_string(),
                    cause: cause.clone(),
                });
            }
        }

        RibEvaluation {
            sf_n,
            mf_nm,
            he_mm: he,
            margins,
            mass_kg: self.total_mass_kg(),
            diagnostics,
        }
    }

    /// Evaluate against a load provider at the inboard station
    pub fn evaluate_with(&self, loads: &impl SpanwiseLoads) -> RibEvaluation {
        self.evaluate(loads.shear_n(self.y_left_mm), loads.moment_nm(self.y_left_mm))
    }
}

/// Collects the six rib components and yields the immutable [`Rib`]
#[derive(Debug, Clone)]
pub struct RibBuilder {
    station_index: usize,
    y_left_mm: f64,
    y_right_mm: f64,
    web: Option<Web>,
    stiffener: Option<Stiffener>,
    compression_flange: Option<CompressionFlange>,
    tension_flange: Option<TensionFlange>,
    stiffener_rivet_diameter_mm: Option<f64>,
    flange_rivets: Option<WebFlangeRivets>,
}

impl RibBuilder {
    /// Start a builder for bay `index` of a station table
    pub fn new(stations: &StationTable, index: usize) -> SparResult<RibBuilder> {
        Ok(RibBuilder {
            station_index: index,
            y_left_mm: stations.y_left(index)?,
            y_right_mm: stations.y_right(index)?,
            web: None,
            stiffener: None,
            compression_flange: None,
            tension_flange: None,
            stiffener_rivet_diameter_mm: None,
            flange_rivets: None,
        })
    }

    /// Add the web: sheet thickness and panel count
    pub fn web(mut self, thickness_mm: f64, division_count: u32) -> SparResult<RibBuilder> {
        self.web = Some(Web::new(
            self.y_left_mm,
            self.y_right_mm,
            division_count,
            thickness_mm,
        )?);
        Ok(self)
    }

    /// Add the stiffener: thickness and leg lengths
    pub fn stiffener(
        mut self,
        thickness_mm: f64,
        bottom_mm: f64,
        height_mm: f64,
    ) -> SparResult<RibBuilder> {
        self.stiffener = Some(Stiffener::new(thickness_mm, bottom_mm, height_mm)?);
        Ok(self)
    }

    /// Add the compression flange: thickness and leg lengths
    pub fn compression_flange(
        mut self,
        thickness_mm: f64,
        bottom_mm: f64,
        height_mm: f64,
    ) -> SparResult<RibBuilder> {
        self.compression_flange =
            Some(CompressionFlange::new(thickness_mm, bottom_mm, height_mm)?);
        Ok(self)
    }

    /// Add the tension flange: thickness and leg lengths
    pub fn tension_flange(
        mut self,
        thickness_mm: f64,
        bottom_mm: f64,
        height_mm: f64,
    ) -> SparResult<RibBuilder> {
        self.tension_flange = Some(TensionFlange::new(thickness_mm, bottom_mm, height_mm)?);
        Ok(self)
    }

    /// Add the web-to-stiffener rivets; the pitch is derived at build time
    pub fn stiffener_rivets(mut self, diameter_mm: f64) -> SparResult<RibBuilder> {
        if diameter_mm <= 0.0 {
            return Err(SparError::invalid_input(
                "diameter_mm",
                diameter_mm.to_string(),
                "Rivet diameter must be positive",
            ));
        }
        self.stiffener_rivet_diameter_mm = Some(diameter_mm);
        Ok(self)
    }

    /// Add the web-to-flange rivets
    pub fn flange_rivets(
        mut self,
        diameter_mm: f64,
        pitch_to_diameter: f64,
        rows: u32,
    ) -> SparResult<RibBuilder> {
        self.flange_rivets = Some(WebFlangeRivets::new(diameter_mm, pitch_to_diameter, rows)?);
        Ok(self)
    }

    /// Build the rib.
    ///
    /// Fails if any component is missing or if the flange centroids leave
    /// no positive couple distance. Runs the stiffener rivet-pitch
    /// search.
    pub fn build(self) -> SparResult<Rib> {
        let web = self
            .web
            .ok_or_else(|| SparError::missing_component("web"))?;
        let stiffener = self
            .stiffener
            .ok_or_else(|| SparError::missing_component("stiffener"))?;
        let compression_flange = self
            .compression_flange
            .ok_or_else(|| SparError::missing_component("compression flange"))?;
        let tension_flange = self
            .tension_flange
            .ok_or_else(|| SparError::missing_component("tension flange"))?;
        let stiffener_rivet_d = self
            .stiffener_rivet_diameter_mm
            .ok_or_else(|| SparError::missing_component("stiffener rivets"))?;
        let flange_rivets = self
            .flange_rivets
            .ok_or_else(|| SparError::missing_component("flange rivets"))?;

        let he_mm = web.spar_height_mm
            - (compression_flange.section.centroid_offset_mm()
                + tension_flange.section.centroid_offset_mm());
        if he_mm <= 0.0 {
            return Err(SparError::calculation_failed(
                "he",
                format!(
                    "Flange centroids leave no couple distance (he = {:.2} mm)",
                    he_mm
                ),
            ));
        }

        let stiffener_rivets = WebStiffenerRivets::new(stiffener_rivet_d, &stiffener, &web)?;

        Ok(Rib {
            station_index: self.station_index,
            y_left_mm: self.y_left_mm,
            y_right_mm: self.y_right_mm,
            web,
            stiffener,
            compression_flange,
            tension_flange,
            stiffener_rivets,
            flange_rivets,
            he_mm,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::front_spar_height_mm;

    fn test_rib() -> Rib {
        RibBuilder::new(&StationTable::standard_wing(), 0)
            .unwrap()
            .web(2.03, 3)
            .unwrap()
            .stiffener(2.03, 20.0, 20.0)
            .unwrap()
            .compression_flange(6.0, 34.5, 34.5)
            .unwrap()
            .tension_flange(6.6, 36.0, 42.5)
            .unwrap()
            .stiffener_rivets(3.175)
            .unwrap()
            .flange_rivets(6.35, 4.0, 2)
            .unwrap()
            .build()
            .unwrap()
    }

    fn all_passing_margins() -> MarginSet {
        MarginSet {
            web_shear: MarginValue::Computed(0.2),
            stiffener_stability: MarginValue::Computed(0.5),
            compression_flange_crippling: MarginValue::Computed(0.1),
            tension_flange_ultimate: MarginValue::Computed(0.3),
            stiffener_rivet_shear: MarginValue::Computed(1.2),
            stiffener_rivet_hole_loss: MarginValue::Computed(0.8),
            flange_rivet_shear: MarginValue::Computed(0.4),
            flange_rivet_hole_loss: MarginValue::Computed(0.6),
        }
    }

    #[test]
    fn test_builder_requires_all_components() {
        let stations = StationTable::standard_wing();
        let partial = RibBuilder::new(&stations, 0)
            .unwrap()
            .web(2.03, 3)
            .unwrap()
            .stiffener(2.03, 20.0, 20.0)
            .unwrap();
        let err = partial.build().unwrap_err();
        assert_eq!(err.error_code(), "MISSING_COMPONENT");
    }

    #[test]
    fn test_he_computation() {
        let rib = test_rib();
        let expected = front_spar_height_mm(625.0)
            - (rib.compression_flange().section.centroid_offset_mm()
                + rib.tension_flange().section.centroid_offset_mm());
        assert!((rib.he_mm() - expected).abs() < 1e-9);
        // Around 300 mm for the root bay with 6 mm class flanges
        assert!(rib.he_mm() > 280.0 && rib.he_mm() < 320.0);
    }

    #[test]
    fn test_evaluation_margins_present() {
        let rib = test_rib();
        let result = rib.evaluate(38_429.0, 74_623.0);
        assert_eq!(result.margins.entries().len(), 8);
        // The fixture geometry computes every margin
        for (name, margin) in result.margins.entries() {
            assert!(margin.value().is_some(), "{name} unexpectedly not applicable");
        }
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_verdict_all_passing() {
        assert!(all_passing_margins().passes());
    }

    #[test]
    fn test_verdict_undefined_stiffener_excluded() {
        let mut margins = all_passing_margins();
        margins.stiffener_stability = MarginValue::NotApplicable(NaCause::OutOfTable {
            curve: "required stiffener inertia fraction".to_string(),
            bound: Bound::AboveMax,
            value: 4.5,
        });
        assert!(margins.passes());
    }

    #[test]
    fn test_verdict_negative_stiffener_fails() {
        let mut margins = all_passing_margins();
        margins.stiffener_stability = MarginValue::Computed(-0.1);
        assert!(!margins.passes());
    }

    #[test]
    fn test_verdict_any_negative_margin_fails() {
        for i in 0..8 {
            let mut margins = all_passing_margins();
            let slot = match i {
                0 => &mut margins.web_shear,
                1 => &mut margins.stiffener_stability,
                2 => &mut margins.compression_flange_crippling,
                3 => &mut margins.tension_flange_ultimate,
                4 => &mut margins.stiffener_rivet_shear,
                5 => &mut margins.stiffener_rivet_hole_loss,
                6 => &mut margins.flange_rivet_shear,
                _ => &mut margins.flange_rivet_hole_loss,
            };
            *slot = MarginValue::Computed(-0.01);
            assert!(!margins.passes(), "margin {i} should fail the verdict");
        }
    }

    #[test]
    fn test_governing_margin() {
        let margins = all_passing_margins();
        let (name, ms) = margins.governing().unwrap();
        assert_eq!(name, "compression flange crippling");
        assert!((ms - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_pitch_search_failure_surfaces_diagnostic() {
        // Stocky stiffener: crippling stress beyond any inter-rivet
        // allowable, so the pitch search must fail and be reported
        let rib = RibBuilder::new(&StationTable::standard_wing(), 0)
            .unwrap()
            .web(2.03, 3)
            .unwrap()
            .stiffener(5.0, 10.0, 10.0)
            .unwrap()
            .compression_flange(6.0, 34.5, 34.5)
            .unwrap()
            .tension_flange(6.6, 36.0, 42.5)
            .unwrap()
            .stiffener_rivets(3.175)
            .unwrap()
            .flange_rivets(6.35, 4.0, 2)
            .unwrap()
            .build()
            .unwrap();

        let result = rib.evaluate(38_429.0, 74_623.0);
        assert!(result
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::RivetPitchSearchFailed { .. })));
        assert_eq!(result.margins.stiffener_rivet_shear.value(), None);
        assert_eq!(result.margins.stiffener_rivet_hole_loss.value(), None);
    }

    #[test]
    fn test_mass_monotonic_in_thickness() {
        let base = test_rib().total_mass_kg();

        let thicker_web = RibBuilder::new(&StationTable::standard_wing(), 0)
            .unwrap()
            .web(2.29, 3)
            .unwrap()
            .stiffener(2.03, 20.0, 20.0)
            .unwrap()
            .compression_flange(6.0, 34.5, 34.5)
            .unwrap()
            .tension_flange(6.6, 36.0, 42.5)
            .unwrap()
            .stiffener_rivets(3.175)
            .unwrap()
            .flange_rivets(6.35, 4.0, 2)
            .unwrap()
            .build()
            .unwrap();
        assert!(thicker_web.total_mass_kg() > base);

        let thicker_flange = RibBuilder::new(&StationTable::standard_wing(), 0)
            .unwrap()
            .web(2.03, 3)
            .unwrap()
            .stiffener(2.03, 20.0, 20.0)
            .unwrap()
            .compression_flange(7.0, 34.5, 34.5)
            .unwrap()
            .tension_flange(6.6, 36.0, 42.5)
            .unwrap()
            .stiffener_rivets(3.175)
            .unwrap()
            .flange_rivets(6.35, 4.0, 2)
            .unwrap()
            .build()
            .unwrap();
        assert!(thicker_flange.total_mass_kg() > base);

        let thicker_stiffener = RibBuilder::new(&StationTable::standard_wing(), 0)
            .unwrap()
            .web(2.03, 3)
            .unwrap()
            .stiffener(2.29, 20.0, 20.0)
            .unwrap()
            .compression_flange(6.0, 34.5, 34.5)
            .unwrap()
            .tension_flange(6.6, 36.0, 42.5)
            .unwrap()
            .stiffener_rivets(3.175)
            .unwrap()
            .flange_rivets(6.35, 4.0, 2)
            .unwrap()
            .build()
            .unwrap();
        assert!(thicker_stiffener.total_mass_kg() > base);
    }

    #[test]
    fn test_evaluation_serialization_roundtrip() {
        let rib = test_rib();
        let result = rib.evaluate(38_429.0, 74_623.0);
        let json = serde_json::to_string_pretty(&result).unwrap();
        assert!(json.contains("web_shear"));
        let roundtrip: RibEvaluation = serde_json::from_str(&json).unwrap();
        assert_eq!(result, roundtrip);
    }

    #[test]
    fn test_evaluate_with_provider() {
        use crate::loads::{PrecomputedLoads, StationLoad};

        let rib = test_rib();
        let table = PrecomputedLoads::new(vec![StationLoad {
            sta_mm: 625.0,
            shear_n: 38_429.0,
            moment_nm: 74_623.0,
        }])
        .unwrap();
        let via_table = rib.evaluate_with(&table);
        let direct = rib.evaluate(38_429.0, 74_623.0);
        assert_eq!(via_table, direct);
    }
}
