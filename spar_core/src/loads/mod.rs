//! # Spanwise Loads
//!
//! Supplies the shear force and bending moment carried by the front spar at
//! a given spanwise station, plus the front-spar height profile and the rib
//! station table.
//!
//! # Overview
//!
//! - [`SpanwiseLoads`] - provider trait consumed by the rib evaluation
//! - [`LiftDistribution`] - Schrenk-style spanwise lift model with wing
//!   weight inertia relief, integrated numerically
//! - [`PrecomputedLoads`] - table-backed provider for fixtures and tests
//! - [`StationTable`] - rib left stations and rib-to-rib pitches
//! - [`front_spar_height_mm`] - spar height profile along the span
//!
//! # Example
//!
//! ```rust
//! use spar_core::loads::{standard_wing_loads, SpanwiseLoads};
//!
//! let loads = standard_wing_loads();
//! let root_shear = loads.shear_n(625.0);
//! let tip_shear = loads.shear_n(4500.0);
//! assert!(root_shear > tip_shear);
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{SparError, SparResult};

/// Half-span of the wing in mm
pub const HALF_SPAN_MM: f64 = 5000.0;

/// Maximum load factor applied to lift and inertia relief
pub const LOAD_FACTOR: f64 = 6.0;

/// Spanwise integration step for shear and moment sums [mm]
const STATION_STEP_MM: f64 = 100.0;

/// Integration step for the lift integral [mm]
const LIFT_STEP_MM: f64 = 25.0;

/// Front-spar height control points: (station, height) in mm
const SPAR_HEIGHT_POINTS: [(f64, f64); 2] = [(625.0, 320.0), (5000.0, 130.0)];

/// Front-spar height at a station, linear between root and tip control
/// points and clamped beyond them [mm]
pub fn front_spar_height_mm(sta_mm: f64) -> f64 {
    interp_clamped(&SPAR_HEIGHT_POINTS, sta_mm)
}

/// Provider of spar loads at a spanwise position
pub trait SpanwiseLoads {
    /// Front-spar shear force at a station [N]
    fn shear_n(&self, sta_mm: f64) -> f64;

    /// Front-spar bending moment at a station [N*m]
    fn moment_nm(&self, sta_mm: f64) -> f64;
}

/// Linear interpolation over sorted `(x, y)` points, clamped at the ends.
///
/// The aero coefficient tables cover the whole span, so clamping only
/// matters for the spar-height profile inboard of the root rib.
fn interp_clamped(points: &[(f64, f64)], x: f64) -> f64 {
    if x <= points[0].0 {
        return points[0].1;
    }
    if x >= points[points.len() - 1].0 {
        return points[points.len() - 1].1;
    }
    for window in points.windows(2) {
        let (x0, y0) = window[0];
        let (x1, y1) = window[1];
        if x <= x1 {
            let t = (x - x0) / (x1 - x0);
            return y0 + t * (y1 - y0);
        }
    }
    points[points.len() - 1].1
}

/// Spanwise lift model for the half wing.
///
/// Section lift is `c_l = C_L * c_la + c_lb` (additional plus basic
/// distributions), rotated into the beam axis with the drag coefficient:
/// `c_z = c_l cos(alpha) + c_d sin(alpha)`. Air shear integrates
/// `chord * c_z` from the station to the tip; wing weight lumps scaled by
/// the load factor relieve it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiftDistribution {
    /// Maximum lift coefficient of the design condition
    pub c_l_max: f64,
    /// Fuselage angle of attack at the design condition [rad]
    pub alpha_rad: f64,
    /// Load intensity scale eta_a [N/m^2-equivalent, precomputed]
    pub eta_a: f64,
    /// Additional lift distribution c_la vs. station [mm]
    pub c_la: Vec<(f64, f64)>,
    /// Basic lift distribution c_lb vs. station [mm]
    pub c_lb: Vec<(f64, f64)>,
    /// Drag coefficient distribution c_d vs. station [mm]
    pub c_d: Vec<(f64, f64)>,
    /// Chord length vs. station [mm]
    pub chord: Vec<(f64, f64)>,
    /// Wing weight density rho vs. station midpoints [(mm, N/mm)]
    pub weight_rho: Vec<(f64, f64)>,
}

impl LiftDistribution {
    /// The standard wing of this design: tables read from the loads report
    pub fn standard_wing() -> LiftDistribution {
        let stations = [
            0.0, 1000.0, 2000.0, 3000.0, 4000.0, 4500.0, 4750.0, 4875.0, 5000.0,
        ];
        let c_la = [0.835, 1.021, 1.095, 1.089, 0.993, 0.833, 0.662, 0.548, 0.0];
        let c_lb = [
            0.049, 0.044, 0.005, -0.033, -0.062, -0.067, -0.056, -0.043, 0.0,
        ];
        let c_d = [
            0.1679, 0.1303, 0.1105, 0.1065, 0.1163, 0.1314, 0.1354, 0.1302, 0.0,
        ];

        // Weight lumps [kgf] between successive weight stations
        let weight_stations = [
            625.0, 750.0, 1000.0, 1250.0, 1500.0, 1750.0, 2000.0, 2250.0, 2500.0, 2750.0, 3000.0,
            3250.0, 3500.0, 3750.0, 4000.0, 4250.0, 4500.0, 4750.0, 5000.0,
        ];
        let weight_lumps_kgf = [
            15.0, 12.0, 11.0, 7.0, 6.0, 5.0, 4.0, 4.0, 3.0, 4.0, 4.0, 3.0, 3.0, 3.0, 2.0, 2.0,
            2.0, 1.0,
        ];
        let weight_rho = weight_lumps_kgf
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let left = weight_stations[i];
                let right = weight_stations[i + 1];
                let mid = (left + right) / 2.0;
                (mid, 9.8 * w / (right - left))
            })
            .collect();

        LiftDistribution {
            c_l_max: 1.4,
            alpha_rad: 14.5_f64.to_radians(),
            eta_a: 4039.29,
            c_la: stations.iter().copied().zip(c_la).collect(),
            c_lb: stations.iter().copied().zip(c_lb).collect(),
            c_d: stations.iter().copied().zip(c_d).collect(),
            chord: vec![(0.0, 2130.0), (HALF_SPAN_MM, 1070.0)],
            weight_rho,
        }
    }

    /// Section force coefficient normal to the beam axis at a station
    pub fn c_z(&self, sta_mm: f64) -> f64 {
        let c_l = self.c_l_max * interp_clamped(&self.c_la, sta_mm)
            + interp_clamped(&self.c_lb, sta_mm);
        let c_d = interp_clamped(&self.c_d, sta_mm);
        c_l * self.alpha_rad.cos() + c_d * self.alpha_rad.sin()
    }

    /// Chord length at a station [mm]
    pub fn chord_mm(&self, sta_mm: f64) -> f64 {
        interp_clamped(&self.chord, sta_mm)
    }

    /// Air-load shear outboard of a station [N].
    ///
    /// Trapezoidal integration of `chord * c_z` from the station to the
    /// tip at a fixed 25 mm step.
    pub fn air_shear_n(&self, sta_mm: f64) -> f64 {
        if sta_mm >= HALF_SPAN_MM {
            return 0.0;
        }
        let mut integral = 0.0;
        let mut y = sta_mm;
        let mut prev = self.chord_mm(y) * self.c_z(y);
        while y < HALF_SPAN_MM {
            let y_next = (y + LIFT_STEP_MM).min(HALF_SPAN_MM);
            let next = self.chord_mm(y_next) * self.c_z(y_next);
            integral += (prev + next) / 2.0 * (y_next - y);
            prev = next;
            y = y_next;
        }
        // mm^2 -> m^2 under the eta_a scale
        self.eta_a * integral / 1.0e6
    }

    /// Inertia-relief shear from the wing weight outboard of a station [N]
    pub fn weight_shear_n(&self, sta_mm: f64) -> f64 {
        let steps = ((HALF_SPAN_MM - sta_mm) / STATION_STEP_MM).floor() as usize;
        let sum: f64 = (0..steps)
            .map(|i| {
                let y = sta_mm + STATION_STEP_MM * i as f64;
                interp_clamped(&self.weight_rho, y) * STATION_STEP_MM
            })
            .sum();
        LOAD_FACTOR * sum
    }
}

impl SpanwiseLoads for LiftDistribution {
    fn shear_n(&self, sta_mm: f64) -> f64 {
        self.air_shear_n(sta_mm) - self.weight_shear_n(sta_mm)
    }

    fn moment_nm(&self, sta_mm: f64) -> f64 {
        let steps = ((HALF_SPAN_MM - sta_mm) / STATION_STEP_MM).floor() as usize;
        let sum: f64 = (0..steps)
            .map(|i| {
                let y = sta_mm + STATION_STEP_MM * i as f64;
                self.shear_n(y) * STATION_STEP_MM
            })
            .sum();
        // N*mm -> N*m
        sum / 1000.0
    }
}

/// The standard wing's load distribution, built once per process
static STANDARD_WING: Lazy<LiftDistribution> = Lazy::new(LiftDistribution::standard_wing);

/// Shared reference to the standard wing's load distribution
pub fn standard_wing_loads() -> &'static LiftDistribution {
    &STANDARD_WING
}

/// One row of a precomputed spar-load table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationLoad {
    /// Station [mm]
    pub sta_mm: f64,
    /// Front-spar shear [N]
    pub shear_n: f64,
    /// Front-spar bending moment [N*m]
    pub moment_nm: f64,
}

/// Spar loads supplied as a precomputed table keyed by station.
///
/// Lookup interpolates linearly between rows and clamps at the table
/// ends. Useful for report fixtures and for testing the rib evaluation
/// against known load pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrecomputedLoads {
    rows: Vec<StationLoad>,
}

impl PrecomputedLoads {
    /// Build from rows sorted by ascending station
    pub fn new(rows: Vec<StationLoad>) -> SparResult<PrecomputedLoads> {
        if rows.is_empty() {
            return Err(SparError::invalid_input(
                "rows",
                "[]",
                "Load table needs at least one station",
            ));
        }
        if rows.windows(2).any(|w| w[1].sta_mm <= w[0].sta_mm) {
            return Err(SparError::invalid_input(
                "rows",
                format!("{} rows", rows.len()),
                "Stations must be strictly increasing",
            ));
        }
        Ok(PrecomputedLoads { rows })
    }

    /// The table rows
    pub fn rows(&self) -> &[StationLoad] {
        &self.rows
    }
}

impl SpanwiseLoads for PrecomputedLoads {
    fn shear_n(&self, sta_mm: f64) -> f64 {
        let pts: Vec<(f64, f64)> = self.rows.iter().map(|r| (r.sta_mm, r.shear_n)).collect();
        interp_clamped(&pts, sta_mm)
    }

    fn moment_nm(&self, sta_mm: f64) -> f64 {
        let pts: Vec<(f64, f64)> = self.rows.iter().map(|r| (r.sta_mm, r.moment_nm)).collect();
        interp_clamped(&pts, sta_mm)
    }
}

/// Rib stations along the half wing: left edges and rib-to-rib pitches.
///
/// Injected into the rib builder so alternative wings (and test wings)
/// can swap the table without touching the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationTable {
    left_sta_mm: Vec<f64>,
    pitch_mm: Vec<f64>,
}

impl StationTable {
    /// Build a table from left stations and matching pitches
    pub fn new(left_sta_mm: Vec<f64>, pitch_mm: Vec<f64>) -> SparResult<StationTable> {
        if left_sta_mm.len() != pitch_mm.len() || left_sta_mm.is_empty() {
            return Err(SparError::invalid_input(
                "pitch_mm",
                format!("{} stations, {} pitches", left_sta_mm.len(), pitch_mm.len()),
                "Station and pitch lists must be non-empty and the same length",
            ));
        }
        if pitch_mm.iter().any(|&w| w <= 0.0) {
            return Err(SparError::invalid_input(
                "pitch_mm",
                "non-positive pitch",
                "Rib pitches must be positive",
            ));
        }
        Ok(StationTable {
            left_sta_mm,
            pitch_mm,
        })
    }

    /// The rib stations of this design's wing
    pub fn standard_wing() -> StationTable {
        StationTable {
            left_sta_mm: vec![
                625.0, 1000.0, 1500.0, 2000.0, 2500.0, 3000.0, 3500.0, 4000.0, 4500.0,
            ],
            pitch_mm: vec![375.0, 500.0, 500.0, 500.0, 500.0, 500.0, 500.0, 500.0, 500.0],
        }
    }

    /// Number of rib bays
    pub fn len(&self) -> usize {
        self.left_sta_mm.len()
    }

    /// Whether the table has no bays
    pub fn is_empty(&self) -> bool {
        self.left_sta_mm.is_empty()
    }

    /// Left station of bay `index` [mm]
    pub fn y_left(&self, index: usize) -> SparResult<f64> {
        self.left_sta_mm.get(index).copied().ok_or_else(|| {
            SparError::invalid_input(
                "index",
                index.to_string(),
                format!("Station table has {} bays", self.len()),
            )
        })
    }

    /// Right station of bay `index` [mm]
    pub fn y_right(&self, index: usize) -> SparResult<f64> {
        Ok(self.y_left(index)? + self.pitch_mm[index])
    }

    /// Rib-to-rib pitch of bay `index` [mm]
    pub fn pitch(&self, index: usize) -> SparResult<f64> {
        self.pitch_mm.get(index).copied().ok_or_else(|| {
            SparError::invalid_input(
                "index",
                index.to_string(),
                format!("Station table has {} bays", self.len()),
            )
        })
    }
}
