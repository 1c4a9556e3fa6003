//! # Mass Minimization
//!
//! Brute-force combinatorial search over candidate rib geometries at one
//! station: every combination is built, evaluated, and the lightest one
//! with all margins non-negative is kept.
//!
//! The sweep is exhaustive and deterministic; candidate order follows the
//! grid lists. Combinations that fail geometric validation (a leg shorter
//! than its sheet thickness, say) are skipped and counted separately.

use serde::{Deserialize, Serialize};

use crate::errors::SparResult;
use crate::loads::{SpanwiseLoads, StationTable};
use crate::rib::{Rib, RibBuilder, RibEvaluation};

/// Geometry parameters of one rib candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RibGeometry {
    /// Web sheet thickness [mm]
    pub web_thickness_mm: f64,
    /// Web panel count
    pub division_count: u32,
    /// Stiffener thickness [mm]
    pub stiffener_thickness_mm: f64,
    /// Stiffener attached-leg length [mm]
    pub stiffener_bottom_mm: f64,
    /// Stiffener free-leg length [mm]
    pub stiffener_height_mm: f64,
    /// Compression flange thickness [mm]
    pub compression_thickness_mm: f64,
    /// Compression flange bottom leg [mm]
    pub compression_bottom_mm: f64,
    /// Compression flange standing leg [mm]
    pub compression_height_mm: f64,
    /// Tension flange thickness [mm]
    pub tension_thickness_mm: f64,
    /// Tension flange bottom leg [mm]
    pub tension_bottom_mm: f64,
    /// Tension flange standing leg [mm]
    pub tension_height_mm: f64,
    /// Stiffener rivet diameter [mm]
    pub stiffener_rivet_d_mm: f64,
    /// Flange rivet diameter [mm]
    pub flange_rivet_d_mm: f64,
    /// Flange rivet pitch/diameter ratio
    pub flange_rivet_pd_ratio: f64,
    /// Flange rivet row count
    pub flange_rivet_rows: u32,
}

impl RibGeometry {
    /// Build the rib this geometry describes at bay `index`
    pub fn build(&self, stations: &StationTable, index: usize) -> SparResult<Rib> {
        RibBuilder::new(stations, index)?
            .web(self.web_thickness_mm, self.division_count)?
            .stiffener(
                self.stiffener_thickness_mm,
                self.stiffener_bottom_mm,
                self.stiffener_height_mm,
            )?
            .compression_flange(
                self.compression_thickness_mm,
                self.compression_bottom_mm,
                self.compression_height_mm,
            )?
            .tension_flange(
                self.tension_thickness_mm,
                self.tension_bottom_mm,
                self.tension_height_mm,
            )?
            .stiffener_rivets(self.stiffener_rivet_d_mm)?
            .flange_rivets(
                self.flange_rivet_d_mm,
                self.flange_rivet_pd_ratio,
                self.flange_rivet_rows,
            )?
            .build()
    }
}

/// Candidate lists for the sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateGrid {
    /// Web sheet gauges [mm]
    pub web_thickness_mm: Vec<f64>,
    /// Web panel counts
    pub division_counts: Vec<u32>,
    /// Stiffener gauges [mm]
    pub stiffener_thickness_mm: Vec<f64>,
    /// Stiffener leg lengths, used for both legs [mm]
    pub stiffener_leg_mm: Vec<f64>,
    /// Flange thicknesses [mm]
    pub flange_thickness_mm: Vec<f64>,
    /// Flange leg lengths, used for all four legs [mm]
    pub flange_leg_mm: Vec<f64>,
    /// Rivet diameters for both joints [mm]
    pub rivet_diameter_mm: Vec<f64>,
    /// Flange rivet pitch/diameter ratio
    pub flange_rivet_pd_ratio: f64,
    /// Flange rivet row count
    pub flange_rivet_rows: u32,
}

impl CandidateGrid {
    /// The full production sweep: standard sheet gauges, dash-number
    /// rivets, and the leg ranges of the original sizing study. Large -
    /// millions of combinations.
    pub fn standard() -> CandidateGrid {
        CandidateGrid {
            web_thickness_mm: vec![1.60, 1.80, 2.03],
            division_counts: vec![4, 5, 6],
            stiffener_thickness_mm: vec![1.80, 2.03, 2.29, 2.54, 3.18],
            stiffener_leg_mm: (0..10).map(|i| 15.0 + 2.0 * i as f64).collect(),
            flange_thickness_mm: (0..5).map(|i| 8.0 + i as f64).collect(),
            flange_leg_mm: (0..10).map(|i| 15.0 + 2.0 * i as f64).collect(),
            rivet_diameter_mm: vec![3.96875, 4.7625],
            flange_rivet_pd_ratio: 4.0,
            flange_rivet_rows: 2,
        }
    }

    /// A coarse sweep for interactive use: a few hundred combinations
    pub fn coarse() -> CandidateGrid {
        CandidateGrid {
            web_thickness_mm: vec![1.60, 2.03],
            division_counts: vec![3, 4],
            stiffener_thickness_mm: vec![2.03],
            stiffener_leg_mm: vec![20.0, 25.0],
            flange_thickness_mm: vec![5.0, 6.0, 8.0],
            flange_leg_mm: vec![25.0, 34.5],
            rivet_diameter_mm: vec![3.175, 4.7625],
            flange_rivet_pd_ratio: 4.0,
            flange_rivet_rows: 2,
        }
    }

    /// Number of combinations the sweep will visit
    pub fn candidate_count(&self) -> usize {
        self.web_thickness_mm.len()
            * self.division_counts.len()
            * self.stiffener_thickness_mm.len()
            * self.stiffener_leg_mm.len().pow(2)
            * self.flange_thickness_mm.len().pow(2)
            * self.flange_leg_mm.len().pow(4)
            * self.rivet_diameter_mm.len().pow(2)
    }

    /// Iterate every geometry combination in grid order
    fn for_each_geometry(&self, mut visit: impl FnMut(RibGeometry)) {
        for &w_t in &self.web_thickness_mm {
            for &div in &self.division_counts {
                for &s_t in &self.stiffener_thickness_mm {
                    for &bs1 in &self.stiffener_leg_mm {
                        for &bs2 in &self.stiffener_leg_mm {
                            for &fc_t in &self.flange_thickness_mm {
                                for &ft_t in &self.flange_thickness_mm {
                                    for &bcf1 in &self.flange_leg_mm {
                                        for &bcf2 in &self.flange_leg_mm {
                                            for &btf1 in &self.flange_leg_mm {
                                                for &btf2 in &self.flange_leg_mm {
                                                    for &d1 in &self.rivet_diameter_mm {
                                                        for &d2 in &self.rivet_diameter_mm {
                                                            visit(RibGeometry {
                                                                web_thickness_mm: w_t,
                                                                division_count: div,
                                                                stiffener_thickness_mm: s_t,
                                                                stiffener_bottom_mm: bs1,
                                                                stiffener_height_mm: bs2,
                                                                compression_thickness_mm: fc_t,
                                                                compression_bottom_mm: bcf1,
                                                                compression_height_mm: bcf2,
                                                                tension_thickness_mm: ft_t,
                                                                tension_bottom_mm: btf1,
                                                                tension_height_mm: btf2,
                                                                stiffener_rivet_d_mm: d1,
                                                                flange_rivet_d_mm: d2,
                                                                flange_rivet_pd_ratio: self
                                                                    .flange_rivet_pd_ratio,
                                                                flange_rivet_rows: self
                                                                    .flange_rivet_rows,
                                                            });
                                                        }
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// A candidate that survived the sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizedDesign {
    /// Bay index in the station table
    pub station_index: usize,
    /// The winning geometry
    pub geometry: RibGeometry,
    /// Its evaluation at the design loads
    pub evaluation: RibEvaluation,
}

/// Result of a mass-minimization sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizingOutcome {
    /// The lightest passing design, if any candidate passed
    pub best: Option<SizedDesign>,
    /// Candidates evaluated
    pub evaluated: usize,
    /// Candidates whose margins all passed
    pub passing: usize,
    /// Candidates skipped for invalid geometry
    pub skipped: usize,
}

/// Sweep the grid at bay `index`, keeping the lightest passing design.
///
/// `sf_n` and `mf_nm` are the spar loads at the bay's inboard station;
/// they are constant across the sweep, so the caller computes them once.
pub fn minimize_mass(
    stations: &StationTable,
    index: usize,
    grid: &CandidateGrid,
    sf_n: f64,
    mf_nm: f64,
) -> SparResult<SizingOutcome> {
    // Fail early on a bad bay index
    stations.y_left(index)?;

    let mut outcome = SizingOutcome {
        best: None,
        evaluated: 0,
        passing: 0,
        skipped: 0,
    };

    grid.for_each_geometry(|geometry| {
        let rib = match geometry.build(stations, index) {
            Ok(rib) => rib,
            Err(_) => {
                outcome.skipped += 1;
                return;
            }
        };
        outcome.evaluated += 1;

        let evaluation = rib.evaluate(sf_n, mf_nm);
        if !evaluation.margins.passes() {
            return;
        }
        outcome.passing += 1;

        let lighter = outcome
            .best
            .as_ref()
            .map(|b| evaluation.mass_kg < b.evaluation.mass_kg)
            .unwrap_or(true);
        if lighter {
            outcome.best = Some(SizedDesign {
                station_index: index,
                geometry,
                evaluation,
            });
        }
    });

    Ok(outcome)
}

/// Sweep using a load provider for the station loads
pub fn minimize_mass_with(
    stations: &StationTable,
    index: usize,
    grid: &CandidateGrid,
    loads: &impl SpanwiseLoads,
) -> SparResult<SizingOutcome> {
    let sta = stations.y_left(index)?;
    minimize_mass(
        stations,
        index,
        grid,
        loads.shear_n(sta),
        loads.moment_nm(sta),
    )
}
