//! # Sizing Project
//!
//! Container for a sizing campaign: who ran it, the global analysis
//! settings, and the sized design retained for each rib station. Projects
//! serialize to JSON and are saved through [`crate::file_io`] with atomic
//! writes and advisory locking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::rib::EFFECTIVE_DENSITY_G_CM3;
use crate::sizing::SizedDesign;

/// Current project schema version
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Project identification and bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMeta {
    /// Stable project identifier
    pub id: Uuid,
    /// Engineer responsible for the sizing
    pub engineer: String,
    /// Job or drawing number
    pub job_id: String,
    /// Client or program name
    pub client: String,
    /// Creation timestamp (UTC)
    pub created: DateTime<Utc>,
    /// Last modification timestamp (UTC)
    pub modified: DateTime<Utc>,
    /// Schema version the file was written with
    pub version: String,
}

/// Analysis settings shared by every station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Effective density for mass estimates [g/cm^3]
    pub density_g_cm3: f64,
    /// Flange rivet pitch/diameter ratio
    pub flange_rivet_pd_ratio: f64,
    /// Flange rivet row count
    pub flange_rivet_rows: u32,
    /// Scatter factor dividing the mean fatigue life
    pub fatigue_scatter_factor: f64,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            density_g_cm3: EFFECTIVE_DENSITY_G_CM3,
            flange_rivet_pd_ratio: 4.0,
            flange_rivet_rows: 2,
            fatigue_scatter_factor: 2.0,
        }
    }
}

/// A spar sizing project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparProject {
    /// Identification and timestamps
    pub meta: ProjectMeta,
    /// Shared analysis settings
    pub settings: GlobalSettings,
    /// Retained designs, at most one per rib station
    pub designs: Vec<SizedDesign>,
}

impl SparProject {
    /// Create an empty project
    pub fn new(
        engineer: impl Into<String>,
        job_id: impl Into<String>,
        client: impl Into<String>,
    ) -> SparProject {
        let now = Utc::now();
        SparProject {
            meta: ProjectMeta {
                id: Uuid::new_v4(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
                version: SCHEMA_VERSION.to_string(),
            },
            settings: GlobalSettings::default(),
            designs: Vec::new(),
        }
    }

    /// Update the modification timestamp
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Retain a sized design, replacing any previous one for the same
    /// station
    pub fn retain_design(&mut self, design: SizedDesign) {
        self.designs
            .retain(|d| d.station_index != design.station_index);
        self.designs.push(design);
        self.designs.sort_by_key(|d| d.station_index);
        self.touch();
    }

    /// The retained design for a station, if any
    pub fn design_for(&self, station_index: usize) -> Option<&SizedDesign> {
        self.designs
            .iter()
            .find(|d| d.station_index == station_index)
    }

    /// Total mass of all retained designs [kg]
    pub fn total_mass_kg(&self) -> f64 {
        self.designs.iter().map(|d| d.evaluation.mass_kg).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::StationTable;
    use crate::rib::RibEvaluation;
    use crate::sizing::{minimize_mass, CandidateGrid};

    fn sample_design(station_index: usize) -> SizedDesign {
        let grid = CandidateGrid {
            web_thickness_mm: vec![2.03],
            division_counts: vec![3],
            stiffener_thickness_mm: vec![2.03],
            stiffener_leg_mm: vec![20.0, 25.0],
            flange_thickness_mm: vec![8.0],
            flange_leg_mm: vec![34.5],
            rivet_diameter_mm: vec![4.7625],
            flange_rivet_pd_ratio: 4.0,
            flange_rivet_rows: 2,
        };
        let outcome = minimize_mass(
            &StationTable::standard_wing(),
            station_index,
            &grid,
            38_429.0,
            74_623.0,
        )
        .unwrap();
        outcome.best.expect("grid should produce a passing design")
    }

    #[test]
    fn test_new_project_metadata() {
        let project = SparProject::new("K. Hirota", "WS-25-001", "Aero Program");
        assert_eq!(project.meta.engineer, "K. Hirota");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert!(project.designs.is_empty());
        assert_eq!(project.meta.created, project.meta.modified);
    }

    #[test]
    fn test_retain_design_replaces_station() {
        let mut project = SparProject::new("Test", "TEST", "Client");
        let design = sample_design(0);
        project.retain_design(design.clone());
        project.retain_design(design.clone());
        assert_eq!(project.designs.len(), 1);
        assert!(project.design_for(0).is_some());
        assert!(project.design_for(1).is_none());
    }

    #[test]
    fn test_touch_advances_modified() {
        let mut project = SparProject::new("Test", "TEST", "Client");
        let before = project.meta.modified;
        project.touch();
        assert!(project.meta.modified >= before);
    }

    #[test]
    fn test_total_mass_sums_designs() {
        let mut project = SparProject::new("Test", "TEST", "Client");
        assert_eq!(project.total_mass_kg(), 0.0);
        let design = sample_design(0);
        let mass = design.evaluation.mass_kg;
        project.retain_design(design);
        assert!((project.total_mass_kg() - mass).abs() < 1e-12);
    }

    #[test]
    fn test_project_serialization_roundtrip() {
        let mut project = SparProject::new("Test", "TEST", "Client");
        project.retain_design(sample_design(0));

        let json = serde_json::to_string_pretty(&project).unwrap();
        let roundtrip: SparProject = serde_json::from_str(&json).unwrap();
        assert_eq!(project.meta.id, roundtrip.meta.id);
        assert_eq!(project.designs.len(), roundtrip.designs.len());

        let original: &RibEvaluation = &project.designs[0].evaluation;
        let restored: &RibEvaluation = &roundtrip.designs[0].evaluation;
        assert_eq!(original, restored);
    }
}
