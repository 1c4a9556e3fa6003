//! # CSV Reports
//!
//! Row and header generation for the per-component report tables, plus a
//! writer that appends them as CSV files. Column order follows the
//! original sizing reports; reported values are rounded to 3 significant
//! figures, and allowables outside their chart domain render as `NA`.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use crate::components::{
    CompressionFlange, Stiffener, TensionFlange, Web, WebFlangeRivets, WebStiffenerRivets,
};
use crate::curves::Lookup;
use crate::errors::{SparError, SparResult};
use crate::materials::FatigueAssessment;
use crate::rib::{Rib, RibEvaluation};
use crate::units::round_sig;

/// Web report columns
pub const WEB_HEADER: [&str; 11] = [
    "left STA [mm]",
    "right STA [mm]",
    "divisions",
    "panel width de [mm]",
    "web thickness [mm]",
    "spar height [mm]",
    "q_max [N/m]",
    "F_scr [MPa]",
    "F_su [MPa]",
    "f_s [MPa]",
    "M.S.",
];

/// Stiffener report columns
pub const STIFFENER_HEADER: [&str; 11] = [
    "left STA [mm]",
    "right STA [mm]",
    "web thickness [mm]",
    "panel width de [mm]",
    "he [mm]",
    "stiffener thickness ts [mm]",
    "bs1 bottom [mm]",
    "bs2 height [mm]",
    "I [mm^4]",
    "I_req [mm^4]",
    "M.S.",
];

/// Compression flange report columns
pub const COMPRESSION_FLANGE_HEADER: [&str; 13] = [
    "left STA [mm]",
    "right STA [mm]",
    "web thickness [mm]",
    "moment [N*m]",
    "tf [mm]",
    "b bottom f1 [mm]",
    "b height f2 [mm]",
    "P [N]",
    "A [mm^2]",
    "fc [MPa]",
    "sqrt(Fcy/E)(b/t)",
    "Fcc [MPa]",
    "M.S.",
];

/// Tension flange report columns
pub const TENSION_FLANGE_HEADER: [&str; 12] = [
    "left STA [mm]",
    "right STA [mm]",
    "web thickness [mm]",
    "moment [N*m]",
    "tf [mm]",
    "b bottom f1 [mm]",
    "b height f2 [mm]",
    "P [N]",
    "A [mm^2]",
    "ft [MPa]",
    "Ftu [MPa]",
    "M.S.",
];

/// Stiffener rivet shear report columns
pub const STIFFENER_RIVET_SHEAR_HEADER: [&str; 10] = [
    "left STA [mm]",
    "right STA [mm]",
    "K [MPa]",
    "As [mm^2]",
    "dc [mm]",
    "D [mm]",
    "p [mm]",
    "Pf [N]",
    "P_allow [N]",
    "M.S.",
];

/// Stiffener rivet inter-rivet-buckling report columns
pub const STIFFENER_RIVET_BUCKLING_HEADER: [&str; 7] = [
    "left STA [mm]",
    "right STA [mm]",
    "bs1 bottom [mm]",
    "ts [mm]",
    "Fcc [MPa]",
    "Fir [MPa]",
    "p [mm]",
];

/// Stiffener rivet hole-loss report columns
pub const STIFFENER_RIVET_HOLE_HEADER: [&str; 9] = [
    "left STA [mm]",
    "right STA [mm]",
    "p [mm]",
    "D [mm]",
    "fs [MPa]",
    "fsj [MPa]",
    "Fsu [MPa]",
    "Fscr [MPa]",
    "M.S.",
];

/// Flange rivet report columns
pub const FLANGE_RIVET_HEADER: [&str; 9] = [
    "left STA [mm]",
    "right STA [mm]",
    "q_max [N/m]",
    "N",
    "D [mm]",
    "p [mm]",
    "Ps [N]",
    "P_allow [N]",
    "M.S. of web hole loss",
];

/// Fatigue spectrum report columns
pub const FATIGUE_HEADER: [&str; 5] = [
    "load [% limit]",
    "stress [MPa]",
    "n [1/khr]",
    "N [cycles]",
    "n/N",
];

/// Format a reported scalar: 3 significant figures
pub fn cell(value: f64) -> String {
    round_sig(value, 3).to_string()
}

/// Format a lookup: `NA` outside the chart domain
pub fn lookup_cell(value: Lookup) -> String {
    match value {
        Ok(v) => cell(v),
        Err(_) => "NA".to_string(),
    }
}

fn option_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => cell(v),
        None => "NA".to_string(),
    }
}

/// Web report row
pub fn web_row(web: &Web, sf_n: f64, he_mm: f64) -> Vec<String> {
    vec![
        cell(web.y_left_mm),
        cell(web.y_right_mm),
        web.division_count.to_string(),
        cell(web.panel_width_mm()),
        cell(web.thickness_mm),
        cell(web.spar_height_mm),
        cell(web.shear_flow(sf_n, he_mm)),
        lookup_cell(web.shear_buckling_allowable()),
        lookup_cell(web.ultimate_shear_allowable()),
        cell(web.shear_stress(sf_n, he_mm)),
        lookup_cell(web.margin_of_safety(sf_n, he_mm)),
    ]
}

/// Stiffener report row
pub fn stiffener_row(stiffener: &Stiffener, web: &Web, he_mm: f64) -> Vec<String> {
    vec![
        cell(web.y_left_mm),
        cell(web.y_right_mm),
        cell(web.thickness_mm),
        cell(web.panel_width_mm()),
        cell(he_mm),
        cell(stiffener.thickness_mm),
        cell(stiffener.bottom_mm),
        cell(stiffener.height_mm),
        cell(stiffener.inertia_mm4()),
        lookup_cell(stiffener.required_inertia_mm4(he_mm, web)),
        lookup_cell(stiffener.margin_of_safety(he_mm, web)),
    ]
}

/// Compression flange report row
pub fn compression_flange_row(
    flange: &CompressionFlange,
    web: &Web,
    mf_nm: f64,
    he_mm: f64,
) -> Vec<String> {
    let section = &flange.section;
    vec![
        cell(web.y_left_mm),
        cell(web.y_right_mm),
        cell(web.thickness_mm),
        cell(mf_nm),
        cell(section.thickness_mm),
        cell(section.bottom_mm),
        cell(section.height_mm),
        cell(section.axial_force_n(mf_nm, he_mm)),
        cell(section.area_mm2(web.thickness_mm)),
        cell(section.stress_mpa(mf_nm, he_mm, web.thickness_mm)),
        lookup_cell(flange.nondim_x()),
        lookup_cell(flange.crippling_stress()),
        lookup_cell(flange.margin_of_safety(mf_nm, he_mm, web.thickness_mm)),
    ]
}

/// Tension flange report row
pub fn tension_flange_row(
    flange: &TensionFlange,
    web: &Web,
    mf_nm: f64,
    he_mm: f64,
) -> Vec<String> {
    let section = &flange.section;
    vec![
        cell(web.y_left_mm),
        cell(web.y_right_mm),
        cell(web.thickness_mm),
        cell(mf_nm),
        cell(section.thickness_mm),
        cell(section.bottom_mm),
        cell(section.height_mm),
        cell(section.axial_force_n(mf_nm, he_mm)),
        cell(section.area_mm2(web.thickness_mm)),
        cell(section.stress_mpa(mf_nm, he_mm, web.thickness_mm)),
        lookup_cell(flange.ultimate_tension()),
        lookup_cell(flange.margin_of_safety(mf_nm, he_mm, web.thickness_mm)),
    ]
}

/// Stiffener rivet shear report row
pub fn stiffener_rivet_shear_row(
    rivets: &WebStiffenerRivets,
    stiffener: &Stiffener,
    web: &Web,
) -> Vec<String> {
    vec![
        cell(web.y_left_mm),
        cell(web.y_right_mm),
        cell(172.0),
        cell(stiffener.area_mm2()),
        cell(web.panel_width_mm()),
        cell(rivets.diameter_mm),
        option_cell(rivets.pitch_mm),
        option_cell(rivets.rivet_load_n(stiffener, web)),
        cell(rivets.shear_allowable_n()),
        option_cell(rivets.margin_of_safety(stiffener, web)),
    ]
}

/// Stiffener rivet inter-rivet-buckling report row
pub fn stiffener_rivet_buckling_row(
    rivets: &WebStiffenerRivets,
    stiffener: &Stiffener,
    web: &Web,
) -> Vec<String> {
    vec![
        cell(web.y_left_mm),
        cell(web.y_right_mm),
        cell(stiffener.bottom_mm),
        cell(stiffener.thickness_mm),
        lookup_cell(stiffener.crippling_stress()),
        match rivets.inter_rivet_buckling(web) {
            Some(lookup) => lookup_cell(lookup),
            None => "NA".to_string(),
        },
        option_cell(rivets.pitch_mm),
    ]
}

/// Stiffener rivet hole-loss report row
pub fn stiffener_rivet_hole_row(
    rivets: &WebStiffenerRivets,
    web: &Web,
    sf_n: f64,
    he_mm: f64,
) -> Vec<String> {
    let (fsj, ms) = match rivets.pitch_mm {
        Some(pitch) => (
            cell(web.net_section_shear_stress(pitch, rivets.diameter_mm, sf_n, he_mm)),
            match rivets.hole_loss_margin(web, sf_n, he_mm) {
                Some(lookup) => lookup_cell(lookup),
                None => "NA".to_string(),
            },
        ),
        None => ("NA".to_string(), "NA".to_string()),
    };
    vec![
        cell(web.y_left_mm),
        cell(web.y_right_mm),
        option_cell(rivets.pitch_mm),
        cell(rivets.diameter_mm),
        cell(web.shear_stress(sf_n, he_mm)),
        fsj,
        lookup_cell(web.ultimate_shear_allowable()),
        lookup_cell(web.shear_buckling_allowable()),
        ms,
    ]
}

/// Flange rivet report row
pub fn flange_rivet_row(
    rivets: &WebFlangeRivets,
    web: &Web,
    sf_n: f64,
    he_mm: f64,
) -> Vec<String> {
    vec![
        cell(web.y_left_mm),
        cell(web.y_right_mm),
        cell(sf_n / he_mm * 1000.0),
        rivets.rows.to_string(),
        cell(rivets.diameter_mm),
        cell(rivets.pitch_mm),
        cell(rivets.shear_load_n(sf_n, he_mm)),
        cell(rivets.shear_allowable_n()),
        lookup_cell(rivets.hole_loss_margin(web, sf_n, he_mm)),
    ]
}

/// Fatigue spectrum rows, one per load level
pub fn fatigue_rows(assessment: &FatigueAssessment) -> Vec<Vec<String>> {
    assessment
        .rows
        .iter()
        .map(|row| {
            vec![
                cell(row.level_pct),
                cell(row.stress_mpa),
                cell(row.applied_cycles),
                option_cell(row.life_cycles),
                if row.life_cycles.is_some() {
                    cell(row.damage)
                } else {
                    "NA".to_string()
                },
            ]
        })
        .collect()
}

/// Appends report tables as CSV files in a target directory.
///
/// Each table goes to its own file; the header is written when the file
/// is first created, and subsequent rows append (one row per evaluated
/// rib, matching the original report layout).
#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    /// Create a writer targeting `dir`, creating it if needed
    pub fn new(dir: impl AsRef<Path>) -> SparResult<ReportWriter> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir).map_err(|e| {
            SparError::file_error("create report dir", dir.display().to_string(), e.to_string())
        })?;
        Ok(ReportWriter { dir })
    }

    /// The target directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Append rows to a table file, writing the header on first creation
    pub fn append(&self, file_name: &str, header: &[&str], rows: &[Vec<String>]) -> SparResult<()> {
        let path = self.dir.join(file_name);
        let is_new = !path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                SparError::file_error("open report", path.display().to_string(), e.to_string())
            })?;

        let mut writer = csv::Writer::from_writer(file);
        if is_new {
            writer.write_record(header).map_err(|e| {
                SparError::file_error("write header", path.display().to_string(), e.to_string())
            })?;
        }
        for row in rows {
            writer.write_record(row).map_err(|e| {
                SparError::file_error("write row", path.display().to_string(), e.to_string())
            })?;
        }
        writer.flush().map_err(|e| {
            SparError::file_error("flush report", path.display().to_string(), e.to_string())
        })?;
        Ok(())
    }

    /// Write every component table for one evaluated rib
    pub fn write_rib(&self, rib: &Rib, result: &RibEvaluation) -> SparResult<()> {
        let web = rib.web();
        let he = result.he_mm;
        let sf = result.sf_n;
        let mf = result.mf_nm;

        self.append("web.csv", &WEB_HEADER, &[web_row(web, sf, he)])?;
        self.append(
            "stiffener.csv",
            &STIFFENER_HEADER,
            &[stiffener_row(rib.stiffener(), web, he)],
        )?;
        self.append(
            "compression_flange.csv",
            &COMPRESSION_FLANGE_HEADER,
            &[compression_flange_row(rib.compression_flange(), web, mf, he)],
        )?;
        self.append(
            "tension_flange.csv",
            &TENSION_FLANGE_HEADER,
            &[tension_flange_row(rib.tension_flange(), web, mf, he)],
        )?;
        self.append(
            "rivet_web_stiffener_shear.csv",
            &STIFFENER_RIVET_SHEAR_HEADER,
            &[stiffener_rivet_shear_row(
                rib.stiffener_rivets(),
                rib.stiffener(),
                web,
            )],
        )?;
        self.append(
            "rivet_web_stiffener_buckling.csv",
            &STIFFENER_RIVET_BUCKLING_HEADER,
            &[stiffener_rivet_buckling_row(
                rib.stiffener_rivets(),
                rib.stiffener(),
                web,
            )],
        )?;
        self.append(
            "rivet_web_stiffener_hole_loss.csv",
            &STIFFENER_RIVET_HOLE_HEADER,
            &[stiffener_rivet_hole_row(rib.stiffener_rivets(), web, sf, he)],
        )?;
        self.append(
            "rivet_web_flange.csv",
            &FLANGE_RIVET_HEADER,
            &[flange_rivet_row(rib.flange_rivets(), web, sf, he)],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::StationTable;
    use crate::rib::RibBuilder;

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

    #[test]
    fn test_cell_rounding() {
        assert_eq!(cell(123.456), "123");
        assert_eq!(cell(0.0012345), "0.00123");
        assert_eq!(cell(0.0), "0");
    }

    #[test]
    fn test_row_widths_match_headers() {
        let rib = test_rib();
        let result = rib.evaluate(38_429.0, 74_623.0);
        let web = rib.web();
        let he = result.he_mm;

        assert_eq!(web_row(web, result.sf_n, he).len(), WEB_HEADER.len());
        assert_eq!(
            stiffener_row(rib.stiffener(), web, he).len(),
            STIFFENER_HEADER.len()
        );
        assert_eq!(
            compression_flange_row(rib.compression_flange(), web, result.mf_nm, he).len(),
            COMPRESSION_FLANGE_HEADER.len()
        );
        assert_eq!(
            tension_flange_row(rib.tension_flange(), web, result.mf_nm, he).len(),
            TENSION_FLANGE_HEADER.len()
        );
        assert_eq!(
            stiffener_rivet_shear_row(rib.stiffener_rivets(), rib.stiffener(), web).len(),
            STIFFENER_RIVET_SHEAR_HEADER.len()
        );
        assert_eq!(
            stiffener_rivet_buckling_row(rib.stiffener_rivets(), rib.stiffener(), web).len(),
            STIFFENER_RIVET_BUCKLING_HEADER.len()
        );
        assert_eq!(
            stiffener_rivet_hole_row(rib.stiffener_rivets(), web, result.sf_n, he).len(),
            STIFFENER_RIVET_HOLE_HEADER.len()
        );
        assert_eq!(
            flange_rivet_row(rib.flange_rivets(), web, result.sf_n, he).len(),
            FLANGE_RIVET_HEADER.len()
        );
    }

    #[test]
    fn test_fatigue_rows() {
        let assessment = rib_fatigue_fixture();
        let rows = fatigue_rows(&assessment);
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0].len(), FATIGUE_HEADER.len());
    }

    fn rib_fatigue_fixture() -> FatigueAssessment {
        use crate::materials::SnCurve;
        FatigueAssessment::assess(SnCurve::TensionFlange, 260.0)
    }

    #[test]
    fn test_report_files_written() {
        let dir = std::env::temp_dir().join("sparcalc_test_report");
        let _ = std::fs::remove_dir_all(&dir);

        let writer = ReportWriter::new(&dir).unwrap();
        let rib = test_rib();
        let result = rib.evaluate(38_429.0, 74_623.0);
        writer.write_rib(&rib, &result).unwrap();

        let web_csv = std::fs::read_to_string(dir.join("web.csv")).unwrap();
        assert!(web_csv.contains("left STA [mm]"));
        assert_eq!(web_csv.lines().count(), 2);

        // Appending a second evaluation must not duplicate the header
        writer.write_rib(&rib, &result).unwrap();
        let web_csv = std::fs::read_to_string(dir.join("web.csv")).unwrap();
        assert_eq!(web_csv.lines().count(), 3);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
