//! # Spanwise Bending Stiffness
//!
//! Effective bending stiffness EI of the spar at each rib station, from
//! the web sheet and the two flange effective areas acting at the couple
//! arm `he/2`. Used to check the wing's aeroelastic stiffness target
//! after sizing.

use serde::{Deserialize, Serialize};

use crate::errors::{SparError, SparResult};
use crate::loads::{front_spar_height_mm, StationTable, HALF_SPAN_MM};
use crate::materials::E_ALUMINUM_MPA;
use crate::rib::Rib;
use crate::units::round_sig;

/// Stiffness report columns
pub const STIFFNESS_HEADER: [&str; 12] = [
    "STA [mm]",
    "he [mm]",
    "web thickness [mm]",
    "web I [mm^4]",
    "web EI [N*m^2]",
    "compression area [mm^2]",
    "compression I [mm^4]",
    "compression EI [N*m^2]",
    "tension area [mm^2]",
    "tension I [mm^4]",
    "tension EI [N*m^2]",
    "total EI [N*m^2]",
];

/// Bending stiffness contributions at one station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationStiffness {
    /// Station [mm]
    pub sta_mm: f64,
    /// Flange couple arm [mm]
    pub he_mm: f64,
    /// Web thickness [mm]
    pub web_thickness_mm: f64,
    /// Web sheet inertia t*h^3/12 [mm^4]
    pub web_inertia_mm4: f64,
    /// Web contribution E*I [N*m^2]
    pub web_ei_nm2: f64,
    /// Compression flange effective area [mm^2]
    pub compression_area_mm2: f64,
    /// Compression flange inertia A*(he/2)^2 [mm^4]
    pub compression_inertia_mm4: f64,
    /// Compression flange contribution E*I [N*m^2]
    pub compression_ei_nm2: f64,
    /// Tension flange effective area [mm^2]
    pub tension_area_mm2: f64,
    /// Tension flange inertia A*(he/2)^2 [mm^4]
    pub tension_inertia_mm4: f64,
    /// Tension flange contribution E*I [N*m^2]
    pub tension_ei_nm2: f64,
    /// Total E*I at the station [N*m^2]
    pub total_ei_nm2: f64,
}

/// Web sheet inertia about its mid-height [mm^4]
fn web_inertia_mm4(web_thickness_mm: f64, height_mm: f64) -> f64 {
    web_thickness_mm * height_mm.powi(3) / 12.0
}

/// Flange inertia as a point area at the couple arm [mm^4]
fn flange_inertia_mm4(area_mm2: f64, he_mm: f64) -> f64 {
    area_mm2 * (he_mm / 2.0).powi(2)
}

/// MPa * mm^4 -> N*m^2
fn ei_nm2(inertia_mm4: f64) -> f64 {
    E_ALUMINUM_MPA * inertia_mm4 / 1.0e6
}

/// Stiffness contributions of a sized rib at its inboard station
pub fn station_stiffness(rib: &Rib) -> StationStiffness {
    let web = rib.web();
    let he = rib.he_mm();
    let web_t = web.thickness_mm;

    let area_c = rib.compression_flange().section.area_mm2(web_t);
    let area_t = rib.tension_flange().section.area_mm2(web_t);

    let i_w = web_inertia_mm4(web_t, web.spar_height_mm);
    let i_c = flange_inertia_mm4(area_c, he);
    let i_t = flange_inertia_mm4(area_t, he);

    let ei_w = ei_nm2(i_w);
    let ei_c = ei_nm2(i_c);
    let ei_t = ei_nm2(i_t);

    StationStiffness {
        sta_mm: rib.y_left_mm,
        he_mm: he,
        web_thickness_mm: web_t,
        web_inertia_mm4: i_w,
        web_ei_nm2: ei_w,
        compression_area_mm2: area_c,
        compression_inertia_mm4: i_c,
        compression_ei_nm2: ei_c,
        tension_area_mm2: area_t,
        tension_inertia_mm4: i_t,
        tension_ei_nm2: ei_t,
        total_ei_nm2: ei_w + ei_c + ei_t,
    }
}

/// Tip-station EI, extrapolated from the outboard rib.
///
/// No rib sits at the tip itself; the outboard bay's section is reused
/// with the tip spar height and the couple arm shifted by the height
/// difference.
pub fn tip_ei_nm2(outboard_rib: &Rib) -> f64 {
    let web = outboard_rib.web();
    let tip_height = front_spar_height_mm(HALF_SPAN_MM);
    let he = outboard_rib.he_mm() + tip_height - web.spar_height_mm;

    let area_c = outboard_rib
        .compression_flange()
        .section
        .area_mm2(web.thickness_mm);
    let area_t = outboard_rib
        .tension_flange()
        .section
        .area_mm2(web.thickness_mm);

    let i_w = web_inertia_mm4(web.thickness_mm, tip_height);
    let i_c = flange_inertia_mm4(area_c, he);
    let i_t = flange_inertia_mm4(area_t, he);
    ei_nm2(i_w + i_c + i_t)
}

/// Span-weighted average EI over the rib bays.
///
/// `station_ei` holds one value per rib station plus the tip, inboard to
/// outboard. Each bay contributes the mean of its end values weighted by
/// its pitch; the sum is taken over the half span.
pub fn span_average_ei(stations: &StationTable, station_ei: &[f64]) -> SparResult<f64> {
    if station_ei.len() != stations.len() + 1 {
        return Err(SparError::invalid_input(
            "station_ei",
            station_ei.len().to_string(),
            format!("Expected {} values (stations plus tip)", stations.len() + 1),
        ));
    }
    let mut weighted = 0.0;
    for i in 0..stations.len() {
        let mean = (station_ei[i] + station_ei[i + 1]) / 2.0;
        weighted += mean * stations.pitch(i)?;
    }
    Ok(weighted / HALF_SPAN_MM)
}

/// Stiffness report row
pub fn stiffness_row(s: &StationStiffness) -> Vec<String> {
    [
        s.sta_mm,
        s.he_mm,
        s.web_thickness_mm,
        s.web_inertia_mm4,
        s.web_ei_nm2,
        s.compression_area_mm2,
        s.compression_inertia_mm4,
        s.compression_ei_nm2,
        s.tension_area_mm2,
        s.tension_inertia_mm4,
        s.tension_ei_nm2,
        s.total_ei_nm2,
    ]
    .iter()
    .map(|&v| round_sig(v, 3).to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rib::RibBuilder;

    fn test_rib(index: usize) -> Rib {
        RibBuilder::new(&StationTable::standard_wing(), index)
            .unwrap()
            .web(2.03, 3)
            .unwrap()
            .stiffener(2.03, 20.0, 25.0)
            .unwrap()
            .compression_flange(6.0, 34.5, 34.5)
            .unwrap()
            .tension_flange(8.0, 34.5, 34.5)
            .unwrap()
            .stiffener_rivets(3.175)
            .unwrap()
            .flange_rivets(6.35, 4.0, 2)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_station_stiffness_parts_sum() {
        let rib = test_rib(0);
        let s = station_stiffness(&rib);
        assert!(
            (s.total_ei_nm2 - (s.web_ei_nm2 + s.compression_ei_nm2 + s.tension_ei_nm2)).abs()
                < 1e-9
        );
        // Flanges dominate the web sheet
        assert!(s.compression_ei_nm2 > s.web_ei_nm2);
    }

    #[test]
    fn test_web_inertia_formula() {
        let rib = test_rib(0);
        let s = station_stiffness(&rib);
        let expected = 2.03 * 320.0_f64.powi(3) / 12.0;
        assert!((s.web_inertia_mm4 - expected).abs() < 1e-6);
    }

    #[test]
    fn test_tip_extrapolation_below_outboard() {
        let rib = test_rib(8);
        let tip = tip_ei_nm2(&rib);
        let outboard = station_stiffness(&rib).total_ei_nm2;
        // The section shrinks toward the tip
        assert!(tip < outboard);
        assert!(tip > 0.0);
    }

    #[test]
    fn test_span_average() {
        let stations = StationTable::standard_wing();
        // Constant EI averages to itself scaled by covered span fraction
        let ei = vec![2.0e5; stations.len() + 1];
        let avg = span_average_ei(&stations, &ei).unwrap();
        let covered = (HALF_SPAN_MM - 625.0) / HALF_SPAN_MM;
        assert!((avg - 2.0e5 * covered).abs() < 1e-6);
    }

    #[test]
    fn test_span_average_length_check() {
        let stations = StationTable::standard_wing();
        assert!(span_average_ei(&stations, &[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_stiffness_row_width() {
        let rib = test_rib(0);
        let row = stiffness_row(&station_stiffness(&rib));
        assert_eq!(row.len(), STIFFNESS_HEADER.len());
    }
}
