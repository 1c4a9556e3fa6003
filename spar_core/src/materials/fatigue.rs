//! # Fatigue Life Estimation
//!
//! S-N curves for the flange extrusions (stress ratio R = 0) and a
//! Miner's-rule damage accumulation over the design load spectrum.
//!
//! The spectrum is expressed as seven load levels, each a percentage of
//! the limit stress, with occurrence rates per 1000 flight hours. The
//! cumulative damage `sum(n/N)` gives a mean life of `1000 / damage`
//! hours; dividing by the scatter factor yields the safe life.

use serde::{Deserialize, Serialize};

use crate::curves::{Lookup, PiecewiseLinear};
use crate::units::mpa_to_ksi;

/// Load levels of the design spectrum, percent of limit stress
pub const SPECTRUM_LEVELS_PCT: [f64; 7] = [40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0];

/// Occurrence rates of the spectrum levels, cycles per 1000 flight hours
pub const SPECTRUM_CYCLES_PER_KHR: [f64; 7] =
    [20_000.0, 6_000.0, 2_000.0, 600.0, 200.0, 60.0, 20.0];

/// Default scatter factor applied to the mean life
pub const SCATTER_FACTOR: f64 = 2.0;

/// Compression-flange S-N data: peak stress [ksi] vs. log10(cycles)
static SN_COMPRESSION: PiecewiseLinear = PiecewiseLinear::new(
    "compression flange S-N",
    &[(6.0, 7.0), (11.0, 6.0), (18.5, 5.0), (32.0, 4.0), (40.0, 3.3)],
);

/// Tension-flange S-N data: peak stress [ksi] vs. log10(cycles)
static SN_TENSION: PiecewiseLinear = PiecewiseLinear::new(
    "tension flange S-N",
    &[(13.0, 8.0), (15.0, 7.0), (18.0, 6.0), (27.0, 5.0), (46.0, 4.0)],
);

/// Which member's S-N curve to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnCurve {
    /// Upper (compression) flange curve
    CompressionFlange,
    /// Lower (tension) flange curve
    TensionFlange,
}

impl SnCurve {
    fn table(&self) -> &'static PiecewiseLinear {
        match self {
            SnCurve::CompressionFlange => &SN_COMPRESSION,
            SnCurve::TensionFlange => &SN_TENSION,
        }
    }

    /// Cycles to failure at a peak stress in MPa
    pub fn life_cycles(&self, peak_stress_mpa: f64) -> Lookup {
        let exponent = self.table().eval(mpa_to_ksi(peak_stress_mpa))?;
        Ok(10f64.powf(exponent))
    }
}

/// One row of the damage accumulation table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpectrumRow {
    /// Load level, percent of limit
    pub level_pct: f64,
    /// Stress at this level [MPa]
    pub stress_mpa: f64,
    /// Applied cycles per 1000 flight hours
    pub applied_cycles: f64,
    /// Cycles to failure at this stress, if the S-N curve covers it
    pub life_cycles: Option<f64>,
    /// Damage fraction n/N (zero when the level is uncovered)
    pub damage: f64,
}

/// Result of a spectrum fatigue assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FatigueAssessment {
    /// Per-level rows, one per spectrum level
    pub rows: Vec<SpectrumRow>,
    /// Cumulative damage sum(n/N) per 1000 flight hours
    pub cumulative_damage: f64,
    /// Implied mean life in flight hours
    pub mean_life_hr: f64,
    /// Mean life divided by the scatter factor
    pub safe_life_hr: f64,
    /// Spectrum levels whose stress fell outside the S-N data
    pub uncovered_levels: Vec<f64>,
}

impl FatigueAssessment {
    /// Accumulate spectrum damage for a limit peak stress.
    ///
    /// Levels whose scaled stress falls outside the S-N chart contribute
    /// no damage and are listed in `uncovered_levels` for the caller to
    /// surface as diagnostics.
    pub fn assess(curve: SnCurve, peak_stress_mpa: f64) -> FatigueAssessment {
        let mut rows = Vec::with_capacity(SPECTRUM_LEVELS_PCT.len());
        let mut cumulative = 0.0;
        let mut uncovered = Vec::new();

        for (&level, &applied) in SPECTRUM_LEVELS_PCT.iter().zip(&SPECTRUM_CYCLES_PER_KHR) {
            let stress = peak_stress_mpa * level / 100.0;
            match curve.life_cycles(stress) {
                Ok(life) => {
                    let damage = applied / life;
                    cumulative += damage;
                    rows.push(SpectrumRow {
                        level_pct: level,
                        stress_mpa: stress,
                        applied_cycles: applied,
                        life_cycles: Some(life),
                        damage,
                    });
                }
                Err(_) => {
                    uncovered.push(level);
                    rows.push(SpectrumRow {
                        level_pct: level,
                        stress_mpa: stress,
                        applied_cycles: applied,
                        life_cycles: None,
                        damage: 0.0,
                    });
                }
            }
        }

        let mean_life_hr = if cumulative > 0.0 {
            1000.0 / cumulative
        } else {
            f64::INFINITY
        };

        FatigueAssessment {
            rows,
            cumulative_damage: cumulative,
            mean_life_hr,
            safe_life_hr: mean_life_hr / SCATTER_FACTOR,
            uncovered_levels: uncovered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::ksi_to_mpa;

    #[test]
    fn test_life_cycles_interpolation() {
        // 18.5 ksi on the compression curve reads exactly 10^5 cycles
        let life = SnCurve::CompressionFlange
            .life_cycles(ksi_to_mpa(18.5))
            .unwrap();
        assert!((life - 1e5).abs() / 1e5 < 1e-9);

        // 15 ksi on the tension curve reads 10^7
        let life = SnCurve::TensionFlange.life_cycles(ksi_to_mpa(15.0)).unwrap();
        assert!((life - 1e7).abs() / 1e7 < 1e-9);
    }

    #[test]
    fn test_life_out_of_domain() {
        assert!(SnCurve::CompressionFlange.life_cycles(ksi_to_mpa(3.0)).is_err());
        assert!(SnCurve::CompressionFlange.life_cycles(ksi_to_mpa(50.0)).is_err());
    }

    #[test]
    fn test_assessment_hand_computed() {
        // Peak 40 ksi tension: every level from 40% (16 ksi) up is covered,
        // damage dominated by the high-cycle low levels
        let peak = ksi_to_mpa(40.0);
        let result = FatigueAssessment::assess(SnCurve::TensionFlange, peak);
        assert!(result.uncovered_levels.is_empty());
        assert_eq!(result.rows.len(), 7);

        // Hand-check the 40% row: 16 ksi -> log10 N = 7 - (16-15)/3 = 6.667
        let n40 = 10f64.powf(7.0 - 1.0 / 3.0);
        assert!((result.rows[0].damage - 20_000.0 / n40).abs() / result.rows[0].damage < 1e-6);

        // Mean and safe life follow from the damage sum
        assert!((result.mean_life_hr - 1000.0 / result.cumulative_damage).abs() < 1e-9);
        assert!((result.safe_life_hr - result.mean_life_hr / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_assessment_uncovered_low_levels() {
        // Peak 25 ksi tension: 40% (10 ksi) and 50% (12.5 ksi) fall below
        // the chart and must be reported, not silently zeroed
        let result = FatigueAssessment::assess(SnCurve::TensionFlange, ksi_to_mpa(25.0));
        assert_eq!(result.uncovered_levels, vec![40.0, 50.0]);
        assert!(result.rows[0].life_cycles.is_none());
        assert!(result.cumulative_damage > 0.0);
    }

    #[test]
    fn test_assessment_serialization() {
        let result = FatigueAssessment::assess(SnCurve::CompressionFlange, ksi_to_mpa(30.0));
        let json = serde_json::to_string(&result).unwrap();
        let roundtrip: FatigueAssessment = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.rows.len(), result.rows.len());
    }
}
