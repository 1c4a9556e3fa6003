//! # Empirical Curve Infrastructure
//!
//! Piecewise-linear interpolation over literal control-point tables taken
//! from handbook charts, with an explicit out-of-domain result instead of a
//! NaN sentinel.
//!
//! ## Domain-boundary policy
//!
//! Evaluating a curve outside its tabulated range is *not* an error: the
//! handbook charts simply end. A lookup returns
//! `Err(OutOfDomain { .. })` tagged with which end of the table was missed,
//! and the value propagates through dependent formulas via `?`. Only the
//! rib-level decision logic resolves what an undefined allowable means for
//! the overall verdict (see [`crate::rib`]).
//!
//! ## Example
//!
//! ```rust
//! use spar_core::curves::{Bound, PiecewiseLinear};
//!
//! const DEMO: PiecewiseLinear =
//!     PiecewiseLinear::new("demo", &[(0.0, 0.0), (1.0, 2.0), (2.0, 2.0)]);
//!
//! assert_eq!(DEMO.eval(0.5).unwrap(), 1.0);
//! assert_eq!(DEMO.eval(3.0).unwrap_err().bound, Bound::AboveMax);
//! ```

use serde::{Deserialize, Serialize};

/// Which end of a tabulated domain an input fell outside of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bound {
    /// Input below the first tabulated abscissa
    BelowMin,
    /// Input above the last tabulated abscissa
    AboveMax,
}

/// A lookup that fell outside the tabulated domain of an empirical curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutOfDomain {
    /// Name of the curve or table (static, for diagnostics)
    pub curve: &'static str,
    /// Which end of the domain was missed
    pub bound: Bound,
    /// The offending input value
    pub value: f64,
}

impl std::fmt::Display for OutOfDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let side = match self.bound {
            Bound::BelowMin => "below",
            Bound::AboveMax => "above",
        };
        write!(
            f,
            "{} is {} the tabulated domain of '{}'",
            self.value, side, self.curve
        )
    }
}

/// Result of an empirical curve or table lookup
pub type Lookup = Result<f64, OutOfDomain>;

/// Piecewise-linear interpolation over a literal `(x, y)` table.
///
/// Control points must be sorted by ascending `x`. Endpoints are in-domain;
/// strictly outside the first/last abscissa the lookup returns
/// [`OutOfDomain`].
#[derive(Debug, Clone, Copy)]
pub struct PiecewiseLinear {
    name: &'static str,
    points: &'static [(f64, f64)],
}

impl PiecewiseLinear {
    /// Create a curve over a static control-point table
    pub const fn new(name: &'static str, points: &'static [(f64, f64)]) -> Self {
        PiecewiseLinear { name, points }
    }

    /// Curve name used in diagnostics
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Inclusive tabulated domain `(min_x, max_x)`
    pub fn domain(&self) -> (f64, f64) {
        (self.points[0].0, self.points[self.points.len() - 1].0)
    }

    /// Interpolate the curve at `x`
    pub fn eval(&self, x: f64) -> Lookup {
        let (min_x, max_x) = self.domain();
        if !(x >= min_x) {
            return Err(OutOfDomain {
                curve: self.name,
                bound: Bound::BelowMin,
                value: x,
            });
        }
        if x > max_x {
            return Err(OutOfDomain {
                curve: self.name,
                bound: Bound::AboveMax,
                value: x,
            });
        }

        // Find the segment containing x and interpolate linearly
        for window in self.points.windows(2) {
            let (x0, y0) = window[0];
            let (x1, y1) = window[1];
            if x <= x1 {
                let t = if x1 == x0 { 0.0 } else { (x - x0) / (x1 - x0) };
                return Ok(y0 + t * (y1 - y0));
            }
        }
        // x == max_x exactly
        Ok(self.points[self.points.len() - 1].1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVE: PiecewiseLinear = PiecewiseLinear::new(
        "test",
        &[(1.0, 10.0), (2.0, 20.0), (4.0, 20.0), (8.0, 4.0)],
    );

    #[test]
    fn test_interpolation_within_segments() {
        assert!((CURVE.eval(1.5).unwrap() - 15.0).abs() < 1e-12);
        assert!((CURVE.eval(3.0).unwrap() - 20.0).abs() < 1e-12);
        assert!((CURVE.eval(6.0).unwrap() - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_endpoints_in_domain() {
        assert_eq!(CURVE.eval(1.0).unwrap(), 10.0);
        assert_eq!(CURVE.eval(8.0).unwrap(), 4.0);
    }

    #[test]
    fn test_continuity_at_breakpoints() {
        // Left and right limits agree at each interior control point
        for &(x, y) in &[(2.0, 20.0), (4.0, 20.0)] {
            let eps = 1e-9;
            let left = CURVE.eval(x - eps).unwrap();
            let right = CURVE.eval(x + eps).unwrap();
            assert!((left - y).abs() < 1e-6);
            assert!((right - y).abs() < 1e-6);
        }
    }

    #[test]
    fn test_out_of_domain() {
        let below = CURVE.eval(0.5).unwrap_err();
        assert_eq!(below.bound, Bound::BelowMin);
        assert_eq!(below.curve, "test");

        let above = CURVE.eval(8.0001).unwrap_err();
        assert_eq!(above.bound, Bound::AboveMax);
    }

    #[test]
    fn test_nan_input_is_below_min() {
        // NaN fails the >= min comparison; it must not interpolate silently
        assert!(CURVE.eval(f64::NAN).is_err());
    }

    #[test]
    fn test_out_of_domain_display() {
        let err = CURVE.eval(9.0).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("above"));
        assert!(text.contains("test"));
    }
}
