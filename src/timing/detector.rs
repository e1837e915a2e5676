//! Timing error detectors
//!
//! Each detector is a pure function of a few interpolated samples. The loop
//! picks one per run through [`ErrorMetric`] and multiplies the raw error by
//! [`ErrorMetric::loop_polarity`] so that every detector drives the phase
//! with `tau += gain · error`.

use std::fmt;
use std::str::FromStr;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::utils::hard_decision;

/// Default early-late spacing divisor: the gate is offset by `sps / delta`
pub const DEFAULT_GATE_DELTA: usize = 4;

/// Selectable timing error detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ErrorMetric {
    /// Decision-directed Mueller-Muller
    #[default]
    #[serde(rename = "mueller")]
    MuellerMuller,
    /// Gardner zero-crossing detector (needs the half-symbol sample)
    #[serde(rename = "gardner")]
    Gardner,
    /// Early-late gate around the current sampling instant
    #[serde(rename = "earlylategate")]
    EarlyLateGate,
}

impl ErrorMetric {
    /// Every detector, in a stable order
    pub const ALL: [ErrorMetric; 3] = [
        ErrorMetric::MuellerMuller,
        ErrorMetric::Gardner,
        ErrorMetric::EarlyLateGate,
    ];

    /// Sign applied to the raw detector output before the loop filter.
    ///
    /// Gardner and early-late are negated so that all three share the
    /// `tau +=` convention. The choice is empirical and must not be flipped.
    pub fn loop_polarity(self) -> f64 {
        match self {
            ErrorMetric::MuellerMuller => 1.0,
            ErrorMetric::Gardner | ErrorMetric::EarlyLateGate => -1.0,
        }
    }

    /// Selector string, as accepted by `FromStr`
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorMetric::MuellerMuller => "mueller",
            ErrorMetric::Gardner => "gardner",
            ErrorMetric::EarlyLateGate => "earlylategate",
        }
    }
}

impl fmt::Display for ErrorMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mueller" | "muellermuller" | "mm" => Ok(ErrorMetric::MuellerMuller),
            "gardner" => Ok(ErrorMetric::Gardner),
            "earlylategate" | "early_late_gate" | "elg" => Ok(ErrorMetric::EarlyLateGate),
            other => Err(format!("unknown error metric: {}", other)),
        }
    }
}

/// Mueller-Muller error.
///
/// # Arguments
/// * `val_cur` - Sample at the current phase estimate
/// * `val_prev` - Sample one symbol earlier
/// * `symbol_prev` - Previous hard decision (±1, or the initial condition)
pub fn mueller_muller(val_cur: Complex64, val_prev: Complex64, symbol_prev: i8) -> f64 {
    let symbol_cur = Complex64::new(hard_decision(val_cur.re) as f64, 0.0);
    let symbol_prev = Complex64::new(symbol_prev as f64, 0.0);
    (val_cur * symbol_prev.conj() - symbol_cur * val_prev.conj()).re
}

/// Gardner error: Re{ conj(middle) · (current − previous) }.
pub fn gardner(val_cur: Complex64, val_prev: Complex64, val_middle: Complex64) -> f64 {
    (val_middle.conj() * (val_cur - val_prev)).re
}

/// Early-late gate error: |early|² − |late|.
pub fn early_late_gate(val_early: Complex64, val_late: Complex64) -> f64 {
    val_early.norm_sqr() - val_late.norm()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64) -> Complex64 {
        Complex64::new(re, 0.0)
    }

    #[test]
    fn test_mueller_muller_on_time_is_zero() {
        // Sampling exactly on symbols: x_k = a_k
        for (a_prev, a_cur) in [(1, 1), (1, -1), (-1, 1), (-1, -1)] {
            let e = mueller_muller(c(a_cur as f64), c(a_prev as f64), a_prev);
            assert_eq!(e, 0.0, "a_prev={} a_cur={}", a_prev, a_cur);
        }
    }

    #[test]
    fn test_mueller_muller_formula() {
        // symbol_cur = sign(0.8) = 1
        // e = 0.8·1 − 1·(−0.6) = 1.4
        let e = mueller_muller(c(0.8), c(-0.6), 1);
        assert!((e - 1.4).abs() < 1e-12);

        // Initial condition 0 kills the first term
        let e = mueller_muller(c(0.8), c(0.5), 0);
        assert!((e + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_mueller_muller_ignores_quadrature_of_decision() {
        let e1 = mueller_muller(Complex64::new(0.7, 0.3), Complex64::new(-0.9, 0.2), -1);
        // Re(0.7+0.3j · −1) − Re(1 · (−0.9−0.2j)) = −0.7 + 0.9
        assert!((e1 - 0.2).abs() < 1e-12, "e1 = {}", e1);
    }

    #[test]
    fn test_gardner_formula() {
        // Symmetric transition sampled on time: middle sample is zero
        assert_eq!(gardner(c(1.0), c(-1.0), c(0.0)), 0.0);
        // Late sampling on a -1 → +1 transition: middle already positive
        let e = gardner(c(1.0), c(-1.0), c(0.2));
        assert!((e - 0.4).abs() < 1e-12);
        // No transition, no information beyond the middle sample
        assert_eq!(gardner(c(1.0), c(1.0), c(0.9)), 0.0);
    }

    #[test]
    fn test_gardner_complex_conjugate() {
        let e = gardner(Complex64::new(1.0, 1.0), Complex64::new(-1.0, -1.0), Complex64::new(0.0, 0.5));
        // conj(0.5j)·(2+2j) = −0.5j·(2+2j) = 1 − 1j
        assert!((e - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_early_late_gate_formula() {
        let e = early_late_gate(c(0.5), c(-0.8));
        assert!((e - (0.25 - 0.8)).abs() < 1e-12);
        let e = early_late_gate(Complex64::new(0.6, 0.8), Complex64::new(0.0, 2.0));
        assert!((e - (1.0 - 2.0)).abs() < 1e-12);
    }

    #[test]
    fn test_loop_polarity() {
        assert_eq!(ErrorMetric::MuellerMuller.loop_polarity(), 1.0);
        assert_eq!(ErrorMetric::Gardner.loop_polarity(), -1.0);
        assert_eq!(ErrorMetric::EarlyLateGate.loop_polarity(), -1.0);
    }

    #[test]
    fn test_metric_parsing() {
        assert_eq!("mueller".parse::<ErrorMetric>(), Ok(ErrorMetric::MuellerMuller));
        assert_eq!("Gardner".parse::<ErrorMetric>(), Ok(ErrorMetric::Gardner));
        assert_eq!("earlylategate".parse::<ErrorMetric>(), Ok(ErrorMetric::EarlyLateGate));
        assert!("costas".parse::<ErrorMetric>().is_err());

        for metric in ErrorMetric::ALL {
            assert_eq!(metric.to_string().parse::<ErrorMetric>(), Ok(metric));
        }
    }
}
