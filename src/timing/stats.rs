//! Decision scoring for a completed loop run

use serde::Serialize;

use crate::error::{Result, TedError};

/// Decisions discarded as acquisition before scoring by default
pub const DEFAULT_PREAMBLE_SYMBOLS: usize = 30;

/// Accuracy of a loop run against the transmitted symbols
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Statistics {
    /// Symbols skipped at the start of the run
    pub preamble: usize,
    /// Symbols compared after the preamble
    pub num_symbols: usize,
    /// Decisions equal to the transmitted symbol
    pub num_correct: usize,
    /// `num_correct / num_symbols` in [0, 1]
    pub fraction_correct: f64,
    /// Bit-error rate in percent, `100 · (1 − fraction_correct)`
    pub ber_percent: f64,
    /// Phase estimate after the last iteration, in samples
    pub final_offset: f64,
}

impl Statistics {
    /// Compare decisions with the transmitted symbols.
    ///
    /// # Arguments
    /// * `decisions` - Decision history, initial condition first
    /// * `offsets` - Phase history of the run
    /// * `symbols` - Transmitted symbols, same length as `decisions`
    /// * `preamble` - Leading symbols to skip (0 keeps all of them)
    pub fn evaluate(decisions: &[i8], offsets: &[f64], symbols: &[i8], preamble: usize) -> Result<Self> {
        if decisions.len() != symbols.len() {
            return Err(TedError::LengthMismatch {
                decisions: decisions.len(),
                symbols: symbols.len(),
            });
        }
        if preamble >= symbols.len() {
            return Err(TedError::PreambleTooLong {
                preamble,
                available: symbols.len(),
            });
        }
        let final_offset = *offsets.last().ok_or(TedError::EmptyTrace)?;

        let num_symbols = symbols.len() - preamble;
        let num_correct = decisions[preamble..]
            .iter()
            .zip(&symbols[preamble..])
            .filter(|(d, s)| d == s)
            .count();

        let fraction_correct = num_correct as f64 / num_symbols as f64;

        Ok(Self {
            preamble,
            num_symbols,
            num_correct,
            fraction_correct,
            ber_percent: 100.0 * (1.0 - fraction_correct),
            final_offset,
        })
    }

    /// Fraction correct in percent
    pub fn percent_correct(&self) -> f64 {
        100.0 * self.fraction_correct
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_correct() {
        let symbols = vec![1, -1, 1, 1, -1];
        let stats = Statistics::evaluate(&symbols, &[0.5, 0.6, 0.7, 0.8], &symbols, 0).unwrap();
        assert_eq!(stats.num_correct, 5);
        assert_eq!(stats.fraction_correct, 1.0);
        assert_eq!(stats.ber_percent, 0.0);
        assert_eq!(stats.final_offset, 0.8);
    }

    #[test]
    fn test_ber_is_complement() {
        let symbols = vec![1, 1, -1, -1, 1, -1, 1, 1];
        let decisions = vec![0, 1, -1, 1, 1, -1, -1, 1];
        let stats = Statistics::evaluate(&decisions, &[1.0; 7], &symbols, 0).unwrap();
        // Mismatches at 0 (initial condition), 3 and 6
        assert_eq!(stats.num_correct, 5);
        assert!((stats.percent_correct() - 62.5).abs() < 1e-12);
        assert!((stats.ber_percent - 37.5).abs() < 1e-12);
    }

    #[test]
    fn test_preamble_excluded() {
        let symbols = vec![1, 1, 1, 1, -1, -1];
        // Garbage during acquisition, clean afterwards
        let decisions = vec![0, -1, -1, 1, -1, -1];
        let stats = Statistics::evaluate(&decisions, &[2.0; 5], &symbols, 3).unwrap();
        assert_eq!(stats.num_symbols, 3);
        assert_eq!(stats.num_correct, 3);
        assert_eq!(stats.ber_percent, 0.0);
    }

    #[test]
    fn test_preamble_too_long() {
        let symbols = vec![1i8; 30];
        let err = Statistics::evaluate(&symbols, &[0.0; 29], &symbols, DEFAULT_PREAMBLE_SYMBOLS).unwrap_err();
        assert_eq!(err, TedError::PreambleTooLong { preamble: 30, available: 30 });
    }

    #[test]
    fn test_length_mismatch() {
        let err = Statistics::evaluate(&[1, 1, 1], &[0.0; 2], &[1, 1], 0).unwrap_err();
        assert_eq!(err, TedError::LengthMismatch { decisions: 3, symbols: 2 });
    }

    #[test]
    fn test_empty_trace() {
        let err = Statistics::evaluate(&[1], &[], &[1], 0).unwrap_err();
        assert_eq!(err, TedError::EmptyTrace);
    }
}
