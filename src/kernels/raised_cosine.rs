//! Raised Cosine (RC) pulse shaping filter
//!
//! Full (not root) raised cosine, so the shaped pulse train is ISI-free on
//! its own: the impulse response crosses zero at every multiple of `sps`
//! samples from the center tap.

use std::f64::consts::PI;

use super::{check_odd_taps, FirKernel};
use crate::error::{ensure_finite, Result, TedError};
use crate::utils::sinc;

/// Raised Cosine filter
#[derive(Debug, Clone)]
pub struct RaisedCosine {
    coeffs: Vec<f64>,
    zero_crossings: Vec<usize>,
    rolloff: f64,
    samples_per_symbol: usize,
}

impl RaisedCosine {
    /// Create a new RC filter
    ///
    /// # Arguments
    /// * `taps` - Filter length, odd so the peak sits on a single center tap
    /// * `rolloff` - Excess bandwidth β in [0, 1]
    /// * `samples_per_symbol` - Symbol period in samples
    pub fn new(taps: usize, rolloff: f64, samples_per_symbol: usize) -> Result<Self> {
        check_odd_taps("raised cosine", taps)?;
        ensure_finite("rolloff", rolloff)?;
        if !(0.0..=1.0).contains(&rolloff) {
            return Err(TedError::InvalidRolloff(rolloff));
        }
        if samples_per_symbol == 0 {
            return Err(TedError::ZeroSamplesPerSymbol);
        }

        let coeffs = generate_rc_coefficients(taps, rolloff, samples_per_symbol);
        let zero_crossings = symbol_spaced_zeros(taps, samples_per_symbol);

        tracing::debug!(taps, rolloff, sps = samples_per_symbol, "built raised-cosine kernel");

        Ok(Self {
            coeffs,
            zero_crossings,
            rolloff,
            samples_per_symbol,
        })
    }

    /// Create with the default length and rolloff (101 taps, β=0.3)
    pub fn default_for_sps(samples_per_symbol: usize) -> Result<Self> {
        Self::new(super::DEFAULT_RC_TAPS, super::DEFAULT_ROLLOFF, samples_per_symbol)
    }

    /// Tap indices where the continuous response crosses zero
    /// (center ± k·sps, center excluded). Diagnostic only.
    pub fn zero_crossings(&self) -> &[usize] {
        &self.zero_crossings
    }

    pub fn rolloff(&self) -> f64 {
        self.rolloff
    }

    pub fn samples_per_symbol(&self) -> usize {
        self.samples_per_symbol
    }
}

impl FirKernel for RaisedCosine {
    fn coefficients(&self) -> &[f64] {
        &self.coeffs
    }
}

/// Continuous RC impulse response at `t` samples with symbol period `ts`.
pub fn raised_cosine_response(t: f64, rolloff: f64, ts: f64) -> f64 {
    if t.abs() < 1e-12 {
        return 1.0;
    }
    if rolloff > 0.0 && (t.abs() - ts / (2.0 * rolloff)).abs() < 1e-10 {
        // Removable singularity at t = ±T/(2β)
        return PI / 4.0 * sinc(t / ts);
    }
    let x = 2.0 * rolloff * t / ts;
    sinc(t / ts) * (PI * rolloff * t / ts).cos() / (1.0 - x * x)
}

fn generate_rc_coefficients(taps: usize, rolloff: f64, samples_per_symbol: usize) -> Vec<f64> {
    let center = (taps - 1) as f64 / 2.0;
    let ts = samples_per_symbol as f64;

    (0..taps)
        .map(|i| raised_cosine_response(i as f64 - center, rolloff, ts))
        .collect()
}

fn symbol_spaced_zeros(taps: usize, samples_per_symbol: usize) -> Vec<usize> {
    let center = (taps - 1) / 2;
    let reach = center / samples_per_symbol;

    let left = (1..=reach).rev().map(|k| center - k * samples_per_symbol);
    let right = (1..=reach).map(|k| center + k * samples_per_symbol);
    left.chain(right).collect()
}
