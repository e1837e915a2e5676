//! Windowed-sinc fractional delay filter
//!
//! Discrete approximation of an ideal sub-sample shift: sinc(n - d) over a
//! symmetric index range, Hamming windowed, normalized to unity DC gain.

use super::{check_odd_taps, FirKernel};
use crate::error::{ensure_finite, Result, TedError};
use crate::utils::{hamming, sinc};

/// Fractional-delay FIR kernel
#[derive(Debug, Clone)]
pub struct FractionalDelay {
    coeffs: Vec<f64>,
    delay: f64,
}

impl FractionalDelay {
    /// Create a new fractional-delay kernel
    ///
    /// # Arguments
    /// * `taps` - Odd filter length (group delay of the trimmed output is zero)
    /// * `delay` - Fractional delay in samples, in [0, 1)
    pub fn new(taps: usize, delay: f64) -> Result<Self> {
        check_odd_taps("fractional delay", taps)?;
        ensure_finite("frac_delay", delay)?;
        if !(0.0..1.0).contains(&delay) {
            return Err(TedError::InvalidFractionalDelay(delay));
        }

        let half = (taps - 1) as i64 / 2;
        let window = hamming(taps);

        let mut coeffs: Vec<f64> = (-half..=half)
            .zip(window.iter())
            .map(|(n, w)| sinc(n as f64 - delay) * w)
            .collect();

        // Unity DC gain keeps the average signal amplitude
        let sum: f64 = coeffs.iter().sum();
        for c in &mut coeffs {
            *c /= sum;
        }

        tracing::debug!(taps, delay, "built fractional-delay kernel");

        Ok(Self { coeffs, delay })
    }

    /// Delay in samples
    pub fn delay(&self) -> f64 {
        self.delay
    }
}

impl FirKernel for FractionalDelay {
    fn coefficients(&self) -> &[f64] {
        &self.coeffs
    }
}
