//! Polyphase integer-factor interpolator
//!
//! Kaiser-windowed (β=5) low-pass prototype of `2·10·L + 1` taps with cutoff
//! at the original Nyquist rate, scaled by `L` so the passband gain is one.
//! Output is zero-phase aligned: `y[k·L] ≈ x[k]`, length `L·len(x)`.
//! Each output sample only touches the prototype phase that lines up with
//! real input samples, so no zero-stuffed buffer is ever built.

use num_complex::Complex64;

use crate::error::{Result, TedError};
use crate::utils::{kaiser, sinc};

/// Default interpolation factor
pub const DEFAULT_UPSAMPLE: usize = 32;

/// Prototype half-length in units of the interpolation factor
const HALF_LEN_PER_PHASE: usize = 10;

/// Kaiser window shape of the prototype filter
const KAISER_BETA: f64 = 5.0;

/// Integer-factor upsampler
#[derive(Debug, Clone)]
pub struct PolyphaseInterpolator {
    factor: usize,
    prototype: Vec<f64>,
    half_len: usize,
}

impl PolyphaseInterpolator {
    /// Create an interpolator for the given factor (1 is a pass-through)
    pub fn new(factor: usize) -> Result<Self> {
        if factor == 0 {
            return Err(TedError::ZeroUpsample);
        }

        let half_len = HALF_LEN_PER_PHASE * factor;
        let prototype = if factor == 1 {
            vec![1.0]
        } else {
            design_prototype(factor, half_len)
        };

        Ok(Self {
            factor,
            prototype,
            half_len: if factor == 1 { 0 } else { half_len },
        })
    }

    pub fn factor(&self) -> usize {
        self.factor
    }

    /// Upsample a buffer by the configured factor
    pub fn interpolate(&self, input: &[Complex64]) -> Vec<Complex64> {
        if self.factor == 1 {
            return input.to_vec();
        }

        let up = self.factor as isize;
        let half = self.half_len as isize;
        let last = input.len() as isize - 1;
        let out_len = input.len() * self.factor;

        (0..out_len as isize)
            .map(|k| {
                // Input j contributes through prototype tap k + half - j·L
                let j_min = div_ceil(k - half, up).max(0);
                let j_max = (k + half).div_euclid(up).min(last);

                (j_min..=j_max)
                    .map(|j| input[j as usize] * self.prototype[(k + half - j * up) as usize])
                    .sum()
            })
            .collect()
    }
}

fn div_ceil(a: isize, b: isize) -> isize {
    -((-a).div_euclid(b))
}

fn design_prototype(factor: usize, half_len: usize) -> Vec<f64> {
    let len = 2 * half_len + 1;
    let cutoff = 1.0 / factor as f64;
    let window = kaiser(len, KAISER_BETA);

    let mut taps: Vec<f64> = window
        .iter()
        .enumerate()
        .map(|(m, w)| cutoff * sinc(cutoff * (m as f64 - half_len as f64)) * w)
        .collect();

    // Unit DC gain, then restore the amplitude lost to zero insertion
    let sum: f64 = taps.iter().sum();
    let scale = factor as f64 / sum;
    for t in &mut taps {
        *t *= scale;
    }

    taps
}
