//! Additive White Gaussian Noise generator
//!
//! Uses Box-Muller transform for Gaussian samples.

use num_complex::Complex64;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Whether the baseband signal (and therefore its noise) is real or complex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseKind {
    /// Real Gaussian noise with the full variance
    Real,
    /// Circularly-symmetric noise, variance split evenly between I and Q
    #[default]
    Complex,
}

/// AWGN generator with configurable power
pub struct NoiseGenerator {
    /// Standard deviation (sqrt of noise power)
    std_dev: f64,

    /// Internal RNG
    rng: ChaCha8Rng,

    /// Cached second sample from Box-Muller
    cached: Option<f64>,
}

impl NoiseGenerator {
    /// Create a generator whose samples have variance `noise_power`.
    /// The internal RNG is seeded from `seed_rng`.
    pub fn new<R: Rng + ?Sized>(noise_power: f64, seed_rng: &mut R) -> Self {
        let std_dev = noise_power.max(0.0).sqrt();

        let seed: u64 = seed_rng.gen();
        let rng = ChaCha8Rng::seed_from_u64(seed);

        Self {
            std_dev,
            rng,
            cached: None,
        }
    }

    /// Unit-variance Gaussian draw
    fn standard_normal(&mut self) -> f64 {
        if let Some(cached) = self.cached.take() {
            return cached;
        }

        let u1: f64 = self.rng.gen();
        let u2: f64 = self.rng.gen();

        // Avoid log(0)
        let u1 = u1.max(1e-10);

        let r = (-2.0 * u1.ln()).sqrt();
        let theta = 2.0 * PI * u2;

        self.cached = Some(r * theta.sin());
        r * theta.cos()
    }

    /// Next real noise sample with the configured variance
    pub fn next_sample(&mut self) -> f64 {
        self.standard_normal() * self.std_dev
    }

    /// Next complex noise sample, each quadrature scaled by sqrt(variance / 2)
    pub fn next_complex(&mut self) -> Complex64 {
        let scale = self.std_dev * std::f64::consts::FRAC_1_SQRT_2;
        let re = self.standard_normal() * scale;
        let im = self.standard_normal() * scale;
        Complex64::new(re, im)
    }

    /// Next sample of the requested kind (imaginary part zero for `Real`)
    pub fn next_of(&mut self, kind: NoiseKind) -> Complex64 {
        match kind {
            NoiseKind::Real => Complex64::new(self.next_sample(), 0.0),
            NoiseKind::Complex => self.next_complex(),
        }
    }
}
