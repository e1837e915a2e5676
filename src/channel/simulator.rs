//! Baseband channel: pulse shaping, delay, AWGN
//!
//! A symbol-rate pulse train is shaped with a full raised cosine, shifted by
//! `int_delay + frac_delay` samples, then corrupted with Gaussian noise at a
//! target SNR measured against the delayed signal's own power.

use num_complex::Complex64;
use rand::Rng;

use super::noise::{NoiseGenerator, NoiseKind};
use crate::config::ChannelConfig;
use crate::error::{ensure_finite, Result};
use crate::kernels::{FirKernel, FractionalDelay, RaisedCosine};
use crate::utils::{db_to_power_ratio, Edges};

/// Channel model built from a [`ChannelConfig`]
///
/// Kernels are built once and only read afterwards, so one simulator can be
/// shared by reference across concurrent runs.
#[derive(Debug, Clone)]
pub struct ChannelSimulator {
    config: ChannelConfig,
    pulse_filter: RaisedCosine,
    delay_filter: Option<FractionalDelay>,
}

impl ChannelSimulator {
    pub fn new(config: ChannelConfig) -> Result<Self> {
        config.validate()?;

        let pulse_filter = RaisedCosine::new(config.rc_taps, config.rolloff, config.samples_per_symbol)?;
        let delay_filter = if config.frac_delay > 0.0 {
            Some(FractionalDelay::new(config.sinc_taps, config.frac_delay)?)
        } else {
            None
        };

        tracing::debug!(
            sps = config.samples_per_symbol,
            int_delay = config.int_delay,
            frac_delay = config.frac_delay,
            snr_db = ?config.snr_db,
            "channel ready"
        );

        Ok(Self {
            config,
            pulse_filter,
            delay_filter,
        })
    }

    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    pub fn pulse_filter(&self) -> &RaisedCosine {
        &self.pulse_filter
    }

    pub fn delay_filter(&self) -> Option<&FractionalDelay> {
        self.delay_filter.as_ref()
    }

    /// Convolve the pulse train with the raised cosine
    pub fn pulse_shape(&self, pulses: &[f64], edges: Edges) -> Vec<f64> {
        self.pulse_filter.apply(pulses, edges)
    }

    /// Shift by the integer delay, then by the fractional delay.
    ///
    /// The integer stage keeps the input length: `int_delay` zeros are
    /// prepended and as many samples fall off the end.
    pub fn apply_delay(&self, signal: &[f64], edges: Edges) -> Vec<f64> {
        let shift = self.config.int_delay.min(signal.len());
        let mut shifted = vec![0.0; signal.len()];
        shifted[shift..].copy_from_slice(&signal[..signal.len() - shift]);

        match &self.delay_filter {
            Some(filter) => filter.apply(&shifted, edges),
            None => shifted,
        }
    }

    /// Shape and delay, with transients trimmed
    pub fn propagate(&self, pulses: &[f64]) -> Vec<f64> {
        let shaped = self.pulse_shape(pulses, Edges::Trim);
        self.apply_delay(&shaped, Edges::Trim)
    }

    /// Add white Gaussian noise at `snr_db` relative to the signal's mean
    /// power.
    ///
    /// # Arguments
    /// * `signal` - Real baseband signal
    /// * `snr_db` - Target signal-to-noise ratio
    /// * `kind` - Real noise, or complex noise split across I and Q
    /// * `rng` - Seeds the noise source
    pub fn add_noise<R: Rng + ?Sized>(
        &self,
        signal: &[f64],
        snr_db: f64,
        kind: NoiseKind,
        rng: &mut R,
    ) -> Result<Vec<Complex64>> {
        ensure_finite("snr_db", snr_db)?;

        let power = signal_power(signal);
        if power == 0.0 {
            // No signal means no meaningful SNR
            return Ok(to_complex(signal));
        }

        let variance = power / db_to_power_ratio(snr_db);
        let mut noise = NoiseGenerator::new(variance, rng);

        Ok(signal
            .iter()
            .map(|&s| Complex64::new(s, 0.0) + noise.next_of(kind))
            .collect())
    }

    /// Full channel: shape, delay, and noise at the configured SNR
    pub fn transmit<R: Rng + ?Sized>(&self, pulses: &[f64], rng: &mut R) -> Result<Vec<Complex64>> {
        let delayed = self.propagate(pulses);
        match self.config.snr_db {
            Some(snr_db) => self.add_noise(&delayed, snr_db, self.config.noise, rng),
            None => Ok(to_complex(&delayed)),
        }
    }
}

/// Mean squared amplitude (0 for an empty buffer)
pub fn signal_power(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    signal.iter().map(|s| s * s).sum::<f64>() / signal.len() as f64
}

fn to_complex(signal: &[f64]) -> Vec<Complex64> {
    signal.iter().map(|&s| Complex64::new(s, 0.0)).collect()
}
