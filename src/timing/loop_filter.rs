//! Loop filters mapping timing error to a phase correction

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, Result};

/// Default fixed loop gain
pub const DEFAULT_GAIN: f64 = 0.1;

/// Default proportional gain for PI mode
pub const DEFAULT_KP: f64 = 0.01;

/// Default integral gain for PI mode
pub const DEFAULT_KI: f64 = 0.0001;

/// Control law applied once per symbol
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LoopFilter {
    /// `tau += gain · error`
    FixedGain { gain: f64 },
    /// `v += ki · error; tau += v + kp · error`
    ProportionalIntegral { kp: f64, ki: f64 },
}

impl Default for LoopFilter {
    fn default() -> Self {
        LoopFilter::FixedGain { gain: DEFAULT_GAIN }
    }
}

impl LoopFilter {
    /// PI filter with the default gains
    pub fn proportional_integral() -> Self {
        LoopFilter::ProportionalIntegral {
            kp: DEFAULT_KP,
            ki: DEFAULT_KI,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            LoopFilter::FixedGain { gain } => ensure_finite("gain", gain),
            LoopFilter::ProportionalIntegral { kp, ki } => {
                ensure_finite("kp", kp)?;
                ensure_finite("ki", ki)
            }
        }
    }

    /// Apply one error sample.
    ///
    /// Returns the unwrapped phase and the new integrator value. The
    /// integrator is passed through untouched in fixed-gain mode.
    pub fn advance(&self, tau: f64, integrator: f64, error: f64) -> (f64, f64) {
        match *self {
            LoopFilter::FixedGain { gain } => (tau + gain * error, integrator),
            LoopFilter::ProportionalIntegral { kp, ki } => {
                let v = integrator + ki * error;
                (tau + v + kp * error, v)
            }
        }
    }
}
