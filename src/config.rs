//! Simulation parameters
//!
//! Plain serde structs so a run can be described in JSON or built in code
//! with struct-update syntax over `Default`.

use serde::{Deserialize, Serialize};

use crate::channel::NoiseKind;
use crate::error::{ensure_finite, Result, TedError};
use crate::kernels::{check_odd_taps, DEFAULT_RC_TAPS, DEFAULT_ROLLOFF, DEFAULT_SINC_TAPS};
use crate::timing::{ErrorMetric, LoopFilter, DEFAULT_GATE_DELTA, DEFAULT_UPSAMPLE};

/// Default samples per symbol
pub const DEFAULT_SPS: usize = 8;

/// Default integer channel delay, in samples
pub const DEFAULT_INT_DELAY: usize = 5;

/// Default fractional channel delay, in samples
pub const DEFAULT_FRAC_DELAY: f64 = 0.7;

/// Default SNR
pub const DEFAULT_SNR_DB: f64 = 15.0;

/// Transmit side and channel impairments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    pub samples_per_symbol: usize,
    /// Raised-cosine length (odd)
    pub rc_taps: usize,
    pub rolloff: f64,
    /// Whole-sample delay
    pub int_delay: usize,
    /// Sub-sample delay in [0, 1); 0 skips the fractional filter
    pub frac_delay: f64,
    /// Fractional-delay filter length (odd)
    pub sinc_taps: usize,
    /// `None` leaves the channel noiseless
    pub snr_db: Option<f64>,
    pub noise: NoiseKind,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            samples_per_symbol: DEFAULT_SPS,
            rc_taps: DEFAULT_RC_TAPS,
            rolloff: DEFAULT_ROLLOFF,
            int_delay: DEFAULT_INT_DELAY,
            frac_delay: DEFAULT_FRAC_DELAY,
            sinc_taps: DEFAULT_SINC_TAPS,
            snr_db: Some(DEFAULT_SNR_DB),
            noise: NoiseKind::Complex,
        }
    }
}

impl ChannelConfig {
    /// Total delay the channel applies, in samples
    pub fn total_delay(&self) -> f64 {
        self.int_delay as f64 + self.frac_delay
    }

    pub fn validate(&self) -> Result<()> {
        if self.samples_per_symbol == 0 {
            return Err(TedError::ZeroSamplesPerSymbol);
        }
        check_odd_taps("raised cosine", self.rc_taps)?;
        if !(0.0..=1.0).contains(&self.rolloff) {
            return Err(TedError::InvalidRolloff(self.rolloff));
        }
        if !(0.0..1.0).contains(&self.frac_delay) {
            return Err(TedError::InvalidFractionalDelay(self.frac_delay));
        }
        check_odd_taps("fractional delay", self.sinc_taps)?;
        if let Some(snr) = self.snr_db {
            ensure_finite("snr_db", snr)?;
        }
        Ok(())
    }
}

/// Receiver-side timing loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    /// Interpolation factor onto the loop's fine grid
    pub upsample: usize,
    pub metric: ErrorMetric,
    pub filter: LoopFilter,
    /// Early-late gate offset is `sps·upsample / gate_delta` fine samples
    pub gate_delta: usize,
    /// Decision assumed before the first symbol
    pub initial_symbol: i8,
    /// Starting phase in samples, wrapped into `[0, sps)`
    pub initial_tau: f64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            upsample: DEFAULT_UPSAMPLE,
            metric: ErrorMetric::MuellerMuller,
            filter: LoopFilter::default(),
            gate_delta: DEFAULT_GATE_DELTA,
            initial_symbol: 0,
            initial_tau: 0.0,
        }
    }
}

impl LoopConfig {
    /// Check the loop against the signal's samples per symbol
    pub fn validate(&self, samples_per_symbol: usize) -> Result<()> {
        if samples_per_symbol == 0 {
            return Err(TedError::ZeroSamplesPerSymbol);
        }
        if self.upsample == 0 {
            return Err(TedError::ZeroUpsample);
        }
        self.filter.validate()?;

        let gate_unusable = self.gate_delta == 0
            || (self.metric == ErrorMetric::EarlyLateGate
                && samples_per_symbol * self.upsample / self.gate_delta == 0);
        if gate_unusable {
            return Err(TedError::InvalidGateSpacing {
                delta: self.gate_delta,
                sps: samples_per_symbol,
                upsample: self.upsample,
            });
        }

        if !(-1..=1).contains(&self.initial_symbol) {
            return Err(TedError::InvalidInitialSymbol(self.initial_symbol));
        }
        ensure_finite("initial_tau", self.initial_tau)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let channel = ChannelConfig::default();
        channel.validate().unwrap();
        assert_eq!(channel.samples_per_symbol, 8);
        assert!((channel.total_delay() - 5.7).abs() < 1e-12);

        let ted = LoopConfig::default();
        ted.validate(channel.samples_per_symbol).unwrap();
        assert_eq!(ted.upsample, 32);
        assert_eq!(ted.filter, LoopFilter::FixedGain { gain: 0.1 });
    }

    #[test]
    fn test_channel_rejects_bad_values() {
        let base = ChannelConfig::default();
        assert!(matches!(
            ChannelConfig { rc_taps: 100, ..base.clone() }.validate(),
            Err(TedError::InvalidTapCount { taps: 100, .. })
        ));
        assert!(matches!(
            ChannelConfig { rolloff: 1.5, ..base.clone() }.validate(),
            Err(TedError::InvalidRolloff(_))
        ));
        assert!(matches!(
            ChannelConfig { frac_delay: 1.0, ..base.clone() }.validate(),
            Err(TedError::InvalidFractionalDelay(_))
        ));
        assert!(matches!(
            ChannelConfig { samples_per_symbol: 0, ..base.clone() }.validate(),
            Err(TedError::ZeroSamplesPerSymbol)
        ));
        assert!(matches!(
            ChannelConfig { snr_db: Some(f64::NAN), ..base }.validate(),
            Err(TedError::NonFinite { name: "snr_db", .. })
        ));
    }

    #[test]
    fn test_loop_rejects_bad_values() {
        let base = LoopConfig::default();
        assert!(matches!(
            LoopConfig { upsample: 0, ..base.clone() }.validate(8),
            Err(TedError::ZeroUpsample)
        ));
        assert!(matches!(
            LoopConfig { gate_delta: 0, ..base.clone() }.validate(8),
            Err(TedError::InvalidGateSpacing { .. })
        ));
        assert!(matches!(
            LoopConfig { initial_symbol: 2, ..base.clone() }.validate(8),
            Err(TedError::InvalidInitialSymbol(2))
        ));
        assert!(matches!(
            LoopConfig { initial_tau: f64::INFINITY, ..base.clone() }.validate(8),
            Err(TedError::NonFinite { .. })
        ));
        assert!(LoopConfig { filter: LoopFilter::FixedGain { gain: f64::NAN }, ..base }.validate(8).is_err());
    }

    #[test]
    fn test_gate_spacing_only_binds_early_late() {
        // sps 2, upsample 1, delta 4 → shift 0
        let cfg = LoopConfig {
            upsample: 1,
            gate_delta: 4,
            ..LoopConfig::default()
        };
        assert!(cfg.validate(2).is_ok());

        let elg = LoopConfig {
            metric: ErrorMetric::EarlyLateGate,
            ..cfg
        };
        assert_eq!(
            elg.validate(2),
            Err(TedError::InvalidGateSpacing { delta: 4, sps: 2, upsample: 1 })
        );
    }

    #[test]
    fn test_json_partial_override() {
        let channel: ChannelConfig =
            serde_json::from_str(r#"{"int_delay": 0, "frac_delay": 0.25, "snr_db": null, "noise": "real"}"#).unwrap();
        assert_eq!(channel.int_delay, 0);
        assert_eq!(channel.frac_delay, 0.25);
        assert_eq!(channel.snr_db, None);
        assert_eq!(channel.noise, NoiseKind::Real);
        assert_eq!(channel.rc_taps, DEFAULT_RC_TAPS);

        let ted: LoopConfig = serde_json::from_str(
            r#"{"metric": "gardner", "filter": {"mode": "proportional_integral", "kp": 0.05, "ki": 0.001}}"#,
        )
        .unwrap();
        assert_eq!(ted.metric, ErrorMetric::Gardner);
        assert_eq!(ted.filter, LoopFilter::ProportionalIntegral { kp: 0.05, ki: 0.001 });
        assert_eq!(ted.upsample, DEFAULT_UPSAMPLE);
    }

    #[test]
    fn test_json_roundtrip() {
        let cfg = LoopConfig {
            metric: ErrorMetric::EarlyLateGate,
            initial_tau: 1.5,
            ..LoopConfig::default()
        };
        let text = serde_json::to_string(&cfg).unwrap();
        assert!(text.contains("\"earlylategate\""), "{}", text);
        let back: LoopConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back, cfg);
    }
}
