//! SNR × detector comparison sweep
//!
//! One shaped and delayed realization of the symbol stream is shared by
//! every point. Each SNR value gets its own noise draw from a seed derived
//! from the sweep seed and the point's index, and every selected detector
//! runs on that same draw. SNR points run in parallel on the rayon pool;
//! loops never share mutable state.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::channel::ChannelSimulator;
use crate::config::LoopConfig;
use crate::error::{ensure_finite, Result};
use crate::symbols::SymbolStream;
use crate::timing::{ErrorMetric, Statistics, TimingRecoveryLoop, DEFAULT_PREAMBLE_SYMBOLS};

/// Grid to evaluate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub snr_db: Vec<f64>,
    pub metrics: Vec<ErrorMetric>,
    pub preamble: usize,
    pub seed: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            snr_db: snr_range(1.0, 30.0, 1.0),
            metrics: ErrorMetric::ALL.to_vec(),
            preamble: DEFAULT_PREAMBLE_SYMBOLS,
            seed: 3,
        }
    }
}

/// `min, min + step, ...` up to and including `max`
pub fn snr_range(min: f64, max: f64, step: f64) -> Vec<f64> {
    if step.is_nan() || step <= 0.0 || max < min {
        return Vec::new();
    }
    let count = ((max - min) / step + 1e-9).floor() as usize + 1;
    (0..count).map(|i| min + i as f64 * step).collect()
}

/// Result for one (SNR, detector) pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    pub snr_db: f64,
    pub metric: ErrorMetric,
    pub stats: Statistics,
}

/// Run the sweep.
///
/// Points come back ordered by SNR, then by the order of `sweep.metrics`.
///
/// # Arguments
/// * `channel` - Channel; its own `snr_db` is ignored
/// * `loop_config` - Loop settings shared by every point, except the metric
/// * `stream` - Transmitted symbols
/// * `sweep` - SNR values, detectors, preamble and seed
pub fn run_sweep(
    channel: &ChannelSimulator,
    loop_config: &LoopConfig,
    stream: &SymbolStream,
    sweep: &SweepConfig,
) -> Result<Vec<SweepPoint>> {
    for &snr in &sweep.snr_db {
        ensure_finite("snr_db", snr)?;
    }

    let sps = channel.config().samples_per_symbol;
    let loops = sweep
        .metrics
        .iter()
        .map(|&metric| TimingRecoveryLoop::new(sps, &LoopConfig { metric, ..loop_config.clone() }))
        .collect::<Result<Vec<_>>>()?;

    let Some(first) = loops.first() else {
        return Ok(Vec::new());
    };

    let clean = channel.propagate(stream.pulses());
    let kind = channel.config().noise;

    tracing::debug!(
        points = sweep.snr_db.len() * loops.len(),
        symbols = stream.len(),
        "starting sweep"
    );

    let per_snr = sweep
        .snr_db
        .par_iter()
        .enumerate()
        .map(|(i, &snr_db)| {
            let mut rng = ChaCha8Rng::seed_from_u64(sweep.seed.wrapping_add(i as u64));
            let noisy = channel.add_noise(&clean, snr_db, kind, &mut rng)?;
            // All loops share the upsample factor
            let interpolated = first.interpolate(&noisy);

            loops
                .iter()
                .map(|ted| {
                    let trace = ted.track(&interpolated, noisy.len())?;
                    let stats = trace.statistics(stream.symbols(), sweep.preamble)?;
                    tracing::info!(
                        snr_db,
                        metric = %ted.metric(),
                        ber = stats.ber_percent,
                        final_offset = stats.final_offset,
                        "sweep point done"
                    );
                    Ok(SweepPoint {
                        snr_db,
                        metric: ted.metric(),
                        stats,
                    })
                })
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(per_snr.into_iter().flatten().collect())
}

/// `(snr_db, ber_percent)` pairs for one detector
pub fn ber_curve(points: &[SweepPoint], metric: ErrorMetric) -> Vec<(f64, f64)> {
    points
        .iter()
        .filter(|p| p.metric == metric)
        .map(|p| (p.snr_db, p.stats.ber_percent))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChannelConfig;

    #[test]
    fn test_snr_range() {
        assert_eq!(snr_range(1.0, 5.0, 1.0), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(snr_range(0.0, 1.0, 0.5), vec![0.0, 0.5, 1.0]);
        assert!(snr_range(5.0, 1.0, 1.0).is_empty());
        assert!(snr_range(0.0, 1.0, 0.0).is_empty());
        assert_eq!(SweepConfig::default().snr_db.len(), 30);
    }

    #[test]
    fn test_sweep_shape_and_order() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let stream = SymbolStream::random(300, 8, &mut rng);
        let channel = ChannelSimulator::new(ChannelConfig::default()).unwrap();
        let sweep = SweepConfig {
            snr_db: vec![0.0, 20.0],
            ..SweepConfig::default()
        };

        let points = run_sweep(&channel, &LoopConfig::default(), &stream, &sweep).unwrap();
        assert_eq!(points.len(), 6);
        for (i, p) in points.iter().enumerate() {
            assert_eq!(p.snr_db, sweep.snr_db[i / 3]);
            assert_eq!(p.metric, ErrorMetric::ALL[i % 3]);
            assert_eq!(p.stats.num_symbols, 270);
            assert!((0.0..8.0).contains(&p.stats.final_offset));
        }

        let mm = ber_curve(&points, ErrorMetric::MuellerMuller);
        assert_eq!(mm.len(), 2);
        assert!(mm[1].1 < 5.0, "Mueller-Muller BER at 20 dB: {}", mm[1].1);
    }

    #[test]
    fn test_sweep_is_deterministic() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let stream = SymbolStream::random(200, 8, &mut rng);
        let channel = ChannelSimulator::new(ChannelConfig::default()).unwrap();
        let sweep = SweepConfig {
            snr_db: vec![5.0, 10.0, 15.0],
            metrics: vec![ErrorMetric::Gardner],
            ..SweepConfig::default()
        };

        let a = run_sweep(&channel, &LoopConfig::default(), &stream, &sweep).unwrap();
        let b = run_sweep(&channel, &LoopConfig::default(), &stream, &sweep).unwrap();
        assert_eq!(a, b);

        let json = serde_json::to_string(&a).unwrap();
        assert!(json.contains("\"gardner\""), "{}", json);
    }

    #[test]
    fn test_sweep_rejects_bad_input() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let stream = SymbolStream::random(50, 8, &mut rng);
        let channel = ChannelSimulator::new(ChannelConfig::default()).unwrap();

        let nan = SweepConfig {
            snr_db: vec![f64::NAN],
            ..SweepConfig::default()
        };
        assert!(run_sweep(&channel, &LoopConfig::default(), &stream, &nan).is_err());

        let none = SweepConfig {
            metrics: Vec::new(),
            ..SweepConfig::default()
        };
        assert!(run_sweep(&channel, &LoopConfig::default(), &stream, &none).unwrap().is_empty());

        let long_preamble = SweepConfig {
            snr_db: vec![10.0],
            preamble: 50,
            ..SweepConfig::default()
        };
        assert!(run_sweep(&channel, &LoopConfig::default(), &stream, &long_preamble).is_err());
    }
}
