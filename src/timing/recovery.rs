//! Closed-loop symbol timing recovery
//!
//! The loop walks the original sample grid one symbol at a time, starting
//! one symbol in so a full-symbol lookback always exists. At each step it
//! reads the interpolated signal at `index·L + round(tau·L)`, evaluates the
//! selected detector, makes a hard decision, and moves `tau` through the
//! loop filter before wrapping it into `[0, sps)`.
//!
//! State carried between iterations lives in an explicit [`LoopState`]
//! value that [`TimingRecoveryLoop::step`] consumes and returns, so
//! independent runs never share anything but the read-only loop config.

use num_complex::Complex64;

use super::detector::{early_late_gate, gardner, mueller_muller, ErrorMetric};
use super::interpolator::PolyphaseInterpolator;
use super::loop_filter::LoopFilter;
use super::stats::Statistics;
use crate::config::LoopConfig;
use crate::error::{Result, TedError};
use crate::utils::{hard_decision, wrap_phase};

/// State carried from one loop iteration to the next
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopState {
    /// Sampling phase in samples, always in `[0, sps)`
    pub tau: f64,
    /// PI integrator (unused in fixed-gain mode)
    pub integrator: f64,
    /// Previous hard decision
    pub symbol_prev: i8,
    /// Last applied error, reused when early-late runs out of samples
    pub last_error: Option<f64>,
}

/// What a single iteration produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Iteration {
    pub error: f64,
    pub decision: i8,
    pub tau: f64,
    pub sample: Complex64,
}

/// Histories recorded over a loop run
///
/// `errors` and `offsets` hold one entry per iteration. `decisions` and
/// `samples` are one longer: their first entry is the initial decision and
/// the first interpolated sample, not a measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopTrace {
    errors: Vec<f64>,
    offsets: Vec<f64>,
    decisions: Vec<i8>,
    samples: Vec<Complex64>,
    samples_per_symbol: usize,
}

impl LoopTrace {
    pub fn errors(&self) -> &[f64] {
        &self.errors
    }

    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    pub fn decisions(&self) -> &[i8] {
        &self.decisions
    }

    pub fn samples(&self) -> &[Complex64] {
        &self.samples
    }

    pub fn samples_per_symbol(&self) -> usize {
        self.samples_per_symbol
    }

    /// Number of completed loop iterations
    pub fn iterations(&self) -> usize {
        self.errors.len()
    }

    /// Phase after the last iteration
    pub fn final_offset(&self) -> Option<f64> {
        self.offsets.last().copied()
    }

    /// Score the decisions against the transmitted symbols, skipping the
    /// first `preamble` symbols (0 keeps everything).
    pub fn statistics(&self, symbols: &[i8], preamble: usize) -> Result<Statistics> {
        Statistics::evaluate(&self.decisions, &self.offsets, symbols, preamble)
    }
}

/// Number of iterations the loop makes over `num_samples` input samples
pub fn iteration_count(num_samples: usize, samples_per_symbol: usize) -> usize {
    if samples_per_symbol == 0 || num_samples <= samples_per_symbol {
        return 0;
    }
    (num_samples - samples_per_symbol + samples_per_symbol - 1) / samples_per_symbol
}

/// Timing recovery loop for one detector / loop-filter combination
#[derive(Debug, Clone)]
pub struct TimingRecoveryLoop {
    samples_per_symbol: usize,
    metric: ErrorMetric,
    filter: LoopFilter,
    gate_shift: usize,
    initial_symbol: i8,
    initial_tau: f64,
    interpolator: PolyphaseInterpolator,
}

impl TimingRecoveryLoop {
    /// Build a loop for signals with `samples_per_symbol` samples per symbol.
    pub fn new(samples_per_symbol: usize, config: &LoopConfig) -> Result<Self> {
        config.validate(samples_per_symbol)?;

        let interpolator = PolyphaseInterpolator::new(config.upsample)?;
        let gate_shift = samples_per_symbol * config.upsample / config.gate_delta;

        Ok(Self {
            samples_per_symbol,
            metric: config.metric,
            filter: config.filter,
            gate_shift,
            initial_symbol: config.initial_symbol,
            initial_tau: wrap_phase(config.initial_tau, samples_per_symbol as f64),
            interpolator,
        })
    }

    pub fn metric(&self) -> ErrorMetric {
        self.metric
    }

    pub fn upsample(&self) -> usize {
        self.interpolator.factor()
    }

    /// Upsample the received signal onto the loop's fine grid
    pub fn interpolate(&self, signal: &[Complex64]) -> Vec<Complex64> {
        self.interpolator.interpolate(signal)
    }

    /// State the loop starts from
    pub fn initial_state(&self) -> LoopState {
        LoopState {
            tau: self.initial_tau,
            integrator: 0.0,
            symbol_prev: self.initial_symbol,
            last_error: None,
        }
    }

    /// Interpolate `signal` and track it
    pub fn run(&self, signal: &[Complex64]) -> Result<LoopTrace> {
        if signal.is_empty() {
            return Err(TedError::EmptyInput("timing loop"));
        }
        let interpolated = self.interpolate(signal);
        self.track(&interpolated, signal.len())
    }

    /// Run the loop over an already interpolated buffer.
    ///
    /// `num_samples` is the length of the signal before interpolation.
    pub fn track(&self, interpolated: &[Complex64], num_samples: usize) -> Result<LoopTrace> {
        if interpolated.is_empty() || num_samples == 0 {
            return Err(TedError::EmptyInput("timing loop"));
        }
        let required = num_samples * self.upsample();
        if interpolated.len() < required {
            return Err(TedError::InterpolatedTooShort {
                expected: required,
                actual: interpolated.len(),
            });
        }

        let sps = self.samples_per_symbol;
        let iterations = iteration_count(num_samples, sps);

        let mut errors = vec![0.0; iterations];
        let mut offsets = vec![0.0; iterations];
        let mut decisions = vec![0i8; iterations + 1];
        let mut samples = vec![Complex64::new(0.0, 0.0); iterations + 1];

        decisions[0] = self.initial_symbol;
        samples[0] = interpolated[0];

        tracing::debug!(
            metric = %self.metric,
            iterations,
            sps,
            upsample = self.upsample(),
            "starting timing loop"
        );

        let mut state = self.initial_state();
        for (n, index) in (sps..num_samples).step_by(sps).enumerate() {
            let (next, it) = self.step(interpolated, index, state);
            errors[n] = it.error;
            offsets[n] = it.tau;
            decisions[n + 1] = it.decision;
            samples[n + 1] = it.sample;
            state = next;
        }

        tracing::debug!(metric = %self.metric, final_tau = state.tau, "timing loop finished");

        Ok(LoopTrace {
            errors,
            offsets,
            decisions,
            samples,
            samples_per_symbol: sps,
        })
    }

    /// One loop iteration at original-grid `index`.
    ///
    /// `interpolated` must hold at least `(index + 1)·L` samples.
    pub fn step(&self, interpolated: &[Complex64], index: usize, state: LoopState) -> (LoopState, Iteration) {
        let up = self.upsample();
        let symbol_span = self.samples_per_symbol * up;
        let last = interpolated.len() - 1;

        // tau close to sps can round up past the end on the final symbol
        let fine = (state.tau * up as f64).round() as usize;
        let offset = (index * up + fine).min(last);

        let val_cur = interpolated[offset];
        let val_prev = interpolated[offset - symbol_span];

        let raw = match self.metric {
            ErrorMetric::MuellerMuller => Some(mueller_muller(val_cur, val_prev, state.symbol_prev)),
            ErrorMetric::Gardner => {
                let val_middle = interpolated[offset - symbol_span / 2];
                Some(gardner(val_cur, val_prev, val_middle))
            }
            ErrorMetric::EarlyLateGate => {
                if offset + self.gate_shift >= interpolated.len() {
                    tracing::trace!(index, offset, "early-late gate starved, reusing last error");
                    None
                } else {
                    let val_early = interpolated[offset - self.gate_shift];
                    let val_late = interpolated[offset + self.gate_shift];
                    Some(early_late_gate(val_early, val_late))
                }
            }
        };

        let error = match raw {
            Some(e) => self.metric.loop_polarity() * e,
            None => state.last_error.unwrap_or(0.0),
        };

        let decision = hard_decision(val_cur.re);

        let (mut tau, mut integrator) = self.filter.advance(state.tau, state.integrator, error);
        if !tau.is_finite() || !integrator.is_finite() {
            tracing::warn!(index, error, "non-finite phase update, holding previous phase");
            tau = state.tau;
            integrator = 0.0;
        }
        let tau = wrap_phase(tau, self.samples_per_symbol as f64);

        let next = LoopState {
            tau,
            integrator,
            symbol_prev: decision,
            last_error: Some(error),
        };

        (
            next,
            Iteration {
                error,
                decision,
                tau,
                sample: val_cur,
            },
        )
    }
}
