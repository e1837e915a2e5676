//! Symbol timing recovery
//!
//! Upsamples the received signal onto a fine grid, then runs a per-symbol
//! feedback loop: a timing error detector measures how far the sampling
//! instant is from the symbol peak, a loop filter turns that into a phase
//! correction, and each step emits a hard ±1 decision.

mod detector;
mod interpolator;
mod loop_filter;
mod recovery;
mod stats;

pub use detector::{early_late_gate, gardner, mueller_muller, ErrorMetric, DEFAULT_GATE_DELTA};
pub use interpolator::{PolyphaseInterpolator, DEFAULT_UPSAMPLE};
pub use loop_filter::{LoopFilter, DEFAULT_GAIN, DEFAULT_KI, DEFAULT_KP};
pub use recovery::{iteration_count, Iteration, LoopState, LoopTrace, TimingRecoveryLoop};
pub use stats::{Statistics, DEFAULT_PREAMBLE_SYMBOLS};
