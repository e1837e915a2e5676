//! Error types for the simulator
//!
//! Every configuration problem is reported from a constructor or a
//! `validate()` call, before any sample is processed.

use thiserror::Error;

/// Result type for simulator operations
pub type Result<T> = std::result::Result<T, TedError>;

/// Errors raised while configuring or evaluating a simulation run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TedError {
    /// Kernel tap count is zero or even (no unique center tap)
    #[error("Invalid tap count for {kernel}: {taps} (must be odd and > 0)")]
    InvalidTapCount { kernel: &'static str, taps: usize },

    /// Raised-cosine rolloff outside [0, 1]
    #[error("Rolloff {0} outside [0, 1]")]
    InvalidRolloff(f64),

    /// Fractional delay outside [0, 1)
    #[error("Fractional delay {0} outside [0, 1)")]
    InvalidFractionalDelay(f64),

    /// Samples per symbol must be at least 1
    #[error("Samples per symbol must be > 0")]
    ZeroSamplesPerSymbol,

    /// Interpolation factor must be at least 1
    #[error("Upsample factor must be > 0")]
    ZeroUpsample,

    /// Early-late spacing that yields no shift in the interpolated buffer
    #[error("Early-late spacing delta={delta} gives a zero-sample shift (sps={sps}, upsample={upsample})")]
    InvalidGateSpacing { delta: usize, sps: usize, upsample: usize },

    /// Initial decision must be a symbol value or 0
    #[error("Initial symbol {0} not in {{-1, 0, 1}}")]
    InvalidInitialSymbol(i8),

    /// A gain, SNR or phase that is NaN or infinite
    #[error("Parameter {name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    /// Statistics asked to discard a preamble at least as long as the run
    #[error("Preamble of {preamble} symbols leaves nothing to score in a run of {available}")]
    PreambleTooLong { preamble: usize, available: usize },

    /// Decision history and reference symbols differ in length
    #[error("Length mismatch: {decisions} decisions vs {symbols} reference symbols")]
    LengthMismatch { decisions: usize, symbols: usize },

    /// Interpolated buffer does not cover the signal it was built from
    #[error("Interpolated buffer too short: expected at least {expected} samples, got {actual}")]
    InterpolatedTooShort { expected: usize, actual: usize },

    /// The loop never iterated, so there is no converged phase to report
    #[error("Timing loop produced no iterations")]
    EmptyTrace,

    /// A processing stage was handed an empty buffer
    #[error("Empty input buffer for {0}")]
    EmptyInput(&'static str),

    /// Logging subscriber could not be installed
    #[error("Logging init failed: {0}")]
    Logging(String),
}

/// Reject NaN and infinite parameters.
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(TedError::NonFinite { name, value })
    }
}
