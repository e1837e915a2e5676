//! FIR kernel construction
//!
//! Two kernels feed the channel: the raised-cosine pulse-shaping filter and
//! the windowed-sinc fractional-delay filter. Both are odd-length and
//! immutable once built, so they can be shared read-only between runs.

mod fractional_delay;
mod raised_cosine;

pub use fractional_delay::FractionalDelay;
pub use raised_cosine::RaisedCosine;

use crate::error::{Result, TedError};
use crate::utils::{convolve, Edges};

/// Default number of raised-cosine taps
pub const DEFAULT_RC_TAPS: usize = 101;

/// Default raised-cosine rolloff
pub const DEFAULT_ROLLOFF: f64 = 0.3;

/// Default number of fractional-delay sinc taps
pub const DEFAULT_SINC_TAPS: usize = 21;

/// Odd-length FIR kernel with a unique center tap
pub trait FirKernel: Send + Sync {
    /// Filter coefficients
    fn coefficients(&self) -> &[f64];

    /// Length of the filter in samples
    fn filter_len(&self) -> usize {
        self.coefficients().len()
    }

    /// Index of the center tap
    fn center(&self) -> usize {
        (self.filter_len() - 1) / 2
    }

    /// Convolve a buffer with the kernel
    ///
    /// # Arguments
    /// * `input` - Real sample buffer
    /// * `edges` - Whether convolution transients are trimmed or kept
    fn apply(&self, input: &[f64], edges: Edges) -> Vec<f64> {
        convolve(input, self.coefficients(), edges)
    }
}

/// Tap counts must be odd and non-zero.
pub(crate) fn check_odd_taps(kernel: &'static str, taps: usize) -> Result<()> {
    if taps == 0 || taps % 2 == 0 {
        return Err(TedError::InvalidTapCount { kernel, taps });
    }
    Ok(())
}
