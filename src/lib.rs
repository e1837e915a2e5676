//! TED Sim - Baseband timing recovery simulator
//!
//! This crate models a BPSK baseband link with controlled timing impairments
//! and recovers symbol timing from the received waveform. A symbol stream is
//! pulse shaped with a raised cosine, delayed by a whole-plus-fractional
//! number of samples, and corrupted with AWGN. A closed-loop timing error
//! detector (Mueller-Muller, Gardner or Early-Late Gate) then tracks the
//! sampling phase on an upsampled copy of the signal and makes symbol
//! decisions, which are scored against the transmitted symbols.

pub mod channel;
pub mod config;
pub mod error;
pub mod kernels;
pub mod observe;
pub mod sweep;
pub mod symbols;
pub mod timing;
pub mod utils;


// Re-export core types for convenience
pub use channel::{ChannelSimulator, NoiseKind};
pub use config::{ChannelConfig, LoopConfig};
pub use error::{Result, TedError};
pub use kernels::{FirKernel, FractionalDelay, RaisedCosine};
pub use sweep::{run_sweep, SweepConfig, SweepPoint};
pub use symbols::SymbolStream;
pub use timing::{ErrorMetric, LoopFilter, LoopTrace, Statistics, TimingRecoveryLoop};
pub use utils::Edges;
