//! Channel simulation
//!
//! - `noise` - Gaussian noise source (real or complex)
//! - `simulator` - Pulse shaping, integer + fractional delay, AWGN

mod noise;
mod simulator;

pub use noise::{NoiseGenerator, NoiseKind};
pub use simulator::{signal_power, ChannelSimulator};
