//! Utility functions for DSP operations

mod convolve;
mod math;

pub use convolve::{convolve, convolve_full, Edges};
pub use math::*;
