//! Small DSP math helpers

use std::f64::consts::PI;

/// Convert an SNR in dB to a linear power ratio
#[inline]
pub fn db_to_power_ratio(db: f64) -> f64 {
    10.0_f64.powf(db / 10.0)
}

/// Convert a linear power ratio to dB
#[inline]
pub fn power_ratio_to_db(ratio: f64) -> f64 {
    10.0 * ratio.log10()
}

/// Normalized sinc, sin(πx)/(πx), with sinc(0) = 1
#[inline]
pub fn sinc(x: f64) -> f64 {
    if x.abs() < 1e-12 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

/// Wrap a value into [0, period)
#[inline]
pub fn wrap_phase(value: f64, period: f64) -> f64 {
    let mut v = value % period;
    if v < 0.0 {
        v += period;
    }
    // -tiny % p + p rounds to p itself
    if v >= period {
        v -= period;
    }
    v
}

/// Shortest distance between two phases on a circle of the given period
#[inline]
pub fn circular_distance(a: f64, b: f64, period: f64) -> f64 {
    let d = wrap_phase(a - b, period);
    d.min(period - d)
}

/// Hard ±1 decision on a real value (0 stays 0)
#[inline]
pub fn hard_decision(x: f64) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

/// Symmetric Hamming window of length `len`
pub fn hamming(len: usize) -> Vec<f64> {
    if len == 1 {
        return vec![1.0];
    }
    let denom = (len - 1) as f64;
    (0..len)
        .map(|i| 0.54 - 0.46 * (2.0 * PI * i as f64 / denom).cos())
        .collect()
}

/// Symmetric Kaiser window of length `len`
pub fn kaiser(len: usize, beta: f64) -> Vec<f64> {
    if len == 1 {
        return vec![1.0];
    }
    let denom = (len - 1) as f64;
    let norm = bessel_i0(beta);
    (0..len)
        .map(|i| {
            let r = 2.0 * i as f64 / denom - 1.0;
            bessel_i0(beta * (1.0 - r * r).max(0.0).sqrt()) / norm
        })
        .collect()
}

/// Zeroth-order modified Bessel function of the first kind (power series)
pub fn bessel_i0(x: f64) -> f64 {
    let half = x / 2.0;
    let mut term = 1.0;
    let mut sum = 1.0;
    for k in 1..200 {
        let f = half / k as f64;
        term *= f * f;
        sum += term;
        if term < sum * 1e-17 {
            break;
        }
    }
    sum
}
