//! Linear convolution with transient-edge control

/// What to do with the convolution transients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Edges {
    /// Drop `(taps - 1) / 2` samples from each end, output has the input length
    #[default]
    Trim,
    /// Keep the full `len(input) + taps - 1` result
    Keep,
}

/// Full linear convolution of `input` with `taps`.
pub fn convolve_full(input: &[f64], taps: &[f64]) -> Vec<f64> {
    if input.is_empty() || taps.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0.0; input.len() + taps.len() - 1];
    for (i, &x) in input.iter().enumerate() {
        if x == 0.0 {
            continue;
        }
        for (k, &h) in taps.iter().enumerate() {
            out[i + k] += x * h;
        }
    }
    out
}

/// Convolve and apply the edge policy. `taps` must have odd length for
/// `Edges::Trim` to keep the output centered.
pub fn convolve(input: &[f64], taps: &[f64], edges: Edges) -> Vec<f64> {
    let full = convolve_full(input, taps);
    if full.is_empty() {
        return full;
    }
    match edges {
        Edges::Keep => full,
        Edges::Trim => {
            let half = taps.len().saturating_sub(1) / 2;
            full[half..half + input.len()].to_vec()
        }
    }
}
