//! Test symbol source
//!
//! Random BPSK symbols with the matching bits and symbol-rate pulse train.

use rand::Rng;

/// Transmitted symbols in the three forms the chain uses
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolStream {
    symbols: Vec<i8>,
    bits: Vec<u8>,
    pulses: Vec<f64>,
    samples_per_symbol: usize,
}

impl SymbolStream {
    /// Draw `num_symbols` equiprobable ±1 symbols
    pub fn random<R: Rng + ?Sized>(num_symbols: usize, samples_per_symbol: usize, rng: &mut R) -> Self {
        let symbols = (0..num_symbols)
            .map(|_| if rng.gen::<bool>() { 1 } else { -1 })
            .collect();
        Self::from_symbols(symbols, samples_per_symbol)
    }

    /// Wrap a known symbol sequence
    pub fn from_symbols(symbols: Vec<i8>, samples_per_symbol: usize) -> Self {
        let bits = symbols.iter().map(|&s| u8::from(s > 0)).collect();

        // One impulse per symbol period, sps - 1 zeros after it
        let mut pulses = vec![0.0; symbols.len() * samples_per_symbol];
        if samples_per_symbol > 0 {
            for (k, &s) in symbols.iter().enumerate() {
                pulses[k * samples_per_symbol] = s as f64;
            }
        }

        Self {
            symbols,
            bits,
            pulses,
            samples_per_symbol,
        }
    }

    pub fn symbols(&self) -> &[i8] {
        &self.symbols
    }

    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    pub fn pulses(&self) -> &[f64] {
        &self.pulses
    }

    pub fn samples_per_symbol(&self) -> usize {
        self.samples_per_symbol
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_pulse_train_layout() {
        let stream = SymbolStream::from_symbols(vec![1, -1, -1, 1], 4);
        assert_eq!(
            stream.pulses(),
            &[1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]
        );
        assert_eq!(stream.bits(), &[1, 0, 0, 1]);
    }

    #[test]
    fn test_random_is_balanced_and_seeded() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let stream = SymbolStream::random(10000, 8, &mut rng);
        assert_eq!(stream.len(), 10000);
        assert_eq!(stream.pulses().len(), 80000);
        assert!(stream.symbols().iter().all(|&s| s == 1 || s == -1));

        let ones = stream.bits().iter().filter(|&&b| b == 1).count();
        assert!((ones as f64 / 10000.0 - 0.5).abs() < 0.03, "ones fraction {}", ones);

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        assert_eq!(SymbolStream::random(10000, 8, &mut rng), stream);
    }
}
