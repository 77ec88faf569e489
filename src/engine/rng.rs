//! Deterministic random number generation.
//!
//! Implements PCG (Permuted Congruential Generator) with partitioned seeds
//! so the radius and angle streams of the sampler stay independent.
//!
//! # Reproducibility Guarantee
//!
//! Given the same master seed, all random number sequences will be
//! bitwise-identical across runs and platforms. Unseeded runs draw their
//! master seed from OS entropy and still report it, so any run can be
//! replayed after the fact.

use rand::prelude::*;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

/// Golden-ratio increment used to derive partition seeds.
const STREAM_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Deterministic, reproducible random number generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimRng {
    /// Master seed for reproducibility.
    master_seed: u64,
    /// Current stream index for partitioning.
    stream: u64,
    /// Internal PCG state.
    rng: Pcg64,
}

impl SimRng {
    /// Create a new RNG with the given master seed.
    #[must_use]
    pub fn new(master_seed: u64) -> Self {
        let rng = Pcg64::seed_from_u64(master_seed);
        Self {
            master_seed,
            stream: 0,
            rng,
        }
    }

    /// Create an RNG whose master seed is drawn from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Create a seeded RNG when a seed is given, otherwise an entropy-seeded one.
    #[must_use]
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }

    /// Get the master seed.
    #[must_use]
    pub const fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Get current stream index.
    #[must_use]
    pub const fn stream(&self) -> u64 {
        self.stream
    }

    /// Create partitioned RNGs.
    ///
    /// Each partition gets an independent stream derived from the master seed,
    /// ensuring reproducibility regardless of consumption order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use clt_darts::engine::rng::SimRng;
    ///
    /// let mut rng = SimRng::new(42);
    /// let partitions = rng.partition(2);
    /// assert_eq!(partitions.len(), 2);
    /// ```
    #[must_use]
    pub fn partition(&mut self, n: usize) -> Vec<Self> {
        let partitions: Vec<Self> = (0..n)
            .map(|i| {
                let stream = self.stream + i as u64;
                let seed = self
                    .master_seed
                    .wrapping_add(stream.wrapping_mul(STREAM_MIX));
                Self {
                    master_seed: self.master_seed,
                    stream,
                    rng: Pcg64::seed_from_u64(seed),
                }
            })
            .collect();

        self.stream += n as u64;
        partitions
    }

    /// Generate a random f64 in [0, 1).
    pub fn gen_f64(&mut self) -> f64 {
        self.rng.gen()
    }

    /// Generate a random f64 in the given range.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    pub fn gen_range_f64(&mut self, min: f64, max: f64) -> f64 {
        assert!(min <= max, "Invalid range: min > max");
        min + (max - min) * self.gen_f64()
    }

    /// Generate n random f64 samples in [0, 1).
    #[must_use]
    pub fn sample_n(&mut self, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.gen_f64()).collect()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Reproducibility holds for any seed.
        #[test]
        fn prop_reproducibility(seed in 0u64..u64::MAX) {
            let mut rng1 = SimRng::new(seed);
            let mut rng2 = SimRng::new(seed);
            for _ in 0..10 {
                prop_assert_eq!(rng1.gen_f64().to_bits(), rng2.gen_f64().to_bits());
            }
        }

        /// Every draw lies in the unit interval.
        #[test]
        fn prop_unit_interval(seed in 0u64..u64::MAX) {
            let mut rng = SimRng::new(seed);
            for _ in 0..100 {
                let v = rng.gen_f64();
                prop_assert!((0.0..1.0).contains(&v));
            }
        }
    }
}
