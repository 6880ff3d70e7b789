//! Increment amounts fed to worker tasks.
//!
//! Each loop iteration of a worker asks an [`AmountSource`] for one amount,
//! keyed by a seed derived from the worker's index and loop position. A
//! source must be a pure function of that seed so that repeated runs are
//! reproducible.

use crate::core::BenchConfig;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic supplier of increment amounts.
pub trait AmountSource: Sync {
    /// Amount for the iteration identified by `seed`.
    fn draw(&self, seed: u64) -> u64;
}

/// Uniform amounts over an inclusive range.
///
/// Every draw seeds a fresh [`ChaCha8Rng`] with the iteration's seed and
/// takes a single sample, so the amount depends on nothing but the seed.
///
/// # Examples
///
/// ```
/// use tallybench::workload::{AmountSource, UniformAmounts};
///
/// let amounts = UniformAmounts::new(1, 5);
/// let a = amounts.draw(7);
/// assert!((1..=5).contains(&a));
/// assert_eq!(a, amounts.draw(7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformAmounts {
    low: u64,
    high: u64,
}

impl UniformAmounts {
    /// Amounts drawn from `low..=high`.
    ///
    /// # Panics
    ///
    /// Panics if `low > high`. Use [`UniformAmounts::from_config`] for
    /// validated bounds.
    #[must_use]
    pub fn new(low: u64, high: u64) -> Self {
        assert!(low <= high, "empty amount range [{}, {}]", low, high);
        Self { low, high }
    }

    /// Amounts drawn from the configuration's validated range.
    #[must_use]
    pub fn from_config(config: &BenchConfig) -> Self {
        Self {
            low: config.min_amount(),
            high: config.max_amount(),
        }
    }

    /// Lower bound (inclusive).
    #[must_use]
    pub fn low(&self) -> u64 {
        self.low
    }

    /// Upper bound (inclusive).
    #[must_use]
    pub fn high(&self) -> u64 {
        self.high
    }
}

impl AmountSource for UniformAmounts {
    #[inline]
    fn draw(&self, seed: u64) -> u64 {
        ChaCha8Rng::seed_from_u64(seed).gen_range(self.low..=self.high)
    }
}

/// The same amount on every draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantAmount(pub u64);

impl AmountSource for ConstantAmount {
    #[inline]
    fn draw(&self, _seed: u64) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_stays_in_range() {
        let amounts = UniformAmounts::new(1, 5);
        for seed in 0..10_000 {
            let a = amounts.draw(seed);
            assert!((1..=5).contains(&a), "seed {} drew {}", seed, a);
        }
    }

    #[test]
    fn test_uniform_covers_range() {
        let amounts = UniformAmounts::new(1, 5);
        let mut seen = [false; 5];
        for seed in 0..1_000 {
            seen[(amounts.draw(seed) - 1) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_uniform_is_reproducible() {
        let amounts = UniformAmounts::new(1, 5);
        let first: Vec<u64> = (0..100).map(|s| amounts.draw(s)).collect();
        let second: Vec<u64> = (0..100).map(|s| amounts.draw(s)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_degenerate_range() {
        let amounts = UniformAmounts::new(3, 3);
        assert!((0..50).all(|s| amounts.draw(s) == 3));
    }

    #[test]
    fn test_from_config() {
        let config = BenchConfig::with_amounts(1, 1, 2, 9).unwrap();
        let amounts = UniformAmounts::from_config(&config);
        assert_eq!((amounts.low(), amounts.high()), (2, 9));
    }

    #[test]
    #[should_panic(expected = "empty amount range")]
    fn test_empty_range_panics() {
        let _ = UniformAmounts::new(5, 1);
    }

    #[test]
    fn test_constant() {
        assert_eq!(ConstantAmount(1).draw(123), 1);
    }
}
