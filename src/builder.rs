//! Type-state builder for [`BenchConfig`].
//!
//! ```text
//! Initial → WithThreads → Complete → BenchConfig
//!     ↓          ↓            ↓
//!  .threads()  .iterations()  .build()
//! ```
//!
//! Thread and iteration counts are required and enforced at compile time;
//! the increment range is optional and defaults to `1..=5`. Value checks
//! (zero counts, empty ranges) happen in [`BenchConfigBuilder::build`].
//!
//! # Examples
//!
//! ```
//! use tallybench::builder::BenchConfigBuilder;
//!
//! let config = BenchConfigBuilder::new()
//!     .threads(50)
//!     .iterations(500_000)
//!     .amount_range(1, 6)
//!     .build()?;
//!
//! assert_eq!(config.iterations_per_task(), 10_000);
//! assert_eq!(config.max_amount(), 6);
//! # Ok::<(), tallybench::BenchError>(())
//! ```
//!
//! ## Error Handling
//!
//! ```
//! use tallybench::builder::BenchConfigBuilder;
//!
//! let result = BenchConfigBuilder::new().threads(0).iterations(10).build();
//! assert!(result.is_err());
//! ```

use crate::core::params::{BenchConfig, DEFAULT_MAX_AMOUNT, DEFAULT_MIN_AMOUNT};
use crate::error::Result;
use std::marker::PhantomData;

/// Type-state marker: nothing set.
pub struct Initial;

/// Type-state marker: thread count set.
pub struct WithThreads;

/// Type-state marker: all required parameters set.
pub struct Complete;

/// Builder for [`BenchConfig`] with type-state guarantees.
pub struct BenchConfigBuilder<State> {
    threads: usize,
    iterations: u64,
    min_amount: u64,
    max_amount: u64,
    _state: PhantomData<State>,
}

impl BenchConfigBuilder<Initial> {
    /// Create a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            threads: 0,
            iterations: 0,
            min_amount: DEFAULT_MIN_AMOUNT,
            max_amount: DEFAULT_MAX_AMOUNT,
            _state: PhantomData,
        }
    }

    /// Set the worker thread count. Transitions to `WithThreads`.
    #[must_use]
    pub fn threads(self, threads: usize) -> BenchConfigBuilder<WithThreads> {
        self.transition(|b| b.threads = threads)
    }
}

impl Default for BenchConfigBuilder<Initial> {
    fn default() -> Self {
        Self::new()
    }
}

impl BenchConfigBuilder<WithThreads> {
    /// Set the total iteration count across all workers. Transitions to
    /// `Complete`.
    #[must_use]
    pub fn iterations(self, iterations: u64) -> BenchConfigBuilder<Complete> {
        self.transition(|b| b.iterations = iterations)
    }
}

impl<State> BenchConfigBuilder<State> {
    /// Set the inclusive range increments are drawn from (optional).
    #[must_use]
    pub fn amount_range(mut self, low: u64, high: u64) -> Self {
        self.min_amount = low;
        self.max_amount = high;
        self
    }

    fn transition<Next>(self, set: impl FnOnce(&mut Self)) -> BenchConfigBuilder<Next> {
        let mut this = self;
        set(&mut this);
        BenchConfigBuilder {
            threads: this.threads,
            iterations: this.iterations,
            min_amount: this.min_amount,
            max_amount: this.max_amount,
            _state: PhantomData,
        }
    }
}

impl BenchConfigBuilder<Complete> {
    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread or iteration count is zero, or the
    /// increment range is empty or includes zero.
    pub fn build(self) -> Result<BenchConfig> {
        BenchConfig::with_amounts(
            self.threads,
            self.iterations,
            self.min_amount,
            self.max_amount,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BenchError;

    #[test]
    fn test_minimal_build() {
        let config = BenchConfigBuilder::new().threads(4).iterations(10).build().unwrap();
        assert_eq!(config, BenchConfig::new(4, 10).unwrap());
    }

    #[test]
    fn test_range_set_before_threads() {
        let config = BenchConfigBuilder::new()
            .amount_range(2, 2)
            .threads(1)
            .iterations(1)
            .build()
            .unwrap();
        assert_eq!((config.min_amount(), config.max_amount()), (2, 2));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert_eq!(
            BenchConfigBuilder::new().threads(1).iterations(0).build(),
            Err(BenchError::invalid_iteration_count(0))
        );
        assert_eq!(
            BenchConfigBuilder::new()
                .threads(1)
                .iterations(1)
                .amount_range(5, 1)
                .build(),
            Err(BenchError::invalid_amount_range(5, 1))
        );
    }
}
