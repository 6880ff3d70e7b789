//! Run parameters and work partitioning.
//!
//! A benchmark pass is described by three numbers:
//! - `threads`: number of worker tasks (one OS thread each)
//! - `iterations`: total increments across *all* workers
//! - `[min_amount, max_amount]`: inclusive range each increment is drawn from
//!
//! # Partitioning
//!
//! Every worker gets `iterations / threads` increments. The division
//! truncates, so `iterations % threads` increments are never performed:
//!
//! ```text
//! threads = 3, iterations = 10  →  3 + 3 + 3 = 9 draws, 1 dropped
//! ```
//!
//! Worker `i` draws with seeds `i, i + 1, ..., i + share - 1`, so seeds of
//! neighbouring workers overlap. Both behaviours are kept as-is.

use crate::error::{BenchError, Result};
use std::ops::Range;

/// Default lower bound for drawn increments (inclusive).
pub const DEFAULT_MIN_AMOUNT: u64 = 1;

/// Default upper bound for drawn increments (inclusive).
pub const DEFAULT_MAX_AMOUNT: u64 = 5;

/// Validated configuration for one benchmark pass.
///
/// # Examples
///
/// ```
/// use tallybench::core::BenchConfig;
///
/// let config = BenchConfig::new(3, 10)?;
/// assert_eq!(config.iterations_per_task(), 3);
/// assert_eq!(config.effective_iterations(), 9);
/// assert_eq!(config.dropped_iterations(), 1);
/// # Ok::<(), tallybench::BenchError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchConfig {
    threads: usize,
    iterations: u64,
    min_amount: u64,
    max_amount: u64,
}

impl BenchConfig {
    /// Create a configuration using the default increment range `1..=5`.
    ///
    /// # Errors
    ///
    /// Returns an error if `threads == 0` or `iterations == 0`.
    pub fn new(threads: usize, iterations: u64) -> Result<Self> {
        Self::with_amounts(threads, iterations, DEFAULT_MIN_AMOUNT, DEFAULT_MAX_AMOUNT)
    }

    /// Create a configuration with an explicit inclusive increment range.
    ///
    /// # Errors
    ///
    /// Returns an error if `threads == 0`, `iterations == 0`, `min_amount == 0`
    /// or `min_amount > max_amount`.
    pub fn with_amounts(
        threads: usize,
        iterations: u64,
        min_amount: u64,
        max_amount: u64,
    ) -> Result<Self> {
        validate_threads(threads)?;
        validate_iterations(iterations)?;
        validate_amounts(min_amount, max_amount)?;

        Ok(Self {
            threads,
            iterations,
            min_amount,
            max_amount,
        })
    }

    /// Number of worker tasks.
    #[inline]
    #[must_use]
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Total iterations requested across all workers.
    #[inline]
    #[must_use]
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Lower bound of the increment range (inclusive).
    #[inline]
    #[must_use]
    pub fn min_amount(&self) -> u64 {
        self.min_amount
    }

    /// Upper bound of the increment range (inclusive).
    #[inline]
    #[must_use]
    pub fn max_amount(&self) -> u64 {
        self.max_amount
    }

    /// Increments performed by each worker (`iterations / threads`).
    #[inline]
    #[must_use]
    pub fn iterations_per_task(&self) -> u64 {
        self.iterations / self.threads as u64
    }

    /// Increments actually performed across all workers.
    #[inline]
    #[must_use]
    pub fn effective_iterations(&self) -> u64 {
        self.iterations_per_task() * self.threads as u64
    }

    /// Increments lost to truncating division.
    #[inline]
    #[must_use]
    pub fn dropped_iterations(&self) -> u64 {
        self.iterations - self.effective_iterations()
    }

    /// Seed range walked by worker `task_index`.
    #[must_use]
    pub fn seeds_for_task(&self, task_index: usize) -> Range<u64> {
        let start = task_index as u64;
        start..start + self.iterations_per_task()
    }
}

/// Reject a zero thread count.
///
/// # Errors
///
/// Returns [`BenchError::InvalidThreadCount`] if `threads == 0`.
pub fn validate_threads(threads: usize) -> Result<()> {
    if threads == 0 {
        return Err(BenchError::invalid_thread_count(threads));
    }
    Ok(())
}

/// Reject a zero iteration count.
///
/// # Errors
///
/// Returns [`BenchError::InvalidIterationCount`] if `iterations == 0`.
pub fn validate_iterations(iterations: u64) -> Result<()> {
    if iterations == 0 {
        return Err(BenchError::invalid_iteration_count(iterations));
    }
    Ok(())
}

/// Reject an empty range or one that includes zero.
///
/// # Errors
///
/// Returns [`BenchError::InvalidAmountRange`] unless `1 <= low <= high`.
pub fn validate_amounts(low: u64, high: u64) -> Result<()> {
    if low == 0 || low > high {
        return Err(BenchError::invalid_amount_range(low, high));
    }
    Ok(())
}
