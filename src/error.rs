//! Error types for tallybench runs.
//!
//! Every fallible operation in the crate returns [`Result<T>`]. Errors fall
//! into three groups:
//!
//! - **Configuration**: rejected before any worker thread is spawned
//!   ([`BenchError::InvalidThreadCount`], [`BenchError::InvalidIterationCount`],
//!   [`BenchError::InvalidAmountRange`]).
//! - **Concurrency**: a run-level failure that invalidates the final value
//!   ([`BenchError::LockPoisoned`], [`BenchError::WorkerPanicked`],
//!   [`BenchError::SpawnFailed`]).
//! - **Arithmetic / reporting**: [`BenchError::CounterOverflow`] and
//!   [`BenchError::VariantMismatch`].
//!
//! # Error Propagation
//!
//! ```
//! use tallybench::{BenchError, Result};
//! use tallybench::core::BenchConfig;
//!
//! fn config_from_args(threads: usize, iterations: u64) -> Result<BenchConfig> {
//!     let config = BenchConfig::new(threads, iterations)?;
//!     Ok(config)
//! }
//! # assert!(config_from_args(4, 100).is_ok());
//! # assert!(config_from_args(0, 100).is_err());
//! ```

#![allow(clippy::module_name_repetitions)]

use std::fmt;

/// Result type alias for tallybench operations.
pub type Result<T> = std::result::Result<T, BenchError>;

/// Errors that can occur while configuring or executing a benchmark run.
///
/// `Clone` + `PartialEq` keep the error comparable in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BenchError {
    /// Worker thread count must be at least 1.
    InvalidThreadCount {
        /// The rejected thread count.
        threads: usize,
    },

    /// Total iteration count must be at least 1.
    InvalidIterationCount {
        /// The rejected iteration count.
        iterations: u64,
    },

    /// The inclusive range increments are drawn from is empty or starts at 0.
    InvalidAmountRange {
        /// Lower bound (inclusive).
        low: u64,
        /// Upper bound (inclusive).
        high: u64,
    },

    /// A thread panicked while holding a counter lock.
    ///
    /// The guarded total can no longer be trusted, so the run is aborted
    /// instead of reporting a value.
    LockPoisoned {
        /// Identity of the counter variant whose lock was poisoned.
        variant: &'static str,
    },

    /// A worker thread terminated abnormally before finishing its share.
    WorkerPanicked {
        /// Index of the worker task.
        task_index: usize,
        /// Panic payload, if it was a string.
        message: String,
    },

    /// The operating system refused to spawn a worker thread.
    SpawnFailed {
        /// Index of the worker task that could not be started.
        task_index: usize,
        /// Underlying I/O error description.
        message: String,
    },

    /// An increment would exceed the counter's 64-bit range.
    CounterOverflow {
        /// Identity of the overflowing counter variant.
        variant: &'static str,
        /// Maximum value the counter can hold.
        max_value: u64,
    },

    /// Two counter variants reported different totals for the same workload.
    VariantMismatch {
        /// Variant used as the reference.
        expected_variant: &'static str,
        /// Value reported by the reference variant.
        expected: u64,
        /// Variant that disagreed.
        actual_variant: &'static str,
        /// Value reported by the disagreeing variant.
        actual: u64,
    },
}

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidThreadCount { threads } => {
                write!(
                    f,
                    "Invalid thread count: {}. At least one worker thread is required.",
                    threads
                )
            }
            Self::InvalidIterationCount { iterations } => {
                write!(
                    f,
                    "Invalid iteration count: {}. Total iterations must be greater than 0.",
                    iterations
                )
            }
            Self::InvalidAmountRange { low, high } => {
                write!(
                    f,
                    "Invalid increment range [{}, {}]. Bounds must satisfy 1 <= low <= high.",
                    low, high
                )
            }
            Self::LockPoisoned { variant } => {
                write!(
                    f,
                    "Lock poisoned in {}: a thread panicked inside the critical section.",
                    variant
                )
            }
            Self::WorkerPanicked {
                task_index,
                message,
            } => {
                write!(f, "Worker task {} panicked: {}", task_index, message)
            }
            Self::SpawnFailed {
                task_index,
                message,
            } => {
                write!(
                    f,
                    "Failed to spawn worker task {}: {}",
                    task_index, message
                )
            }
            Self::CounterOverflow { variant, max_value } => {
                write!(
                    f,
                    "Counter overflow in {}: attempted to exceed maximum value {}",
                    variant, max_value
                )
            }
            Self::VariantMismatch {
                expected_variant,
                expected,
                actual_variant,
                actual,
            } => {
                write!(
                    f,
                    "Counter variants disagree: {} reported {} but {} reported {}",
                    expected_variant, expected, actual_variant, actual
                )
            }
        }
    }
}

impl std::error::Error for BenchError {}

impl BenchError {
    /// Create an `InvalidThreadCount` error.
    #[must_use]
    pub fn invalid_thread_count(threads: usize) -> Self {
        Self::InvalidThreadCount { threads }
    }

    /// Create an `InvalidIterationCount` error.
    #[must_use]
    pub fn invalid_iteration_count(iterations: u64) -> Self {
        Self::InvalidIterationCount { iterations }
    }

    /// Create an `InvalidAmountRange` error.
    #[must_use]
    pub fn invalid_amount_range(low: u64, high: u64) -> Self {
        Self::InvalidAmountRange { low, high }
    }

    /// Create a `LockPoisoned` error.
    #[must_use]
    pub fn lock_poisoned(variant: &'static str) -> Self {
        Self::LockPoisoned { variant }
    }

    /// Create a `WorkerPanicked` error.
    #[must_use]
    pub fn worker_panicked(task_index: usize, message: impl Into<String>) -> Self {
        Self::WorkerPanicked {
            task_index,
            message: message.into(),
        }
    }

    /// Create a `SpawnFailed` error.
    #[must_use]
    pub fn spawn_failed(task_index: usize, message: impl Into<String>) -> Self {
        Self::SpawnFailed {
            task_index,
            message: message.into(),
        }
    }

    /// Create a `CounterOverflow` error.
    #[must_use]
    pub fn counter_overflow(variant: &'static str) -> Self {
        Self::CounterOverflow {
            variant,
            max_value: u64::MAX,
        }
    }

    /// Create a `VariantMismatch` error.
    #[must_use]
    pub fn variant_mismatch(
        expected_variant: &'static str,
        expected: u64,
        actual_variant: &'static str,
        actual: u64,
    ) -> Self {
        Self::VariantMismatch {
            expected_variant,
            expected,
            actual_variant,
            actual,
        }
    }

    /// Whether the error was raised before any worker was spawned.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidThreadCount { .. }
                | Self::InvalidIterationCount { .. }
                | Self::InvalidAmountRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_thread_count() {
        let err = BenchError::invalid_thread_count(0);
        let display = format!("{err}");
        assert!(display.contains("thread count: 0"));
        assert!(display.ends_with('.'));
    }

    #[test]
    fn test_error_display_invalid_iteration_count() {
        let err = BenchError::invalid_iteration_count(0);
        let display = format!("{err}");
        assert!(display.contains("greater than 0"));
    }

    #[test]
    fn test_error_display_invalid_amount_range() {
        let err = BenchError::invalid_amount_range(6, 1);
        let display = format!("{err}");
        assert!(display.contains("[6, 1]"));
    }

    #[test]
    fn test_error_display_lock_poisoned() {
        let err = BenchError::lock_poisoned("LockedCounter");
        let display = format!("{err}");
        assert!(display.contains("LockedCounter"));
        assert!(display.contains("poisoned"));
    }

    #[test]
    fn test_error_display_worker_panicked() {
        let err = BenchError::worker_panicked(3, "boom");
        let display = format!("{err}");
        assert!(display.contains("task 3"));
        assert!(display.contains("boom"));
    }

    #[test]
    fn test_error_display_counter_overflow() {
        let err = BenchError::counter_overflow("FastWriteCounter");
        let display = format!("{err}");
        assert!(display.contains("overflow"));
        assert!(display.contains(&u64::MAX.to_string()));
    }

    #[test]
    fn test_error_display_variant_mismatch() {
        let err = BenchError::variant_mismatch("FastWriteCounter", 10, "LockedCounter", 9);
        let display = format!("{err}");
        assert!(display.contains("FastWriteCounter reported 10"));
        assert!(display.contains("LockedCounter reported 9"));
    }

    #[test]
    fn test_configuration_classification() {
        assert!(BenchError::invalid_thread_count(0).is_configuration_error());
        assert!(BenchError::invalid_amount_range(0, 5).is_configuration_error());
        assert!(!BenchError::lock_poisoned("LockedCounter").is_configuration_error());
        assert!(!BenchError::spawn_failed(0, "EAGAIN").is_configuration_error());
    }

    #[test]
    fn test_error_implements_std_error() {
        let _err: Box<dyn std::error::Error> = Box::new(BenchError::invalid_thread_count(0));
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn inner() -> Result<()> {
            Err(BenchError::invalid_iteration_count(0))
        }

        fn outer() -> Result<()> {
            inner()?;
            Ok(())
        }

        assert_eq!(outer(), Err(BenchError::invalid_iteration_count(0)));
    }
}
