//! Mutex-guarded counter.
//!
//! The baseline strategy: one `std::sync::Mutex<u64>` serializes every read
//! and every write. Cost is one lock acquisition per call, contended by all
//! workers.
//!
//! `std::sync::Mutex` is used instead of `parking_lot::Mutex` because its
//! poisoning is the signal that a worker died mid-critical-section. A
//! poisoned total is never reported.

use crate::core::counter::Counter;
use crate::error::{BenchError, Result};
use std::fmt;
use std::sync::Mutex;

const NAME: &str = "LockedCounter";

/// Counter that takes an exclusive lock for every access.
///
/// # Examples
///
/// ```
/// use tallybench::core::Counter;
/// use tallybench::sync::LockedCounter;
///
/// let counter = LockedCounter::new();
/// counter.increment(3)?;
/// counter.increment(4)?;
/// assert_eq!(counter.value()?, 7);
/// # Ok::<(), tallybench::BenchError>(())
/// ```
#[derive(Default)]
pub struct LockedCounter {
    total: Mutex<u64>,
}

impl LockedCounter {
    /// Create a counter starting at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            total: Mutex::new(0),
        }
    }
}

impl Counter for LockedCounter {
    fn increment(&self, amount: u64) -> Result<()> {
        let mut total = self
            .total
            .lock()
            .map_err(|_| BenchError::lock_poisoned(NAME))?;

        *total = total
            .checked_add(amount)
            .ok_or_else(|| BenchError::counter_overflow(NAME))?;
        Ok(())
    }

    fn value(&self) -> Result<u64> {
        let total = self
            .total
            .lock()
            .map_err(|_| BenchError::lock_poisoned(NAME))?;
        Ok(*total)
    }

    fn name(&self) -> &'static str {
        NAME
    }
}

impl fmt::Debug for LockedCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(NAME)
            .field("poisoned", &self.total.is_poisoned())
            .finish()
    }
}
