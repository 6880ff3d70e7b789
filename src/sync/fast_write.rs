//! Fast-write counter: lock-free increments, locked reads.
//!
//! # Representation
//!
//! The total is never stored directly. Instead the counter keeps a
//! monotonically increasing tick generator and a count of reads:
//!
//! ```text
//! total = ticks_taken_by_reads_and_writes − reads_so_far
//! ```
//!
//! - `increment(n)` advances the generator by `n` ticks with a relaxed
//!   checked update. No lock is taken.
//! - `value()` locks the read bookkeeping, takes one tick from the generator
//!   (its position before the advance is the snapshot), subtracts the number
//!   of earlier reads, and bumps the read count.
//!
//! Each read consumes a tick of its own, which is exactly what the read
//! count subtracts back out:
//!
//! ```text
//! increment(3)          generator 0 → 3
//! value()   snapshot 3, reads 0 → returns 3, generator 3 → 4, reads 1
//! value()   snapshot 4, reads 1 → returns 3, generator 4 → 5, reads 2
//! increment(2)          generator 5 → 7
//! value()   snapshot 7, reads 2 → returns 5
//! ```
//!
//! # Concurrency
//!
//! Writers only contend on one cache line. Reads serialize among themselves
//! and are only meaningful after every writer has been joined: a read that
//! races a writer returns whatever prefix of the increments it happened to
//! observe.
//!
//! The generator is cache-line padded so that the read-side mutex does not
//! share its line.
//!
//! # Overflow
//!
//! An advance that would carry the generator past `u64::MAX` is refused and
//! leaves it untouched, so the total read afterwards is the one before the
//! failed increment.

use crate::core::counter::Counter;
use crate::error::{BenchError, Result};
use crate::sync::atomic_counter::CacheLinePadded;
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

const NAME: &str = "FastWriteCounter";

/// Counter optimized for many writers and rare readers.
///
/// # Examples
///
/// ```
/// use tallybench::core::Counter;
/// use tallybench::sync::FastWriteCounter;
/// use std::thread;
///
/// let counter = FastWriteCounter::new();
/// thread::scope(|s| {
///     for _ in 0..100 {
///         s.spawn(|| counter.increment(1).unwrap());
///     }
/// });
/// assert_eq!(counter.value().unwrap(), 100);
/// assert_eq!(counter.value().unwrap(), 100);
/// ```
#[derive(Default)]
pub struct FastWriteCounter {
    ticks: CacheLinePadded<AtomicU64>,
    reads: Mutex<u64>,
}

impl FastWriteCounter {
    /// Create a counter whose generator starts at tick zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ticks: CacheLinePadded::new(AtomicU64::new(0)),
            reads: Mutex::new(0),
        }
    }

    /// Raw generator position (writes plus one tick per read).
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks.get().load(Ordering::Acquire)
    }

    /// Number of `value()` calls completed so far.
    #[must_use]
    pub fn reads(&self) -> u64 {
        *self.reads.lock()
    }

    /// Advance the generator by `n` ticks and return its previous position.
    ///
    /// Nothing is stored if the advance would overflow.
    #[inline]
    fn advance(&self, n: u64, set_order: Ordering, fetch_order: Ordering) -> Result<u64> {
        self.ticks
            .get()
            .fetch_update(set_order, fetch_order, |prev| prev.checked_add(n))
            .map_err(|_| BenchError::counter_overflow(NAME))
    }
}

impl Counter for FastWriteCounter {
    #[inline]
    fn increment(&self, amount: u64) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        // Writers are unordered; the join barrier publishes them to readers.
        self.advance(amount, Ordering::Relaxed, Ordering::Relaxed)?;
        Ok(())
    }

    fn value(&self) -> Result<u64> {
        let mut reads = self.reads.lock();
        let snapshot = self.advance(1, Ordering::AcqRel, Ordering::Acquire)?;
        let value = snapshot
            .checked_sub(*reads)
            .ok_or_else(|| BenchError::counter_overflow(NAME))?;
        *reads += 1;
        Ok(value)
    }

    fn name(&self) -> &'static str {
        NAME
    }
}

impl fmt::Debug for FastWriteCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(NAME)
            .field("ticks", &self.ticks())
            .field("reads", &self.reads())
            .finish()
    }
}
