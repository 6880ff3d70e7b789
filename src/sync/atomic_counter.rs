//! Single-word atomic counters with cache-line padding.
//!
//! [`AtomicCounter`] is the lock-free reference point the two primary
//! strategies are measured against. It comes in three flavours, selected by
//! [`AtomicMode`]:
//!
//! | Mode      | Write path                                   |
//! |-----------|----------------------------------------------|
//! | `Relaxed` | `fetch_add(n, Relaxed)`                      |
//! | `SeqCst`  | `fetch_add(n, SeqCst)`                       |
//! | `Cas`     | load + `compare_exchange` retry loop         |
//!
//! # False Sharing
//!
//! Every hot atomic in this crate is wrapped in [`CacheLinePadded`] so that
//! it owns a full 64-byte line. Without padding, an unrelated field written
//! by another core (a read-side mutex, a neighbouring counter) invalidates
//! the line on every write.

use crate::core::counter::Counter;
use crate::error::{BenchError, Result};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Value aligned to, and padded out to, a full cache line.
///
/// # Memory Layout
///
/// ```text
/// [T][padding up to 64 bytes]   (align 64)
/// ```
///
/// # Examples
///
/// ```
/// use tallybench::sync::CacheLinePadded;
/// use std::sync::atomic::{AtomicU64, Ordering};
///
/// let padded = CacheLinePadded::new(AtomicU64::new(1));
/// padded.get().fetch_add(41, Ordering::Relaxed);
/// assert_eq!(padded.get().load(Ordering::Relaxed), 42);
/// ```
#[repr(align(64))]
#[derive(Default)]
pub struct CacheLinePadded<T> {
    value: T,
}

impl<T> CacheLinePadded<T> {
    /// Wrap `value` in its own cache line.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self { value }
    }

    /// Shared reference to the inner value.
    #[inline]
    #[must_use]
    pub const fn get(&self) -> &T {
        &self.value
    }
}

impl<T: fmt::Debug> fmt::Debug for CacheLinePadded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheLinePadded")
            .field("value", &self.value)
            .finish()
    }
}

/// Write strategy used by an [`AtomicCounter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AtomicMode {
    /// Relaxed fetch-and-add.
    #[default]
    Relaxed,
    /// Sequentially consistent fetch-and-add.
    SeqCst,
    /// Compare-and-swap retry loop (release on success).
    Cas,
}

impl AtomicMode {
    /// Name reported for counters using this mode.
    #[must_use]
    pub const fn counter_name(self) -> &'static str {
        match self {
            AtomicMode::Relaxed => "AtomicCounter(relaxed)",
            AtomicMode::SeqCst => "AtomicCounter(seq_cst)",
            AtomicMode::Cas => "AtomicCounter(cas)",
        }
    }
}

/// Lock-free counter over one padded `AtomicU64`.
///
/// Overflow is checked on every write. `Cas` refuses the update and leaves
/// the total untouched. The fetch-and-add modes only see the wrap after it
/// happened, so they report it and latch the counter: every later
/// [`Counter::value`] fails with the same overflow instead of returning the
/// wrapped total.
///
/// # Examples
///
/// ```
/// use tallybench::core::Counter;
/// use tallybench::sync::{AtomicCounter, AtomicMode};
/// use std::thread;
///
/// let counter = AtomicCounter::new(AtomicMode::Cas);
/// thread::scope(|s| {
///     for _ in 0..8 {
///         s.spawn(|| {
///             for _ in 0..1000 {
///                 counter.increment(1).unwrap();
///             }
///         });
///     }
/// });
/// assert_eq!(counter.value().unwrap(), 8000);
/// ```
#[derive(Default)]
pub struct AtomicCounter {
    total: CacheLinePadded<AtomicU64>,
    overflowed: AtomicBool,
    mode: AtomicMode,
}

impl AtomicCounter {
    /// Create a counter at zero using the given write strategy.
    #[must_use]
    pub const fn new(mode: AtomicMode) -> Self {
        Self {
            total: CacheLinePadded::new(AtomicU64::new(0)),
            overflowed: AtomicBool::new(false),
            mode,
        }
    }

    fn overflow(&self) -> BenchError {
        BenchError::counter_overflow(self.mode.counter_name())
    }

    fn fetch_add(&self, amount: u64, order: Ordering) -> Result<()> {
        let prev = self.total.get().fetch_add(amount, order);
        if prev.checked_add(amount).is_none() {
            self.overflowed.store(true, Ordering::Release);
            return Err(self.overflow());
        }
        Ok(())
    }

    fn compare_and_swap(&self, amount: u64) -> Result<()> {
        let total = self.total.get();
        let mut current = total.load(Ordering::Relaxed);
        loop {
            let next = current
                .checked_add(amount)
                .ok_or_else(|| self.overflow())?;

            match total.compare_exchange_weak(current, next, Ordering::Release, Ordering::Relaxed)
            {
                Ok(_) => return Ok(()),
                Err(actual) => current = actual,
            }
        }
    }
}

impl Counter for AtomicCounter {
    #[inline]
    fn increment(&self, amount: u64) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        match self.mode {
            AtomicMode::Relaxed => self.fetch_add(amount, Ordering::Relaxed),
            AtomicMode::SeqCst => self.fetch_add(amount, Ordering::SeqCst),
            AtomicMode::Cas => self.compare_and_swap(amount),
        }
    }

    fn value(&self) -> Result<u64> {
        if self.overflowed.load(Ordering::Acquire) {
            return Err(self.overflow());
        }
        Ok(self.total.get().load(Ordering::Acquire))
    }

    fn name(&self) -> &'static str {
        self.mode.counter_name()
    }
}

impl fmt::Debug for AtomicCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomicCounter")
            .field("mode", &self.mode)
            .field("total", &self.total.get().load(Ordering::Relaxed))
            .field("overflowed", &self.overflowed.load(Ordering::Relaxed))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CounterKind;
    use std::thread;

    const MODES: [AtomicMode; 3] = [AtomicMode::Relaxed, AtomicMode::SeqCst, AtomicMode::Cas];

    #[test]
    fn test_memory_layout() {
        assert_eq!(std::mem::size_of::<CacheLinePadded<AtomicU64>>(), 64);
        assert_eq!(std::mem::align_of::<CacheLinePadded<AtomicU64>>(), 64);
    }

    #[test]
    fn test_names_match_counter_kinds() {
        assert_eq!(AtomicMode::Relaxed.counter_name(), CounterKind::AtomicRelaxed.name());
        assert_eq!(AtomicMode::SeqCst.counter_name(), CounterKind::AtomicSeqCst.name());
        assert_eq!(AtomicMode::Cas.counter_name(), CounterKind::AtomicCas.name());
    }

    #[test]
    fn test_sequential_increments_all_modes() {
        for mode in MODES {
            let counter = AtomicCounter::new(mode);
            for _ in 0..10 {
                counter.increment(1).unwrap();
            }
            counter.increment(0).unwrap();
            assert_eq!(counter.value().unwrap(), 10, "mode {:?}", mode);
        }
    }

    #[test]
    fn test_cas_overflow_leaves_total_unchanged() {
        let counter = AtomicCounter::new(AtomicMode::Cas);
        counter.increment(u64::MAX - 1).unwrap();

        assert!(counter.increment(5).is_err());
        assert_eq!(counter.value().unwrap(), u64::MAX - 1);
    }

    #[test]
    fn test_fetch_add_overflow_latches() {
        for mode in [AtomicMode::Relaxed, AtomicMode::SeqCst] {
            let counter = AtomicCounter::new(mode);
            counter.increment(u64::MAX).unwrap();
            assert_eq!(counter.value().unwrap(), u64::MAX);

            let overflow = BenchError::counter_overflow(mode.counter_name());
            assert_eq!(counter.increment(2), Err(overflow.clone()));
            assert_eq!(counter.value(), Err(overflow));
        }
    }

    #[test]
    fn test_cas_overflow_does_not_latch() {
        let counter = AtomicCounter::new(AtomicMode::Cas);
        counter.increment(u64::MAX).unwrap();
        assert!(counter.increment(1).is_err());
        assert_eq!(counter.value().unwrap(), u64::MAX);
    }

    #[test]
    fn test_concurrent_all_modes() {
        for mode in MODES {
            let counter = AtomicCounter::new(mode);

            thread::scope(|s| {
                for _ in 0..8 {
                    s.spawn(|| {
                        for _ in 0..1000 {
                            counter.increment(3).unwrap();
                        }
                    });
                }
            });

            assert_eq!(counter.value().unwrap(), 24_000, "mode {:?}", mode);
        }
    }
}
