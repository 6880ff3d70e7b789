//! The shared counter abstraction.
//!
//! Every strategy benchmarked by this crate implements [`Counter`]. Both
//! operations take `&self` so a single instance can be lent to many worker
//! threads without an outer `Mutex`.
//!
//! # Correctness Contract
//!
//! Once every thread that called [`Counter::increment`] has been joined,
//! [`Counter::value`] must return exactly the sum of all amounts passed in.
//! Reads that race with in-flight increments are allowed to return a
//! transient number.

use crate::error::Result;
use crate::sync::{AtomicCounter, AtomicMode, FastWriteCounter, LockedCounter};
use std::fmt;

/// A numeric total that many threads may add to concurrently.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`. `increment` calls from different
/// threads are unordered; only their cumulative effect is observable.
///
/// # Examples
///
/// ```
/// use tallybench::core::Counter;
/// use tallybench::sync::LockedCounter;
/// use std::thread;
///
/// let counter = LockedCounter::new();
/// thread::scope(|s| {
///     for _ in 0..4 {
///         s.spawn(|| counter.increment(2).unwrap());
///     }
/// });
/// assert_eq!(counter.value().unwrap(), 8);
/// ```
pub trait Counter: Send + Sync {
    /// Add `amount` to the running total.
    ///
    /// `increment(0)` must not change anything observable.
    ///
    /// # Errors
    ///
    /// Returns an error if the counter's synchronization state was poisoned
    /// or the total would overflow `u64`.
    fn increment(&self, amount: u64) -> Result<()>;

    /// Observe the running total.
    ///
    /// Only exact after all incrementing threads have been joined.
    ///
    /// # Errors
    ///
    /// Returns an error if the counter's synchronization state was poisoned
    /// or an earlier overflow left it without a meaningful total.
    fn value(&self) -> Result<u64>;

    /// Stable identity of the strategy, used when reporting.
    fn name(&self) -> &'static str;
}

impl<C: Counter + ?Sized> Counter for Box<C> {
    #[inline]
    fn increment(&self, amount: u64) -> Result<()> {
        (**self).increment(amount)
    }

    fn value(&self) -> Result<u64> {
        (**self).value()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Every counter strategy the harness knows how to run.
///
/// The driver iterates [`CounterKind::ALL`] in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterKind {
    /// [`FastWriteCounter`](crate::sync::FastWriteCounter): lock-free writes,
    /// locked read bookkeeping.
    FastWrite,
    /// [`LockedCounter`](crate::sync::LockedCounter): one mutex around every access.
    Locked,
    /// [`AtomicCounter`](crate::sync::AtomicCounter) with relaxed fetch-and-add.
    AtomicRelaxed,
    /// [`AtomicCounter`](crate::sync::AtomicCounter) with sequentially
    /// consistent fetch-and-add.
    AtomicSeqCst,
    /// [`AtomicCounter`](crate::sync::AtomicCounter) with a compare-and-swap
    /// retry loop.
    AtomicCas,
}

impl CounterKind {
    /// All variants, in reporting order.
    pub const ALL: [CounterKind; 5] = [
        CounterKind::FastWrite,
        CounterKind::Locked,
        CounterKind::AtomicRelaxed,
        CounterKind::AtomicSeqCst,
        CounterKind::AtomicCas,
    ];

    /// The two strategies the benchmark was built to compare.
    pub const PRIMARY: [CounterKind; 2] = [CounterKind::FastWrite, CounterKind::Locked];

    /// Name reported for this variant; matches [`Counter::name`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CounterKind::FastWrite => "FastWriteCounter",
            CounterKind::Locked => "LockedCounter",
            CounterKind::AtomicRelaxed => "AtomicCounter(relaxed)",
            CounterKind::AtomicSeqCst => "AtomicCounter(seq_cst)",
            CounterKind::AtomicCas => "AtomicCounter(cas)",
        }
    }

    /// Construct a fresh counter of this variant, starting at zero.
    #[must_use]
    pub fn build(self) -> Box<dyn Counter> {
        match self {
            CounterKind::FastWrite => Box::new(FastWriteCounter::new()),
            CounterKind::Locked => Box::new(LockedCounter::new()),
            CounterKind::AtomicRelaxed => Box::new(AtomicCounter::new(AtomicMode::Relaxed)),
            CounterKind::AtomicSeqCst => Box::new(AtomicCounter::new(AtomicMode::SeqCst)),
            CounterKind::AtomicCas => Box::new(AtomicCounter::new(AtomicMode::Cas)),
        }
    }
}

impl fmt::Display for CounterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_kind_names_are_unique() {
        let names: HashSet<_> = CounterKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), CounterKind::ALL.len());
    }

    #[test]
    fn test_primary_kinds_lead_report_order() {
        assert_eq!(&CounterKind::ALL[..2], &CounterKind::PRIMARY[..]);
    }

    #[test]
    fn test_display_matches_name() {
        assert_eq!(CounterKind::Locked.to_string(), "LockedCounter");
    }

    #[test]
    fn test_built_counter_matches_kind() {
        for kind in CounterKind::ALL {
            let counter = kind.build();
            assert_eq!(counter.name(), kind.name());
            assert_eq!(counter.value().unwrap(), 0);

            counter.increment(6).unwrap();
            assert_eq!(counter.value().unwrap(), 6, "{}", kind);
        }
    }
}
