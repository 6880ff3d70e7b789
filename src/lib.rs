//! tallybench: throughput and correctness of shared counters under contention.
//!
//! Many worker threads add pseudo-random amounts to one shared counter; after
//! all of them are joined, the counter is read once and must equal the exact
//! sum of everything that was added. The crate compares strategies for
//! keeping that counter:
//!
//! | Counter | Write path | Read path |
//! |---------|------------|-----------|
//! | [`LockedCounter`] | mutex | mutex |
//! | [`FastWriteCounter`] | relaxed checked update, no lock | read lock + correction term |
//! | [`AtomicCounter`] | fetch-and-add or CAS | atomic load |
//!
//! # Quick Start
//!
//! ```
//! use tallybench::prelude::*;
//!
//! let config = BenchConfig::new(4, 10_000)?;
//! let harness = Harness::new(config);
//!
//! let fast = harness.run_kind(CounterKind::FastWrite)?;
//! let locked = harness.run_kind(CounterKind::Locked)?;
//! assert_eq!(fast.value, locked.value);
//! # Ok::<(), tallybench::BenchError>(())
//! ```
//!
//! # Using a Counter Directly
//!
//! Counters take `&self`, so scoped threads can borrow one instance:
//!
//! ```
//! use tallybench::prelude::*;
//! use std::thread;
//!
//! let counter = FastWriteCounter::new();
//! thread::scope(|s| {
//!     for _ in 0..100 {
//!         s.spawn(|| counter.increment(1).unwrap());
//!     }
//! });
//! assert_eq!(counter.value()?, 100);
//! # Ok::<(), tallybench::BenchError>(())
//! ```
//!
//! # Reading Rules
//!
//! `value()` is only exact once every incrementing thread has been joined.
//! A read that overlaps in-flight increments returns a transient number;
//! the harness never does that.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![deny(unsafe_code)]

/// Type-state builder for run configurations
pub mod builder;

/// Core traits and run parameters
pub mod core;

/// Runs every counter variant and cross-checks their totals
pub mod driver;

/// Error types and result aliases
pub mod error;

/// Worker orchestration and run reports
pub mod harness;

/// Logger setup for the benchmark binary
pub mod logger;

/// Concurrent counter implementations
pub mod sync;

/// Seeded increment amounts
pub mod workload;

pub use error::{BenchError, Result};

pub use crate::core::{BenchConfig, Counter, CounterKind};
pub use driver::Driver;
pub use harness::{Harness, RunReport};
pub use sync::{AtomicCounter, AtomicMode, FastWriteCounter, LockedCounter};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::builder::BenchConfigBuilder;
    pub use crate::core::{BenchConfig, Counter, CounterKind};
    pub use crate::driver::Driver;
    pub use crate::error::{BenchError, Result};
    pub use crate::harness::{Harness, RunPhase, RunReport};
    pub use crate::sync::{AtomicCounter, AtomicMode, FastWriteCounter, LockedCounter};
    pub use crate::workload::{AmountSource, ConstantAmount, UniformAmounts};
}
