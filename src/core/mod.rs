//! Core traits and run parameters.
//!
//! ```text
//! core/
//! ├── counter.rs   - `Counter` trait and `CounterKind`
//! ├── params.rs    - `BenchConfig`, validation, work partitioning
//! └── mod.rs       - This file (public API)
//! ```
//!
//! Concrete counters live in [`crate::sync`]; the thread orchestration that
//! drives them lives in [`crate::harness`].

pub mod counter;
pub mod params;

pub use counter::{Counter, CounterKind};
pub use params::{BenchConfig, DEFAULT_MAX_AMOUNT, DEFAULT_MIN_AMOUNT};
