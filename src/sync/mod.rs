//! Concurrent counter implementations.
//!
//! # Module Organization
//!
//! - [`LockedCounter`] - one mutex around every read and write
//! - [`FastWriteCounter`] - lock-free writes, locked read bookkeeping
//! - [`AtomicCounter`] - single padded atomic (relaxed, seq_cst or CAS)
//!
//! # Locking Protocol
//!
//! | Counter            | `increment()`            | `value()`                    |
//! |--------------------|--------------------------|------------------------------|
//! | `LockedCounter`    | exclusive lock           | exclusive lock               |
//! | `FastWriteCounter` | relaxed checked update   | read lock + one-tick update  |
//! | `AtomicCounter`    | fetch-and-add or CAS     | acquire load                 |
//!
//! All three implement [`Counter`](crate::core::Counter) with `&self`
//! methods, so an instance can be borrowed by scoped worker threads
//! directly.
//!
//! # Examples
//!
//! ```
//! use tallybench::core::Counter;
//! use tallybench::sync::{FastWriteCounter, LockedCounter};
//! use std::thread;
//!
//! let locked = LockedCounter::new();
//! let fast = FastWriteCounter::new();
//!
//! thread::scope(|s| {
//!     for i in 0..4u64 {
//!         let (locked, fast) = (&locked, &fast);
//!         s.spawn(move || {
//!             locked.increment(i).unwrap();
//!             fast.increment(i).unwrap();
//!         });
//!     }
//! });
//!
//! assert_eq!(locked.value().unwrap(), 6);
//! assert_eq!(fast.value().unwrap(), 6);
//! ```

mod atomic_counter;
mod fast_write;
mod locked;

pub use atomic_counter::{AtomicCounter, AtomicMode, CacheLinePadded};
pub use fast_write::FastWriteCounter;
pub use locked::LockedCounter;
