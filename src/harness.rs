//! Concurrent harness: spawn workers, join them, read the counter once.
//!
//! # Lifecycle
//!
//! ```text
//! Created ──join()──▶ Running ──(all workers joined)──▶ Joined ──report()──▶ Reported
//! ```
//!
//! - **Created**: the counter exists, nothing has been spawned.
//! - **Running**: one named scoped thread per worker task, each borrowing the
//!   counter and the amount source. Workers share nothing else.
//! - **Joined**: every worker has been joined. This is the only blocking
//!   point of a run.
//! - **Reported**: [`Counter::value`] has been called exactly once and the
//!   result wrapped in a [`RunReport`].
//!
//! A run never retries. A spawn failure, a worker panic, or a worker error
//! (such as a poisoned lock) fails the whole run and no value is reported.
//!
//! # Examples
//!
//! ```
//! use tallybench::core::{BenchConfig, CounterKind};
//! use tallybench::harness::Harness;
//!
//! let harness = Harness::new(BenchConfig::new(4, 1_000)?);
//! let fast = harness.run_kind(CounterKind::FastWrite)?;
//! let locked = harness.run_kind(CounterKind::Locked)?;
//!
//! assert_eq!(fast.value, locked.value);
//! assert!(fast.is_exact());
//! # Ok::<(), tallybench::BenchError>(())
//! ```

use crate::core::{BenchConfig, Counter, CounterKind};
use crate::error::{BenchError, Result};
use crate::workload::{AmountSource, UniformAmounts};
use tracing::{debug, info, warn};
use std::any::Any;
use std::fmt;
use std::ops::Range;
use std::thread::{self, ScopedJoinHandle};
use std::time::{Duration, Instant};

/// Phase of a single benchmark pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Counter constructed, no workers spawned.
    Created,
    /// Workers spawned and incrementing.
    Running,
    /// All workers joined.
    Joined,
    /// Final value read and reported.
    Reported,
}

/// Outcome of one benchmark pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Identity of the counter variant.
    pub variant: &'static str,
    /// Value returned by the single post-join `value()` call.
    pub value: u64,
    /// Sum of the amounts the workers applied, as tallied by the workers.
    pub expected: u64,
    /// Worker thread count.
    pub threads: usize,
    /// Increments actually performed across all workers.
    pub iterations: u64,
    /// Wall-clock time from first spawn to the final read.
    pub elapsed: Duration,
}

impl RunReport {
    /// Whether the counter agrees with the workers' own tally.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.value == self.expected
    }

    /// Increments per second over the measured interval.
    #[must_use]
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.iterations as f64 / secs
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}",
            self.variant,
            self.value,
            self.elapsed.as_micros()
        )
    }
}

/// Runs benchmark passes for a fixed configuration and amount source.
#[derive(Debug, Clone)]
pub struct Harness<S = UniformAmounts> {
    config: BenchConfig,
    source: S,
}

impl Harness<UniformAmounts> {
    /// Harness drawing uniform amounts from the configuration's range.
    #[must_use]
    pub fn new(config: BenchConfig) -> Self {
        let source = UniformAmounts::from_config(&config);
        Self { config, source }
    }
}

impl<S: AmountSource> Harness<S> {
    /// Harness drawing amounts from a custom source.
    #[must_use]
    pub fn with_source(config: BenchConfig, source: S) -> Self {
        Self { config, source }
    }

    /// The run configuration.
    #[must_use]
    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Start a pass over `counter` without spawning anything yet.
    pub fn start<C: Counter>(&self, counter: C) -> BenchRun<'_, C, S> {
        BenchRun {
            harness: self,
            counter,
            phase: RunPhase::Created,
            started: None,
            expected: 0,
        }
    }

    /// Run one full pass over `counter` and report its final value.
    ///
    /// # Errors
    ///
    /// Returns the first spawn failure, worker panic, or counter error.
    pub fn run<C: Counter>(&self, counter: C) -> Result<RunReport> {
        self.start(counter).report()
    }

    /// Run one full pass over a freshly constructed counter of `kind`.
    ///
    /// # Errors
    ///
    /// See [`Harness::run`].
    pub fn run_kind(&self, kind: CounterKind) -> Result<RunReport> {
        self.run(kind.build())
    }
}

/// One benchmark pass, owning its counter for the duration of the pass.
///
/// The counter is dropped together with the run, after it has been read.
pub struct BenchRun<'h, C, S> {
    harness: &'h Harness<S>,
    counter: C,
    phase: RunPhase,
    started: Option<Instant>,
    expected: u64,
}

impl<'h, C: Counter, S: AmountSource> BenchRun<'h, C, S> {
    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// The counter under test.
    #[must_use]
    pub fn counter(&self) -> &C {
        &self.counter
    }

    /// Spawn every worker and block until all of them have finished.
    ///
    /// Calling `join` on an already joined run does nothing.
    ///
    /// # Errors
    ///
    /// Returns the first spawn failure, worker panic, or counter error. All
    /// workers that were started are joined before the error is returned.
    pub fn join(mut self) -> Result<Self> {
        if self.phase != RunPhase::Created {
            return Ok(self);
        }

        let config = self.harness.config;
        info!(
            "{}: spawning {} workers x {} iterations ({} dropped)",
            self.counter.name(),
            config.threads(),
            config.iterations_per_task(),
            config.dropped_iterations()
        );

        self.phase = RunPhase::Running;
        self.started = Some(Instant::now());

        let counter = &self.counter;
        let source = &self.harness.source;
        let outcome = thread::scope(|s| {
            let mut handles = Vec::with_capacity(config.threads());

            for task_index in 0..config.threads() {
                let seeds = config.seeds_for_task(task_index);
                let spawned = thread::Builder::new()
                    .name(format!("worker-{}", task_index))
                    .spawn_scoped(s, move || run_worker(task_index, counter, source, seeds));

                match spawned {
                    Ok(handle) => handles.push((task_index, handle)),
                    Err(err) => {
                        warn!("failed to spawn worker {}: {}", task_index, err);
                        // Already-spawned workers must still be joined.
                        let _ = join_all(handles);
                        return Err(BenchError::spawn_failed(task_index, err.to_string()));
                    }
                }
            }

            join_all(handles)
        });

        self.expected = outcome?;
        self.phase = RunPhase::Joined;
        debug!("{}: all workers joined", self.counter.name());
        Ok(self)
    }

    /// Read the counter exactly once and produce the report.
    ///
    /// Joins first if the run has not been joined yet.
    ///
    /// # Errors
    ///
    /// Returns any error from [`BenchRun::join`] or from [`Counter::value`].
    pub fn report(self) -> Result<RunReport> {
        let mut run = self.join()?;

        let value = run.counter.value()?;
        let elapsed = run.started.map(|t| t.elapsed()).unwrap_or_default();
        run.phase = RunPhase::Reported;

        let report = RunReport {
            variant: run.counter.name(),
            value,
            expected: run.expected,
            threads: run.harness.config.threads(),
            iterations: run.harness.config.effective_iterations(),
            elapsed,
        };

        if report.is_exact() {
            info!(
                "{}: value {} in {:?} ({:.0} increments/s)",
                report.variant,
                value,
                elapsed,
                report.throughput()
            );
        } else {
            warn!(
                "{}: value {} differs from worker tally {}",
                report.variant, value, report.expected
            );
        }
        Ok(report)
    }
}

impl<C: fmt::Debug, S> fmt::Debug for BenchRun<'_, C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BenchRun")
            .field("counter", &self.counter)
            .field("phase", &self.phase)
            .finish()
    }
}

/// Body of one worker task. Returns the sum of the amounts it applied.
fn run_worker<C: Counter, S: AmountSource>(
    task_index: usize,
    counter: &C,
    source: &S,
    seeds: Range<u64>,
) -> Result<u64> {
    debug!("worker {} starting on seeds {:?}", task_index, seeds);

    let mut applied = 0u64;
    for seed in seeds {
        let amount = source.draw(seed);
        counter.increment(amount)?;
        applied = applied.saturating_add(amount);
    }

    debug!("worker {} applied {}", task_index, applied);
    Ok(applied)
}

/// Join every handle, even after a failure, and sum the worker tallies.
fn join_all(handles: Vec<(usize, ScopedJoinHandle<'_, Result<u64>>)>) -> Result<u64> {
    let mut expected = 0u64;
    let mut first_error = None;

    for (task_index, handle) in handles {
        let outcome = handle.join().unwrap_or_else(|payload| {
            Err(BenchError::worker_panicked(
                task_index,
                panic_message(payload.as_ref()),
            ))
        });

        match outcome {
            Ok(applied) => expected = expected.saturating_add(applied),
            Err(err) => {
                warn!("worker {} failed: {}", task_index, err);
                first_error.get_or_insert(err);
            }
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(expected),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
