//! Runs the harness once per counter variant and cross-checks the results.
//!
//! Every variant sees the same configuration and the same seeded workload,
//! so every variant must report the same total. The first variant is the
//! reference; any disagreement fails the whole benchmark.

use crate::core::{BenchConfig, CounterKind};
use crate::error::{BenchError, Result};
use crate::harness::{Harness, RunReport};
use crate::workload::{AmountSource, UniformAmounts};
use tracing::error;

/// Sequence of harness passes, one per counter variant.
#[derive(Debug, Clone)]
pub struct Driver<S = UniformAmounts> {
    harness: Harness<S>,
    kinds: Vec<CounterKind>,
}

impl Driver<UniformAmounts> {
    /// Driver over every known variant, drawing uniform amounts from the
    /// configuration's range.
    #[must_use]
    pub fn new(config: BenchConfig) -> Self {
        Self {
            harness: Harness::new(config),
            kinds: CounterKind::ALL.to_vec(),
        }
    }
}

impl<S: AmountSource> Driver<S> {
    /// Driver over an existing harness.
    #[must_use]
    pub fn with_harness(harness: Harness<S>) -> Self {
        Self {
            harness,
            kinds: CounterKind::ALL.to_vec(),
        }
    }

    /// Restrict the run to the given variants, in the given order.
    #[must_use]
    pub fn kinds(mut self, kinds: &[CounterKind]) -> Self {
        self.kinds = kinds.to_vec();
        self
    }

    /// Run every variant in order, handing each report to `on_report` as
    /// soon as it is available.
    ///
    /// A failed pass stops the sequence; reports already handed out stay
    /// valid.
    ///
    /// # Errors
    ///
    /// Returns the first run-level failure, or
    /// [`BenchError::VariantMismatch`] if two variants disagree.
    pub fn run<F>(&self, mut on_report: F) -> Result<Vec<RunReport>>
    where
        F: FnMut(&RunReport),
    {
        let mut reports = Vec::with_capacity(self.kinds.len());
        for &kind in &self.kinds {
            let report = self.harness.run_kind(kind).map_err(|err| {
                error!("{} run failed: {}", kind, err);
                err
            })?;
            on_report(&report);
            reports.push(report);
        }

        check_agreement(&reports)?;
        Ok(reports)
    }
}

/// Verify that every report carries the same value as the first.
///
/// # Errors
///
/// Returns [`BenchError::VariantMismatch`] naming the first disagreeing
/// variant.
pub fn check_agreement(reports: &[RunReport]) -> Result<()> {
    let Some((reference, rest)) = reports.split_first() else {
        return Ok(());
    };

    for report in rest {
        if report.value != reference.value {
            return Err(BenchError::variant_mismatch(
                reference.variant,
                reference.value,
                report.variant,
                report.value,
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workload::ConstantAmount;
    use std::time::Duration;

    fn report(variant: &'static str, value: u64) -> RunReport {
        RunReport {
            variant,
            value,
            expected: value,
            threads: 1,
            iterations: 1,
            elapsed: Duration::ZERO,
        }
    }

    #[test]
    fn test_agreement_ok() {
        let reports = [report("a", 5), report("b", 5), report("c", 5)];
        assert!(check_agreement(&reports).is_ok());
        assert!(check_agreement(&[]).is_ok());
    }

    #[test]
    fn test_agreement_mismatch() {
        let reports = [report("a", 5), report("b", 5), report("c", 4)];
        assert_eq!(
            check_agreement(&reports),
            Err(BenchError::variant_mismatch("a", 5, "c", 4))
        );
    }

    #[test]
    fn test_driver_reports_in_order() {
        let driver = Driver::new(BenchConfig::new(3, 300).unwrap())
            .kinds(&CounterKind::PRIMARY);

        let mut seen = Vec::new();
        let reports = driver.run(|r| seen.push(r.variant)).unwrap();

        assert_eq!(seen, vec!["FastWriteCounter", "LockedCounter"]);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].value, reports[1].value);
    }

    #[test]
    fn test_driver_over_custom_harness() {
        let harness = Harness::with_source(BenchConfig::new(4, 100).unwrap(), ConstantAmount(2));
        let reports = Driver::with_harness(harness).run(|_| {}).unwrap();

        assert_eq!(reports.len(), CounterKind::ALL.len());
        for report in &reports {
            assert_eq!(report.value, 200, "{}", report.variant);
            assert!(report.is_exact());
        }
    }
}
