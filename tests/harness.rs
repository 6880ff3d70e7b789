//! End-to-end harness scenarios.

use tallybench::prelude::*;

#[test]
fn test_single_worker_is_reproducible() {
    let harness = Harness::new(BenchConfig::new(1, 1_000).unwrap());

    for kind in CounterKind::PRIMARY {
        let first = harness.run_kind(kind).unwrap();
        let second = harness.run_kind(kind).unwrap();
        assert_eq!(first.value, second.value, "{}", kind);
    }
}

#[test]
fn test_remainder_iterations_are_dropped() {
    let harness = Harness::with_source(BenchConfig::new(3, 10).unwrap(), ConstantAmount(1));

    for kind in CounterKind::ALL {
        let report = harness.run_kind(kind).unwrap();
        assert_eq!(report.value, 9, "{}", kind);
        assert_eq!(report.iterations, 9);
    }
}

#[test]
fn test_uneven_split_matches_draw_count() {
    let config = BenchConfig::new(7, 100).unwrap();
    let amounts = UniformAmounts::from_config(&config);

    let expected: u64 = (0..config.threads())
        .flat_map(|task| config.seeds_for_task(task))
        .map(|seed| amounts.draw(seed))
        .sum();

    let report = Harness::new(config).run_kind(CounterKind::FastWrite).unwrap();
    assert_eq!(config.effective_iterations(), 98);
    assert_eq!(report.value, expected);
    assert_eq!(report.expected, expected);
}

#[test]
fn test_stress_variants_agree() {
    let config = BenchConfig::new(50, 500_000).unwrap();
    let driver = Driver::new(config);

    let reports = driver.run(|_| {}).unwrap();
    assert_eq!(reports.len(), CounterKind::ALL.len());

    let reference = reports[0].value;
    for report in &reports {
        assert_eq!(report.value, reference, "{}", report.variant);
        assert!(report.is_exact(), "{}", report.variant);
        assert_eq!(report.threads, 50);
        assert_eq!(report.iterations, 500_000);
    }

    // Every draw is in 1..=5.
    assert!(reference >= 500_000);
    assert!(reference <= 5 * 500_000);
}

#[test]
fn test_configuration_errors_before_spawn() {
    assert!(BenchConfig::new(0, 10).unwrap_err().is_configuration_error());
    assert!(BenchConfig::new(10, 0).unwrap_err().is_configuration_error());
}

#[test]
fn test_custom_amount_range() {
    let config = BenchConfigBuilder::new()
        .threads(4)
        .iterations(400)
        .amount_range(2, 2)
        .build()
        .unwrap();

    let report = Harness::new(config).run_kind(CounterKind::Locked).unwrap();
    assert_eq!(report.value, 800);
}
