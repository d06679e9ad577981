//! Simulation driver tests: unit accounting, pattern mixing,
//! cancellation, and the single-run discipline.

use fraudsim_core::pattern::{FraudPattern, PatternName};
use fraudsim_core::{SimError, SimSession, SimulationConfig};
use std::time::{Duration, Instant};

fn quick_config() -> SimulationConfig {
    SimulationConfig {
        duration_hours: 1,
        transactions_per_hour: 50,
        fraud_patterns: vec![PatternName::MixedPatterns],
        fraud_rate: 0.15,
        seed: 42,
    }
}

/// Poll until the session reports not-running, or panic after the
/// deadline.
fn wait_until_idle(session: &SimSession, deadline: Duration) {
    let start = Instant::now();
    while session.status().running {
        assert!(
            start.elapsed() < deadline,
            "session still running after {deadline:?}"
        );
        std::thread::sleep(Duration::from_millis(10));
    }
}

#[test]
fn zero_fraud_rate_yields_exactly_the_configured_count() {
    let session = SimSession::new(42);
    let config = SimulationConfig {
        duration_hours: 1,
        transactions_per_hour: 100,
        fraud_rate: 0.0,
        ..quick_config()
    };
    session.run_blocking(&config, None).unwrap();

    let status = session.status();
    assert!(!status.running);
    assert_eq!(status.progress, 100.0);
    assert_eq!(status.total_transactions, 100);

    let report = session.report().unwrap();
    assert_eq!(report.summary.total_transactions, 100);
    assert_eq!(report.summary.fraudulent_transactions, 0);
    for txn in &report.transactions {
        assert!(txn.fraud_pattern.is_none());
    }
}

#[test]
fn full_fraud_rate_with_one_pattern_labels_everything() {
    let session = SimSession::new(42);
    let config = SimulationConfig {
        transactions_per_hour: 20,
        fraud_patterns: vec![PatternName::MerchantCycling],
        fraud_rate: 1.0,
        ..quick_config()
    };
    session.run_blocking(&config, None).unwrap();

    let report = session.report().unwrap();
    // Batches push the total above the unit count.
    assert!(report.summary.total_transactions >= 20 * 6);
    assert_eq!(report.summary.normal_transactions, 0);
    assert_eq!(report.pattern_analysis.len(), 1);
    assert!(report.pattern_analysis.contains_key("merchant_cycling"));
    for txn in &report.transactions {
        assert_eq!(txn.fraud_pattern, Some(FraudPattern::MerchantCycling));
    }
}

#[test]
fn alias_patterns_surface_as_rapid_fire() {
    let session = SimSession::new(42);
    let config = SimulationConfig {
        transactions_per_hour: 10,
        fraud_patterns: vec![PatternName::VelocityAttack],
        fraud_rate: 1.0,
        ..quick_config()
    };
    session.run_blocking(&config, None).unwrap();

    let report = session.report().unwrap();
    assert_eq!(report.pattern_analysis.len(), 1);
    assert!(report.pattern_analysis.contains_key("rapid_fire"));
}

#[test]
fn progress_callback_is_monotonic_and_reaches_100() {
    let session = SimSession::new(42);
    let config = SimulationConfig {
        transactions_per_hour: 40,
        fraud_rate: 0.0,
        ..quick_config()
    };

    let seen = std::sync::Mutex::new(Vec::new());
    let on_progress = |pct: f64| seen.lock().unwrap().push(pct);
    session.run_blocking(&config, Some(&on_progress)).unwrap();

    let seen = seen.into_inner().unwrap();
    assert_eq!(seen.len(), 40, "one callback per unit");
    for pair in seen.windows(2) {
        assert!(pair[0] <= pair[1], "progress must be non-decreasing");
    }
    assert_eq!(*seen.last().unwrap(), 100.0);
}

#[test]
fn invalid_configs_never_start() {
    let session = SimSession::new(42);
    let config = SimulationConfig {
        fraud_rate: 1.5,
        ..quick_config()
    };
    assert!(matches!(
        session.start(config),
        Err(SimError::InvalidConfig { .. })
    ));
    assert!(!session.status().running);
}

#[test]
fn concurrent_start_is_rejected() {
    let session = SimSession::new(42);
    let long_run = SimulationConfig {
        duration_hours: 1,
        transactions_per_hour: 2000,
        fraud_rate: 0.0,
        ..quick_config()
    };
    session.start(long_run.clone()).unwrap();

    // Second start while the driver is busy — busy error, no side effects.
    assert!(matches!(
        session.start(long_run),
        Err(SimError::AlreadyRunning)
    ));

    session.stop();
    wait_until_idle(&session, Duration::from_secs(5));
}

#[test]
fn stop_cancels_promptly_and_never_overshoots() {
    let session = SimSession::new(42);
    let config = SimulationConfig {
        duration_hours: 1,
        transactions_per_hour: 2000,
        fraud_rate: 0.0,
        ..quick_config()
    };
    session.start(config).unwrap();

    std::thread::sleep(Duration::from_millis(100));
    assert!(session.status().running, "run should still be going");
    session.stop();
    wait_until_idle(&session, Duration::from_secs(2));

    let status = session.status();
    assert!(
        status.total_transactions < 2000,
        "cancelled run produced {} of 2000 units",
        status.total_transactions
    );
    // Progress frozen where cancellation caught it, not forced to 100.
    assert!(status.progress < 100.0);
    assert!(status.progress > 0.0);
}

#[test]
fn stop_is_idempotent_when_idle() {
    let session = SimSession::new(42);
    session.stop();
    session.stop();
    assert!(!session.status().running);

    // A later run still works.
    let config = SimulationConfig {
        transactions_per_hour: 10,
        fraud_rate: 0.0,
        ..quick_config()
    };
    session.run_blocking(&config, None).unwrap();
    assert_eq!(session.status().total_transactions, 10);
}

#[test]
fn runs_discard_prior_state() {
    let session = SimSession::new(42);
    let config = SimulationConfig {
        transactions_per_hour: 30,
        fraud_rate: 0.0,
        ..quick_config()
    };
    session.run_blocking(&config, None).unwrap();
    assert_eq!(session.status().total_transactions, 30);

    // Second run replaces, not appends.
    session.run_blocking(&config, None).unwrap();
    assert_eq!(session.status().total_transactions, 30);
}

#[test]
fn clear_resets_everything() {
    let session = SimSession::new(42);
    session.run_blocking(&quick_config(), None).unwrap();
    assert!(session.status().total_transactions > 0);

    session.clear();
    let status = session.status();
    assert_eq!(status.total_transactions, 0);
    assert_eq!(status.progress, 0.0);
    assert!(matches!(session.report(), Err(SimError::NoTransactions)));
}

#[test]
fn same_seed_and_config_reproduce_the_stream() {
    let config = SimulationConfig {
        transactions_per_hour: 40,
        fraud_rate: 0.3,
        seed: 0xFEED_BEEF,
        ..quick_config()
    };

    let run = |s: &SimSession| {
        s.run_blocking(&config, None).unwrap();
        let report = s.report().unwrap();
        report
            .transactions
            .iter()
            .map(|t| (t.amount.to_bits(), t.fraud_pattern, t.merchant_id.clone()))
            .collect::<Vec<_>>()
    };

    let a = run(&SimSession::new(7));
    let b = run(&SimSession::new(7));
    assert_eq!(a, b, "same seeds must reproduce amounts, labels, merchants");
}
