//! The simulation session and its driver.
//!
//! One `SimSession` holds the process-lifetime entity pools and the
//! per-run mutable state: the user roster, the accumulated transaction
//! list, and the running/progress/cancel flags. The session is an
//! explicit dependency — request handlers hold a clone, there is no
//! process-wide singleton.
//!
//! Concurrency discipline: the driver is the sole writer of
//! transactions, users, progress, and the running flag while a run is
//! active. The foreground only reads status and sets the cancel flag.
//! At most one run is active at a time; concurrent starts are rejected,
//! never queued. Stale progress reads by the foreground are fine.

use crate::{
    config::SimulationConfig,
    error::{SimError, SimResult},
    generator::TxnGenerator,
    pattern::select_pattern,
    pools::EntityPools,
    report::SimReport,
    rng::{SimRng, StreamLabel},
    transaction::Transaction,
    user::{UserFactory, UserProfile},
};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Cooperative-yield pause after each generated unit. Keeps the
/// driver responsive to stop requests and status polling; not a
/// throughput knob.
const YIELD_INTERVAL: Duration = Duration::from_millis(2);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStatus {
    pub running: bool,
    pub progress: f64,
    pub total_transactions: usize,
}

#[derive(Default)]
struct SessionData {
    users: Vec<UserProfile>,
    transactions: Vec<Transaction>,
}

struct Shared {
    running: AtomicBool,
    cancel: AtomicBool,
    /// Progress percentage, stored as f64 bits. Monotonically
    /// non-decreasing within a run; frozen where cancellation caught it.
    progress: AtomicU64,
    data: Mutex<SessionData>,
}

#[derive(Clone)]
pub struct SimSession {
    pools: Arc<EntityPools>,
    shared: Arc<Shared>,
}

impl SimSession {
    /// Build a session with freshly generated pools. Pools live for
    /// the session lifetime and are shared across every run.
    pub fn new(pool_seed: u64) -> Self {
        let mut rng = SimRng::new(pool_seed, StreamLabel::Pools);
        Self::with_pools(EntityPools::generate(&mut rng))
    }

    pub fn with_pools(pools: EntityPools) -> Self {
        Self {
            pools: Arc::new(pools),
            shared: Arc::new(Shared {
                running: AtomicBool::new(false),
                cancel: AtomicBool::new(false),
                progress: AtomicU64::new(0f64.to_bits()),
                data: Mutex::new(SessionData::default()),
            }),
        }
    }

    pub fn pools(&self) -> &EntityPools {
        &self.pools
    }

    /// Begin a run on a background thread. Fails fast, with no side
    /// effects, if the configuration is invalid or a run is active.
    pub fn start(&self, config: SimulationConfig) -> SimResult<()> {
        config.validate()?;
        self.acquire_run_slot()?;

        let worker = self.clone();
        let spawned = thread::Builder::new()
            .name("fraudsim-driver".into())
            .spawn(move || worker.drive(&config, None));

        if let Err(e) = spawned {
            self.shared.running.store(false, Ordering::SeqCst);
            return Err(SimError::Other(anyhow::Error::new(e).context("spawn driver")));
        }
        Ok(())
    }

    /// Run the driver on the calling thread. Used by the CLI runner
    /// and tests; obeys the same single-run discipline as start().
    pub fn run_blocking(
        &self,
        config: &SimulationConfig,
        progress_callback: Option<&dyn Fn(f64)>,
    ) -> SimResult<()> {
        config.validate()?;
        self.acquire_run_slot()?;
        self.drive(config, progress_callback);
        Ok(())
    }

    /// Request cancellation of the active run. Idempotent; a no-op
    /// when nothing is running.
    pub fn stop(&self) {
        self.shared.cancel.store(true, Ordering::SeqCst);
    }

    pub fn status(&self) -> SessionStatus {
        let total_transactions = self
            .shared
            .data
            .lock()
            .map(|d| d.transactions.len())
            .unwrap_or(0);
        SessionStatus {
            running: self.shared.running.load(Ordering::SeqCst),
            progress: f64::from_bits(self.shared.progress.load(Ordering::SeqCst)),
            total_transactions,
        }
    }

    /// Aggregate the accumulated transactions. Callers guarantee no
    /// run is active; an empty list is an explicit error.
    pub fn report(&self) -> SimResult<SimReport> {
        let data = self.shared.data.lock().expect("session data lock");
        SimReport::generate(&data.transactions)
    }

    /// Discard all users and transactions and reset progress.
    pub fn clear(&self) {
        let mut data = self.shared.data.lock().expect("session data lock");
        data.users.clear();
        data.transactions.clear();
        self.shared.progress.store(0f64.to_bits(), Ordering::SeqCst);
    }

    /// idle -> running, atomically. At most one run per session.
    fn acquire_run_slot(&self) -> SimResult<()> {
        self.shared
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| SimError::AlreadyRunning)?;
        self.shared.cancel.store(false, Ordering::SeqCst);
        self.shared.progress.store(0f64.to_bits(), Ordering::SeqCst);
        Ok(())
    }

    /// The driver. Holds the run slot on entry; always releases it.
    fn drive(&self, config: &SimulationConfig, progress_callback: Option<&dyn Fn(f64)>) {
        log::info!(
            "Starting simulation: {}h x {} tph, fraud_rate {:.2}, seed {}",
            config.duration_hours,
            config.transactions_per_hour,
            config.fraud_rate,
            config.seed
        );

        // Prior run's users and transactions are discarded up front.
        let users = self.build_users(config);
        {
            let mut data = self.shared.data.lock().expect("session data lock");
            data.transactions.clear();
            data.users = users.clone();
        }

        let generator = TxnGenerator::new(&self.pools);
        let mut rng = SimRng::new(config.seed, StreamLabel::Driver);
        let total_units = config.total_units();
        let mut cancelled = false;

        'hours: for hour in 0..config.duration_hours {
            if self.shared.cancel.load(Ordering::SeqCst) {
                cancelled = true;
                break;
            }
            log::debug!("Simulating hour {}/{}", hour + 1, config.duration_hours);

            for unit in 0..config.transactions_per_hour {
                if self.shared.cancel.load(Ordering::SeqCst) {
                    cancelled = true;
                    break 'hours;
                }

                let user = rng.choose(&users);

                if rng.chance(config.fraud_rate) {
                    let pattern = select_pattern(&config.fraud_patterns, &mut rng);
                    let (lo, hi) = pattern.count_range();
                    let count = rng.range_usize(lo, hi);
                    let batch = generator.attack_batch(pattern, user, count, &mut rng);
                    let mut data = self.shared.data.lock().expect("session data lock");
                    data.transactions.extend(batch);
                } else {
                    let txn = generator.normal(user, &mut rng);
                    let mut data = self.shared.data.lock().expect("session data lock");
                    data.transactions.push(txn);
                }

                let units_done =
                    u64::from(hour) * u64::from(config.transactions_per_hour) + u64::from(unit) + 1;
                let pct = (units_done as f64 / total_units as f64 * 100.0).min(100.0);
                self.shared.progress.store(pct.to_bits(), Ordering::SeqCst);
                if let Some(cb) = progress_callback {
                    cb(pct);
                }

                thread::sleep(YIELD_INTERVAL);
            }
        }

        if cancelled {
            // Progress stays frozen at its last value.
            log::info!(
                "Simulation cancelled at {:.1}%",
                f64::from_bits(self.shared.progress.load(Ordering::SeqCst))
            );
        } else {
            self.shared
                .progress
                .store(100f64.to_bits(), Ordering::SeqCst);
            log::info!("Simulation completed");
        }
        self.shared.running.store(false, Ordering::SeqCst);
    }

    fn build_users(&self, config: &SimulationConfig) -> Vec<UserProfile> {
        let factory = UserFactory::new(&self.pools);
        let mut rng = SimRng::new(config.seed, StreamLabel::Users);
        (0..config.user_count())
            .map(|_| factory.generate(&mut rng))
            .collect()
    }
}
