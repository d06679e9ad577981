//! fraudsim-core: a labeled synthetic payment-fraud stream generator.
//!
//! Builds closed pools of synthetic entities (devices, locations,
//! merchants), mints per-run user profiles, and interleaves normal
//! activity with named fraud-attack batches over simulated time. The
//! result is an in-process transaction list plus an aggregated report
//! for downstream fraud-detection tooling to chew on.
//!
//! All randomness is deterministic per seed; all state is ephemeral.

pub mod config;
pub mod error;
pub mod faker;
pub mod generator;
pub mod pattern;
pub mod pools;
pub mod report;
pub mod rng;
pub mod session;
pub mod transaction;
pub mod types;
pub mod user;

pub use config::SimulationConfig;
pub use error::{SimError, SimResult};
pub use pattern::{FraudPattern, PatternName};
pub use report::SimReport;
pub use session::{SessionStatus, SimSession};
pub use transaction::Transaction;
