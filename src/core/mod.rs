//! Core business logic module
//!
//! This module contains the concurrent account components:
//! - `traits` - Read-only balance seam used by aggregation
//! - `account` - Lock-guarded account with deposit and withdraw
//! - `transaction_log` - Channel-serialized, human-readable transaction log
//! - `registry` - Fixed, concurrently readable account registry
//! - `generator` - Seedable random workload
//! - `driver` - Fixed worker pool with a bounded wait
//! - `simulation` - Orchestration of a complete run

pub mod account;
pub mod driver;
pub mod generator;
pub mod registry;
pub mod simulation;
pub mod traits;
pub mod transaction_log;

pub use account::Account;
pub use driver::{DriverConfig, DriverReport, TransactionDriver};
pub use generator::TransactionGenerator;
pub use registry::AccountRegistry;
pub use simulation::{Simulation, SimulationReport};
pub use traits::BalanceSource;
pub use transaction_log::{LogEntry, LogEvent, LogWriter, TransactionLog};
