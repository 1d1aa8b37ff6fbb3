//! Bank Simulation Library
//! # Overview
//!
//! This library simulates concurrent deposits and withdrawals against a set of
//! lock-guarded bank accounts, then sums the final balances with a fork/join
//! parallel reduction.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (identifiers, records, outcomes, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`config`] - Simulation configuration
//! - [`core`] - Concurrent components:
//!   - [`core::account`] - Per-account mutual exclusion
//!   - [`core::registry`] - Fixed account registry
//!   - [`core::driver`] - Fixed worker pool with a bounded wait
//!   - [`core::transaction_log`] - Serialized transaction log
//! - [`strategy`] - Balance aggregation (fork/join or sequential)
//! - [`io`] - Report output
//!
//! # Data Flow
//!
//! ```text
//! TransactionGenerator ──► TransactionDriver ──► AccountRegistry ──► Account
//!                                                       │
//!                           (pool shut down)            ▼
//!                                 AggregationStrategy ◄── ordered accounts
//! ```
//!
//! # Guarantees
//!
//! - No lost updates: every balance is produced by a completed deposit or
//!   withdraw
//! - Balances never go negative; an uncovered withdrawal is an
//!   [`Outcome::InsufficientFunds`], not an error
//! - The completed counter equals the number of tasks whose mutation ran
//! - The parallel total equals the sequential sum of the balances

// Module declarations
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use config::SimulationConfig;
pub use crate::core::{
    Account, AccountRegistry, Simulation, SimulationReport, TransactionDriver,
    TransactionGenerator, TransactionLog,
};
pub use io::write_report;
pub use types::{
    AccountBalance, AccountId, Amount, Balance, BankError, Outcome, TransactionKind,
    TransactionRecord,
};
