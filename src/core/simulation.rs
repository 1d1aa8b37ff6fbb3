//! Simulation orchestration
//!
//! `Simulation` wires the components together in a fixed order:
//!
//! 1. build the account registry
//! 2. run the randomized transactions on the worker pool (bounded wait)
//! 3. snapshot the final balances and the completed count
//! 4. sum the balances with the configured aggregation strategy
//!
//! The worker pool is shut down before aggregation starts. After a timeout,
//! tasks that were already inside a mutation are no longer waited upon and may
//! still commit while the balances are read; the report then reflects the
//! state at the time of the read.

use super::driver::{DriverReport, TransactionDriver};
use super::generator::TransactionGenerator;
use super::registry::AccountRegistry;
use super::transaction_log::TransactionLog;
use crate::config::SimulationConfig;
use crate::strategy::create_strategy;
use crate::types::{AccountBalance, BankError, TransactionRecord};
use std::sync::Arc;
use tracing::info;

/// Everything a run produced
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationReport {
    /// Final balances ordered by account id
    pub balances: Vec<AccountBalance>,
    /// Worker pool statistics
    pub driver: DriverReport,
    /// Aggregated balance of all accounts
    pub total_balance: i128,
}

impl SimulationReport {
    /// Transactions whose mutation ran to completion
    pub fn total_transactions(&self) -> usize {
        self.driver.completed
    }
}

/// A configured simulation
#[derive(Clone, Debug)]
pub struct Simulation {
    config: SimulationConfig,
}

impl Simulation {
    /// Validate `config` and build a simulation from it
    pub fn new(config: SimulationConfig) -> Result<Self, BankError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run the randomized workload
    pub fn run(&self, log: &TransactionLog) -> Result<SimulationReport, BankError> {
        let records = if self.config.transactions == 0 {
            Vec::new()
        } else {
            TransactionGenerator::new(
                self.config.accounts,
                self.config.amount_range.clone(),
                self.config.seed,
            )?
            .records(self.config.transactions)
        };

        self.run_records(records, log)
    }

    /// Run an explicit workload instead of a generated one
    pub fn run_records(
        &self,
        records: Vec<TransactionRecord>,
        log: &TransactionLog,
    ) -> Result<SimulationReport, BankError> {
        let strategy = create_strategy(self.config.aggregation, self.config.threshold)?;

        let registry = Arc::new(AccountRegistry::new(self.config.accounts, log));
        info!("Initialized {} accounts", registry.len());

        let driver = TransactionDriver::new(self.config.driver_config());
        let driver_report = driver.run_records(Arc::clone(&registry), records)?;

        let balances = registry.snapshot();
        let total_balance = strategy.total(&registry.accounts());
        info!(
            "Aggregated {} balances with {} strategy (threshold {}): {}",
            balances.len(),
            strategy.name(),
            self.config.threshold,
            total_balance
        );

        Ok(SimulationReport {
            balances,
            driver: driver_report,
            total_balance,
        })
    }
}
