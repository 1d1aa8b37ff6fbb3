//! Simulation configuration
//!
//! `SimulationConfig` gathers every knob of a run. Its defaults reproduce the
//! classic demo: 3 accounts, 5 workers, 25 transactions with amounts in
//! `10..100`, a 5 second bounded wait, and a fork/join split threshold of 2.

use crate::cli::AggregationType;
use crate::core::DriverConfig;
use crate::strategy::DEFAULT_THRESHOLD;
use crate::types::{AccountId, Amount, BankError};
use std::ops::Range;
use std::time::Duration;

/// Parameters of one simulation run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Number of accounts, identified `1..=accounts`
    pub accounts: AccountId,
    /// Worker pool size
    pub workers: usize,
    /// Number of randomized transactions
    pub transactions: usize,
    /// Half-open range amounts are drawn from
    pub amount_range: Range<Amount>,
    /// Bounded wait for the worker pool
    pub timeout: Duration,
    /// Seed for the workload; `None` draws from system entropy
    pub seed: Option<u64>,
    /// Fork/join split threshold
    pub threshold: usize,
    /// How final balances are summed
    pub aggregation: AggregationType,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            accounts: 3,
            workers: 5,
            transactions: 25,
            amount_range: 10..100,
            timeout: Duration::from_secs(5),
            seed: None,
            threshold: DEFAULT_THRESHOLD,
            aggregation: AggregationType::ForkJoin,
        }
    }
}

impl SimulationConfig {
    /// Check the configuration for values no run can use
    ///
    /// # Errors
    ///
    /// Returns `BankError::InvalidConfig` when transactions are requested
    /// without accounts, the amount range is empty or not positive, or the
    /// threshold is zero.
    pub fn validate(&self) -> Result<(), BankError> {
        if self.accounts == 0 && self.transactions > 0 {
            return Err(BankError::invalid_config(
                "transactions require at least one account",
            ));
        }
        if self.amount_range.is_empty() {
            return Err(BankError::invalid_config(format!(
                "amount range {}..{} is empty",
                self.amount_range.start, self.amount_range.end
            )));
        }
        if self.amount_range.start <= 0 {
            return Err(BankError::invalid_config(format!(
                "amount range must start above zero, got {}",
                self.amount_range.start
            )));
        }
        if self.threshold == 0 {
            return Err(BankError::invalid_config(
                "aggregation threshold must be at least 1",
            ));
        }
        Ok(())
    }

    /// Worker pool settings derived from this configuration
    pub fn driver_config(&self) -> DriverConfig {
        DriverConfig::new(self.workers, self.timeout)
    }
}
