//! Sequential balance aggregation
//!
//! A single-threaded fold over the account list. It is the reference the
//! fork/join aggregation is checked against, and the cheaper choice for small
//! registries.

use super::AggregationStrategy;
use crate::core::{Account, BalanceSource};
use std::sync::Arc;

/// Sums balances one after another on the calling thread
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialAggregation;

impl SequentialAggregation {
    /// Sum any balance sources
    pub fn sum<B: BalanceSource>(&self, accounts: &[B]) -> i128 {
        accounts
            .iter()
            .map(|account| i128::from(account.balance()))
            .sum()
    }
}

impl AggregationStrategy for SequentialAggregation {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn total(&self, accounts: &[Arc<Account>]) -> i128 {
        self.sum(accounts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TransactionLog;

    #[test]
    fn test_sums_account_balances() {
        let accounts: Vec<Arc<Account>> = [50, 30, 0]
            .into_iter()
            .zip(1..)
            .map(|(balance, id)| {
                Arc::new(Account::with_balance(id, balance, TransactionLog::disabled()).unwrap())
            })
            .collect();

        assert_eq!(SequentialAggregation.total(&accounts), 80);
    }

    #[test]
    fn test_empty() {
        let accounts: Vec<Arc<Account>> = Vec::new();
        assert_eq!(SequentialAggregation.total(&accounts), 0);
    }
}
