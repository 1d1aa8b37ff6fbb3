//! Fork/join balance aggregation
//!
//! This module provides a divide-and-conquer parallel sum over an ordered list
//! of accounts, executed on a dedicated rayon work-stealing pool.
//!
//! # Algorithm
//!
//! ```text
//! sum(range):
//!     len(range) <= threshold  ──► sequential fold (len 0 gives 0)
//!     otherwise                ──► split at midpoint
//!                                  right half: computed inline
//!                                  left half:  forked, stealable by idle workers
//!                                  join, return left + right
//! ```
//!
//! With `threshold >= 1`, any range that splits has at least two elements, so
//! both halves are non-empty and strictly shorter: the recursion terminates.
//!
//! The aggregation only reads balances. Combining partial sums is plain
//! addition, so no lock is needed at join time.

use super::AggregationStrategy;
use crate::core::{Account, BalanceSource};
use crate::types::BankError;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::Arc;

/// Default range length at or below which a task sums sequentially
pub const DEFAULT_THRESHOLD: usize = 2;

/// Sum balances by recursive splitting
///
/// Runs on whatever rayon pool is current (the global one if called outside
/// [`ThreadPool::install`]).
///
/// # Panics
///
/// Panics if `threshold` is zero.
pub(crate) fn fork_join_sum<B>(accounts: &[B], threshold: usize) -> i128
where
    B: BalanceSource + Sync,
{
    assert!(threshold >= 1, "threshold must be at least 1");

    if accounts.len() <= threshold {
        return accounts
            .iter()
            .map(|account| i128::from(account.balance()))
            .sum();
    }

    let (left, right) = accounts.split_at(accounts.len() / 2);

    // rayon::join runs the first closure on this thread and exposes the second
    // for stealing.
    let (right_sum, left_sum) = rayon::join(
        || fork_join_sum(right, threshold),
        || fork_join_sum(left, threshold),
    );

    left_sum + right_sum
}

/// Fork/join aggregation on a dedicated work-stealing pool
#[derive(Debug)]
pub struct ForkJoinAggregation {
    pool: ThreadPool,
    threshold: usize,
}

impl ForkJoinAggregation {
    /// Create the aggregator and its pool
    ///
    /// `threads` of `None` lets rayon pick (one per CPU core).
    ///
    /// # Errors
    ///
    /// * `BankError::InvalidConfig` if `threshold` is zero
    /// * `BankError::Runtime` if the pool cannot be built
    pub fn new(threshold: usize, threads: Option<usize>) -> Result<Self, BankError> {
        if threshold == 0 {
            return Err(BankError::invalid_config(
                "aggregation threshold must be at least 1",
            ));
        }

        let mut builder =
            ThreadPoolBuilder::new().thread_name(|index| format!("aggregation-{}", index));
        if let Some(threads) = threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder
            .build()
            .map_err(|e| BankError::runtime(format!("Failed to create aggregation pool: {}", e)))?;

        Ok(Self { pool, threshold })
    }

    /// Sum any balance sources on this aggregator's pool
    pub fn sum<B>(&self, accounts: &[B]) -> i128
    where
        B: BalanceSource + Sync,
    {
        self.pool
            .install(|| fork_join_sum(accounts, self.threshold))
    }
}

impl AggregationStrategy for ForkJoinAggregation {
    fn name(&self) -> &'static str {
        "fork-join"
    }

    fn total(&self, accounts: &[Arc<Account>]) -> i128 {
        self.sum(accounts)
    }
}
