//! Aggregation strategy module
//!
//! This module defines the Strategy pattern for summing account balances once
//! the transaction driver has quiesced. The fork/join aggregation is the
//! default; the sequential one is kept as a baseline and can be selected at
//! runtime.

use crate::cli::AggregationType;
use crate::core::Account;
use crate::types::BankError;
use std::sync::Arc;

pub mod fork_join;
pub mod sequential;

pub use fork_join::{ForkJoinAggregation, DEFAULT_THRESHOLD};
pub use sequential::SequentialAggregation;

/// Strategy for summing the balances of an ordered account list
///
/// Implementations must be read-only: they may call balance reads but never
/// mutate an account. Called twice without intervening mutation, they return
/// the same total.
pub trait AggregationStrategy: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Sum of all balances
    fn total(&self, accounts: &[Arc<Account>]) -> i128;
}

/// Create an aggregation strategy
///
/// # Arguments
///
/// * `aggregation_type` - Which strategy to build
/// * `threshold` - Split threshold for fork/join (ignored for sequential)
///
/// # Errors
///
/// Returns an error if the fork/join pool cannot be built or the threshold
/// is zero.
pub fn create_strategy(
    aggregation_type: AggregationType,
    threshold: usize,
) -> Result<Box<dyn AggregationStrategy>, BankError> {
    match aggregation_type {
        AggregationType::Sequential => Ok(Box::new(SequentialAggregation)),
        AggregationType::ForkJoin => Ok(Box::new(ForkJoinAggregation::new(threshold, None)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::sequential(AggregationType::Sequential, "sequential")]
    #[case::fork_join(AggregationType::ForkJoin, "fork-join")]
    fn test_create_strategy(#[case] aggregation_type: AggregationType, #[case] name: &str) {
        let strategy = create_strategy(aggregation_type, DEFAULT_THRESHOLD).unwrap();
        assert_eq!(strategy.name(), name);
    }

    #[test]
    fn test_fork_join_zero_threshold_is_an_error() {
        assert!(create_strategy(AggregationType::ForkJoin, 0).is_err());
    }
}
