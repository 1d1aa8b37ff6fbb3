//! Randomized workload generation
//!
//! `TransactionGenerator` draws transaction records from a `StdRng`: a target
//! account uniformly from `1..=accounts`, an amount uniformly from the
//! configured half-open range, and a kind with equal probability. Seeding it
//! replays the exact same sequence of records.

use crate::types::{AccountId, Amount, BankError, TransactionKind, TransactionRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;

/// Seedable source of random transaction records
#[derive(Debug, Clone)]
pub struct TransactionGenerator {
    rng: StdRng,
    accounts: AccountId,
    amounts: Range<Amount>,
}

impl TransactionGenerator {
    /// Create a generator
    ///
    /// With `seed` set the sequence is reproducible; otherwise the generator
    /// is seeded from system entropy.
    ///
    /// # Errors
    ///
    /// Returns `BankError::InvalidConfig` if `accounts` is zero, the amount
    /// range is empty, or its lower bound is not positive.
    pub fn new(
        accounts: AccountId,
        amounts: Range<Amount>,
        seed: Option<u64>,
    ) -> Result<Self, BankError> {
        if accounts == 0 {
            return Err(BankError::invalid_config(
                "cannot generate transactions without accounts",
            ));
        }
        if amounts.is_empty() {
            return Err(BankError::invalid_config(format!(
                "amount range {}..{} is empty",
                amounts.start, amounts.end
            )));
        }
        if amounts.start <= 0 {
            return Err(BankError::invalid_config(format!(
                "amount range must start above zero, got {}",
                amounts.start
            )));
        }

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            rng,
            accounts,
            amounts,
        })
    }

    /// Draw the next record
    pub fn next_record(&mut self) -> TransactionRecord {
        let account = self.rng.gen_range(1..=self.accounts);
        let amount = self.rng.gen_range(self.amounts.clone());
        let kind = if self.rng.gen_bool(0.5) {
            TransactionKind::Deposit
        } else {
            TransactionKind::Withdraw
        };

        TransactionRecord {
            kind,
            account,
            amount,
        }
    }

    /// Draw `count` records
    pub fn records(&mut self, count: usize) -> Vec<TransactionRecord> {
        self.by_ref().take(count).collect()
    }
}

impl Iterator for TransactionGenerator {
    type Item = TransactionRecord;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_record())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_same_seed_same_records() {
        let mut first = TransactionGenerator::new(3, 10..100, Some(42)).unwrap();
        let mut second = TransactionGenerator::new(3, 10..100, Some(42)).unwrap();

        assert_eq!(first.records(100), second.records(100));
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut first = TransactionGenerator::new(3, 10..100, Some(1)).unwrap();
        let mut second = TransactionGenerator::new(3, 10..100, Some(2)).unwrap();

        assert_ne!(first.records(100), second.records(100));
    }

    #[test]
    fn test_records_stay_in_bounds() {
        let mut generator = TransactionGenerator::new(5, 10..100, Some(7)).unwrap();

        for record in generator.records(1_000) {
            assert!((1..=5).contains(&record.account));
            assert!((10..100).contains(&record.amount));
        }
    }

    #[test]
    fn test_all_accounts_and_kinds_drawn() {
        let mut generator = TransactionGenerator::new(3, 1..2, Some(11)).unwrap();
        let records = generator.records(500);

        for id in 1..=3 {
            assert!(records.iter().any(|r| r.account == id));
        }
        assert!(records.iter().any(|r| r.kind == TransactionKind::Deposit));
        assert!(records.iter().any(|r| r.kind == TransactionKind::Withdraw));
        assert!(records.iter().all(|r| r.amount == 1));
    }

    #[test]
    fn test_unseeded_generator_works() {
        let mut generator = TransactionGenerator::new(1, 10..11, None).unwrap();
        let record = generator.next_record();

        assert_eq!(record.account, 1);
        assert_eq!(record.amount, 10);
    }

    #[rstest]
    #[case::no_accounts(0, 10..100)]
    #[case::empty_range(3, 10..10)]
    #[case::inverted_range(3, 50..10)]
    #[case::zero_start(3, 0..10)]
    #[case::negative_start(3, -5..10)]
    fn test_invalid_parameters(#[case] accounts: AccountId, #[case] amounts: Range<Amount>) {
        let result = TransactionGenerator::new(accounts, amounts, Some(1));
        assert!(matches!(result, Err(BankError::InvalidConfig { .. })));
    }
}
