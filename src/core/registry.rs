//! Fixed account registry
//!
//! This module provides the `AccountRegistry` struct, which maps account
//! identifiers to accounts for concurrent lookups by the worker pool.
//!
//! # Design
//!
//! The registry is built once, sequentially, before any worker starts:
//! identifiers `1..=count` each get one zero-balance account. Afterwards its
//! structure is read-only; no account is added or removed. The accounts
//! themselves stay mutable through their own locks.
//!
//! `DashMap` provides the concurrent lookups. Accounts are stored behind `Arc`
//! so the aggregator can receive an ordered list of handles without copying
//! balances out.

use super::account::Account;
use super::transaction_log::TransactionLog;
use crate::types::{AccountBalance, AccountId, BankError, Outcome, TransactionRecord};
use dashmap::DashMap;
use std::sync::Arc;

/// Mapping from account identifier to account
#[derive(Debug)]
pub struct AccountRegistry {
    /// Concurrent map of identifiers to shared accounts
    accounts: DashMap<AccountId, Arc<Account>>,
}

impl AccountRegistry {
    /// Create `count` accounts with identifiers `1..=count`
    ///
    /// Every account reports its operations to `log`.
    pub fn new(count: u32, log: &TransactionLog) -> Self {
        let accounts = DashMap::with_capacity(count as usize);
        for id in 1..=count {
            accounts.insert(id, Arc::new(Account::new(id, log.clone())));
        }
        Self { accounts }
    }

    /// Look up an account
    ///
    /// Returns a shared handle; callers should not keep it beyond the
    /// operation they need it for.
    pub fn get(&self, id: AccountId) -> Option<Arc<Account>> {
        self.accounts.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    /// Apply a transaction record to the account it targets
    ///
    /// # Errors
    ///
    /// * `BankError::UnknownAccount` if no account has the record's id
    /// * Any error returned by [`Account::apply`]
    pub fn apply(&self, record: &TransactionRecord) -> Result<Outcome, BankError> {
        // Clone the handle out so the map shard is not locked during the mutation
        let account = self
            .get(record.account)
            .ok_or_else(|| BankError::unknown_account(record.account))?;
        account.apply(record)
    }

    /// All accounts ordered by identifier
    pub fn accounts(&self) -> Vec<Arc<Account>> {
        let mut accounts: Vec<Arc<Account>> = self
            .accounts
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        accounts.sort_by_key(|account| account.id());
        accounts
    }

    /// Balances of all accounts ordered by identifier
    ///
    /// Each balance is read independently; under concurrent mutation the
    /// snapshot is not a consistent cut across accounts.
    pub fn snapshot(&self) -> Vec<AccountBalance> {
        self.accounts()
            .iter()
            .map(|account| account.snapshot())
            .collect()
    }

    /// Number of accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the registry holds no accounts
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
