//! Lock-guarded account
//!
//! An [`Account`] owns its balance behind a `parking_lot::Mutex`. Every
//! mutation runs as one critical section: validate, lock, update, enqueue a log
//! entry, unlock. The guard is released on every path, including errors.
//!
//! # Thread Safety
//!
//! Only one mutator per account holds the lock at a time. Different accounts
//! have independent locks and never contend with each other.

use super::traits::BalanceSource;
use super::transaction_log::{LogEvent, TransactionLog};
use crate::types::{
    AccountBalance, AccountId, Amount, Balance, BankError, Outcome, TransactionKind,
    TransactionRecord,
};
use parking_lot::Mutex;

/// A single account with a lock-protected balance
#[derive(Debug)]
pub struct Account {
    /// Immutable identifier
    id: AccountId,

    /// Current balance, mutated only while the lock is held
    pub(crate) balance: Mutex<Balance>,

    /// Where deposit and withdraw events are reported
    log: TransactionLog,
}

impl Account {
    /// Create an account with a zero balance
    pub fn new(id: AccountId, log: TransactionLog) -> Self {
        Self {
            id,
            balance: Mutex::new(0),
            log,
        }
    }

    /// Create an account with an opening balance
    ///
    /// # Errors
    ///
    /// * `BankError::InvalidAmount` if `balance` is negative
    pub fn with_balance(
        id: AccountId,
        balance: Balance,
        log: TransactionLog,
    ) -> Result<Self, BankError> {
        if balance < 0 {
            return Err(BankError::invalid_amount(id, balance));
        }
        Ok(Self {
            id,
            balance: Mutex::new(balance),
            log,
        })
    }

    /// Account identifier
    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Add `amount` to the balance
    ///
    /// # Errors
    ///
    /// * `BankError::InvalidAmount` if `amount <= 0`, raised before locking
    /// * `BankError::BalanceOverflow` if the new balance would not fit; the
    ///   balance is left unchanged
    pub fn deposit(&self, amount: Amount) -> Result<Outcome, BankError> {
        self.validate(amount)?;

        let mut balance = self.balance.lock();
        let updated = balance
            .checked_add(amount)
            .ok_or_else(|| BankError::balance_overflow("deposit", self.id))?;
        *balance = updated;
        self.log.record(self.id, LogEvent::Deposited(amount));

        Ok(Outcome::Applied { balance: updated })
    }

    /// Subtract `amount` from the balance if it is covered
    ///
    /// When the balance is lower than `amount` nothing changes and
    /// `Outcome::InsufficientFunds` is returned. Both paths are logged.
    ///
    /// # Errors
    ///
    /// * `BankError::InvalidAmount` if `amount <= 0`, raised before locking
    pub fn withdraw(&self, amount: Amount) -> Result<Outcome, BankError> {
        self.validate(amount)?;

        let mut balance = self.balance.lock();
        if *balance >= amount {
            *balance -= amount;
            self.log.record(self.id, LogEvent::Withdrew(amount));
            Ok(Outcome::Applied { balance: *balance })
        } else {
            self.log.record(self.id, LogEvent::WithdrawFailed(amount));
            Ok(Outcome::InsufficientFunds {
                balance: *balance,
                requested: amount,
            })
        }
    }

    /// Apply a transaction record to this account
    ///
    /// The record's account id is not checked against [`Account::id`]; lookup is
    /// the registry's job.
    pub fn apply(&self, record: &TransactionRecord) -> Result<Outcome, BankError> {
        match record.kind {
            TransactionKind::Deposit => self.deposit(record.amount),
            TransactionKind::Withdraw => self.withdraw(record.amount),
        }
    }

    /// Current balance
    ///
    /// The lock is held only for the read. The value is whatever the last
    /// completed mutation left, and may be stale as soon as it is returned.
    pub fn balance(&self) -> Balance {
        *self.balance.lock()
    }

    /// Identifier and current balance
    pub fn snapshot(&self) -> AccountBalance {
        AccountBalance {
            account: self.id,
            balance: self.balance(),
        }
    }

    fn validate(&self, amount: Amount) -> Result<(), BankError> {
        if amount <= 0 {
            return Err(BankError::invalid_amount(self.id, amount));
        }
        Ok(())
    }
}

impl BalanceSource for Account {
    fn balance(&self) -> Balance {
        Account::balance(self)
    }
}
