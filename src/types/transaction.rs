//! Transaction-related types for the bank simulation
//!
//! This module defines the identifiers, amounts, transaction records and
//! mutation outcomes shared by accounts, the registry and the driver.

use std::fmt;

/// Account identifier
///
/// Assigned sequentially from 1 when the registry is built.
pub type AccountId = u32;

/// Account balance
///
/// Signed so that arithmetic on it reads naturally, but a balance never
/// drops below zero.
pub type Balance = i64;

/// Transaction amount
///
/// Deposits and withdrawals only accept strictly positive amounts.
pub type Amount = i64;

/// Transaction kinds supported by an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    /// Credit funds to an account
    Deposit,

    /// Debit funds from an account
    ///
    /// Only applied when the balance covers the requested amount.
    Withdraw,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Deposit => f.write_str("deposit"),
            TransactionKind::Withdraw => f.write_str("withdraw"),
        }
    }
}

/// A single transaction against one account
///
/// Records are ephemeral: each lives for the duration of one worker task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Deposit or withdraw
    pub kind: TransactionKind,

    /// Target account
    pub account: AccountId,

    /// Amount to move; must be positive
    pub amount: Amount,
}

impl TransactionRecord {
    /// Create a deposit record
    pub fn deposit(account: AccountId, amount: Amount) -> Self {
        Self {
            kind: TransactionKind::Deposit,
            account,
            amount,
        }
    }

    /// Create a withdraw record
    pub fn withdraw(account: AccountId, amount: Amount) -> Self {
        Self {
            kind: TransactionKind::Withdraw,
            account,
            amount,
        }
    }
}

/// Result of a completed deposit or withdraw
///
/// A withdrawal against an insufficient balance is an expected business
/// outcome rather than an error, so it is reported here instead of through
/// [`BankError`](crate::types::BankError).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The balance was updated; carries the balance after the update
    Applied {
        /// Balance once the mutation committed
        balance: Balance,
    },

    /// The withdrawal was skipped and the balance left untouched
    InsufficientFunds {
        /// Balance at the time of the attempt
        balance: Balance,
        /// Amount that was requested
        requested: Amount,
    },
}

impl Outcome {
    /// Whether the mutation changed the balance
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied { .. })
    }

    /// Balance observed inside the critical section
    pub fn balance(&self) -> Balance {
        match *self {
            Outcome::Applied { balance } | Outcome::InsufficientFunds { balance, .. } => balance,
        }
    }
}

/// Point-in-time balance of one account, used for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct AccountBalance {
    /// Account identifier
    pub account: AccountId,

    /// Balance when the snapshot was taken
    pub balance: Balance,
}
