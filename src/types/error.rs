//! Error types for the bank simulation
//!
//! This module defines all error types that can occur while building or
//! running a simulation. Errors are designed to be descriptive and
//! user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **Contract Violations**: Non-positive amounts, unknown accounts
//! - **Arithmetic Errors**: Balance overflow on deposit
//! - **Configuration Errors**: Invalid simulation parameters
//! - **Runtime Errors**: Worker or aggregation pools that cannot be built
//! - **I/O Errors**: Report or transaction log output failures
//!
//! Insufficient funds is deliberately absent: a withdrawal the balance cannot
//! cover is reported as [`Outcome::InsufficientFunds`](crate::types::Outcome).

use super::transaction::{AccountId, Amount};
use thiserror::Error;

/// Main error type for the bank simulation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankError {
    /// Deposit or withdraw called with a non-positive amount
    ///
    /// Raised before the account lock is acquired; the balance is untouched.
    #[error("Invalid amount {amount} for account {account}: amounts must be positive")]
    InvalidAmount {
        /// Target account
        account: AccountId,
        /// The rejected amount
        amount: Amount,
    },

    /// No account with this identifier exists in the registry
    #[error("Account {account} not found")]
    UnknownAccount {
        /// The identifier that was looked up
        account: AccountId,
    },

    /// Applying the operation would overflow the balance
    ///
    /// The transaction is rejected to maintain account integrity.
    #[error("Balance overflow in {operation} for account {account}")]
    BalanceOverflow {
        /// Operation that would overflow
        operation: String,
        /// Target account
        account: AccountId,
    },

    /// Simulation parameters are inconsistent
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the problem
        message: String,
    },

    /// A worker or aggregation pool could not be started
    #[error("Runtime error: {message}")]
    Runtime {
        /// Description of the failure
        message: String,
    },

    /// I/O error while writing output
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },
}

impl From<std::io::Error> for BankError {
    fn from(error: std::io::Error) -> Self {
        BankError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for BankError {
    fn from(error: csv::Error) -> Self {
        BankError::Io {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl BankError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(account: AccountId, amount: Amount) -> Self {
        BankError::InvalidAmount { account, amount }
    }

    /// Create an UnknownAccount error
    pub fn unknown_account(account: AccountId) -> Self {
        BankError::UnknownAccount { account }
    }

    /// Create a BalanceOverflow error
    pub fn balance_overflow(operation: &str, account: AccountId) -> Self {
        BankError::BalanceOverflow {
            operation: operation.to_string(),
            account,
        }
    }

    /// Create an InvalidConfig error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        BankError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a Runtime error
    pub fn runtime(message: impl Into<String>) -> Self {
        BankError::Runtime {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::invalid_amount(
        BankError::InvalidAmount { account: 1, amount: -5 },
        "Invalid amount -5 for account 1: amounts must be positive"
    )]
    #[case::unknown_account(
        BankError::UnknownAccount { account: 42 },
        "Account 42 not found"
    )]
    #[case::balance_overflow(
        BankError::BalanceOverflow { operation: "deposit".to_string(), account: 3 },
        "Balance overflow in deposit for account 3"
    )]
    #[case::invalid_config(
        BankError::InvalidConfig { message: "accounts must be at least 1".to_string() },
        "Invalid configuration: accounts must be at least 1"
    )]
    #[case::runtime(
        BankError::Runtime { message: "no threads".to_string() },
        "Runtime error: no threads"
    )]
    #[case::io(
        BankError::Io { message: "Broken pipe".to_string() },
        "I/O error: Broken pipe"
    )]
    fn test_error_display(#[case] error: BankError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::invalid_amount(
        BankError::invalid_amount(1, 0),
        BankError::InvalidAmount { account: 1, amount: 0 }
    )]
    #[case::unknown_account(
        BankError::unknown_account(9),
        BankError::UnknownAccount { account: 9 }
    )]
    #[case::balance_overflow(
        BankError::balance_overflow("deposit", 2),
        BankError::BalanceOverflow { operation: "deposit".to_string(), account: 2 }
    )]
    #[case::invalid_config(
        BankError::invalid_config("bad"),
        BankError::InvalidConfig { message: "bad".to_string() }
    )]
    fn test_helper_functions(#[case] result: BankError, #[case] expected: BankError) {
        assert_eq!(result, expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "Broken pipe");
        let error: BankError = io_error.into();
        assert!(matches!(error, BankError::Io { .. }));
        assert_eq!(error.to_string(), "I/O error: Broken pipe");
    }
}
