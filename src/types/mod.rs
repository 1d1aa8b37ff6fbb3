//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `transaction`: Identifiers, transaction records and mutation outcomes
//! - `error`: Error types for the bank simulation

pub mod error;
pub mod transaction;

pub use error::BankError;
pub use transaction::{
    AccountBalance, AccountId, Amount, Balance, Outcome, TransactionKind, TransactionRecord,
};
