//! Core traits shared by accounts and aggregation
//!
//! This module defines the read-only seam the aggregators work against, so
//! they can sum accounts directly or through shared handles.

use crate::types::Balance;
use std::sync::Arc;

/// Anything that can report a balance without mutating it
pub trait BalanceSource {
    /// Current balance
    fn balance(&self) -> Balance;
}

impl<T: BalanceSource + ?Sized> BalanceSource for Arc<T> {
    fn balance(&self) -> Balance {
        (**self).balance()
    }
}

impl<T: BalanceSource + ?Sized> BalanceSource for &T {
    fn balance(&self) -> Balance {
        (**self).balance()
    }
}
