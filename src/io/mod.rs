//! I/O module
//!
//! Handles report output.
//!
//! # Components
//!
//! - `report` - Text and CSV rendering of the final simulation report

pub mod report;

pub use report::{write_balances_csv, write_report, write_report_text};
