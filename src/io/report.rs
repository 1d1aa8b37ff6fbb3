//! Final report output
//!
//! Renders a [`SimulationReport`] either as the human-readable summary or as a
//! CSV listing of balances.
//!
//! Text layout:
//!
//! ```text
//!
//! === Final Balances ===
//! Account 1: $40
//! Account 2: $30
//! Account 3: $0
//! Total Transactions: 4
//!
//! Total bank balance: $70
//! ```
//!
//! CSV layout has the columns `account,balance`, one row per account in id
//! order. Totals are not part of the CSV.

use crate::cli::ReportFormat;
use crate::core::SimulationReport;
use crate::types::BankError;
use std::io::Write;

/// Write the report in the requested format
pub fn write_report(
    report: &SimulationReport,
    format: ReportFormat,
    output: &mut dyn Write,
) -> Result<(), BankError> {
    match format {
        ReportFormat::Text => write_report_text(report, output),
        ReportFormat::Csv => write_balances_csv(report, output),
    }
}

/// Write the human-readable summary
pub fn write_report_text(
    report: &SimulationReport,
    output: &mut dyn Write,
) -> Result<(), BankError> {
    writeln!(output)?;
    writeln!(output, "=== Final Balances ===")?;
    for balance in &report.balances {
        writeln!(output, "Account {}: ${}", balance.account, balance.balance)?;
    }
    writeln!(output, "Total Transactions: {}", report.total_transactions())?;
    if report.driver.timed_out {
        writeln!(
            output,
            "Abandoned Transactions: {}",
            report.driver.abandoned
        )?;
    }
    writeln!(output)?;
    writeln!(output, "Total bank balance: ${}", report.total_balance)?;
    output.flush()?;
    Ok(())
}

/// Write balances as CSV
pub fn write_balances_csv(
    report: &SimulationReport,
    output: &mut dyn Write,
) -> Result<(), BankError> {
    let mut writer = csv::Writer::from_writer(output);

    for balance in &report.balances {
        writer.serialize(balance)?;
    }
    // An empty report still gets its header
    if report.balances.is_empty() {
        writer.write_record(["account", "balance"])?;
    }

    writer.flush()?;
    Ok(())
}
