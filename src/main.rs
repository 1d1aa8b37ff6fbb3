//! Bank Simulation CLI
//!
//! Runs randomized deposits and withdrawals across a worker pool, then prints
//! every account's final balance, the number of completed transactions, and
//! the aggregated bank balance.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --accounts 10 --workers 8 --transactions 10000 --quiet
//! cargo run -- --seed 42 --amount-range 1..50 --timeout 2
//! cargo run -- --aggregation sequential --format csv > balances.csv
//! ```
//!
//! Transaction log lines and the report go to stdout; diagnostics go to
//! stderr and are filtered with `RUST_LOG` (default `info`).
//!
//! # Exit Codes
//!
//! - 0: Success (including a timed-out wait)
//! - 1: Error (invalid configuration, pool or I/O failure)

use bank_simulation::cli::{self, CliArgs};
use bank_simulation::{write_report, BankError, Simulation, TransactionLog};
use std::io;
use std::process;
use tracing::info;

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = cli::parse_args();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<(), BankError> {
    let simulation = Simulation::new(args.to_config())?;

    let report = if args.quiet {
        simulation.run(&TransactionLog::disabled())?
    } else {
        let (log, writer) = TransactionLog::spawn(io::stdout())?;
        let report = simulation.run(&log)?;
        // Log lines must be out before the report is printed
        writer.finish()?;
        report
    };

    if report.driver.timed_out {
        info!(
            "{} transactions were abandoned after the timeout",
            report.driver.abandoned
        );
    }

    let mut output = io::stdout();
    write_report(&report, args.format, &mut output)
}
