use crate::config::SimulationConfig;
use crate::types::{AccountId, Amount};
use clap::{Parser, ValueEnum};
use std::ops::Range;
use std::time::Duration;

/// Simulate concurrent deposits and withdrawals against a set of bank accounts
#[derive(Parser, Debug)]
#[command(name = "bank-simulation")]
#[command(
    about = "Simulate concurrent deposits and withdrawals, then sum the balances in parallel",
    long_about = None
)]
pub struct CliArgs {
    /// Number of accounts to create
    #[arg(long = "accounts", value_name = "N", default_value_t = 3)]
    pub accounts: AccountId,

    /// Number of worker threads executing transactions
    #[arg(
        long = "workers",
        value_name = "P",
        default_value_t = 5,
        help = "Worker pool size (0 uses the number of CPU cores)"
    )]
    pub workers: usize,

    /// Number of randomized transactions to run
    #[arg(long = "transactions", value_name = "T", default_value_t = 25)]
    pub transactions: usize,

    /// Half-open range transaction amounts are drawn from
    #[arg(
        long = "amount-range",
        value_name = "LO..HI",
        default_value = "10..100",
        value_parser = parse_amount_range,
        help = "Half-open amount range, e.g. 10..100"
    )]
    pub amount_range: Range<Amount>,

    /// Seconds to wait for the worker pool before abandoning unstarted tasks
    #[arg(long = "timeout", value_name = "SECONDS", default_value_t = 5)]
    pub timeout: u64,

    /// Seed for the random workload
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,

    /// Range length at or below which the aggregation sums sequentially
    #[arg(long = "threshold", value_name = "K", default_value_t = 2)]
    pub threshold: usize,

    /// Aggregation strategy for the final balance
    #[arg(
        long = "aggregation",
        value_name = "STRATEGY",
        default_value = "fork-join",
        help = "Aggregation: 'fork-join' for parallel or 'sequential'"
    )]
    pub aggregation: AggregationType,

    /// Output format for the final report
    #[arg(long = "format", value_name = "FORMAT", default_value = "text")]
    pub format: ReportFormat,

    /// Do not print one line per transaction
    #[arg(long = "quiet", short = 'q')]
    pub quiet: bool,
}

/// Available aggregation strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AggregationType {
    ForkJoin,
    Sequential,
}

/// Available report formats
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Csv,
}

impl CliArgs {
    /// Build a SimulationConfig from CLI arguments
    pub fn to_config(&self) -> SimulationConfig {
        SimulationConfig {
            accounts: self.accounts,
            workers: self.workers,
            transactions: self.transactions,
            amount_range: self.amount_range.clone(),
            timeout: Duration::from_secs(self.timeout),
            seed: self.seed,
            threshold: self.threshold,
            aggregation: self.aggregation,
        }
    }
}

/// Parse `LO..HI` into a half-open range
fn parse_amount_range(value: &str) -> Result<Range<Amount>, String> {
    let (lo, hi) = value
        .split_once("..")
        .ok_or_else(|| format!("expected LO..HI, got '{}'", value))?;
    let lo: Amount = lo
        .trim()
        .parse()
        .map_err(|e| format!("invalid lower bound '{}': {}", lo, e))?;
    let hi: Amount = hi
        .trim()
        .parse()
        .map_err(|e| format!("invalid upper bound '{}': {}", hi, e))?;
    if lo <= 0 || lo >= hi {
        return Err(format!(
            "range must satisfy 0 < LO < HI, got {}..{}",
            lo, hi
        ));
    }
    Ok(lo..hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults_match_simulation_defaults() {
        let parsed = CliArgs::try_parse_from(["program"]).unwrap();

        assert_eq!(parsed.to_config(), SimulationConfig::default());
        assert_eq!(parsed.format, ReportFormat::Text);
        assert!(!parsed.quiet);
    }

    #[rstest]
    #[case::default_aggregation(&["program"], AggregationType::ForkJoin)]
    #[case::explicit_fork_join(&["program", "--aggregation", "fork-join"], AggregationType::ForkJoin)]
    #[case::explicit_sequential(&["program", "--aggregation", "sequential"], AggregationType::Sequential)]
    fn test_aggregation_parsing(#[case] args: &[&str], #[case] expected: AggregationType) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.aggregation, expected);
    }

    #[test]
    fn test_all_options() {
        let parsed = CliArgs::try_parse_from([
            "program",
            "--accounts",
            "10",
            "--workers",
            "8",
            "--transactions",
            "1000",
            "--amount-range",
            "1..50",
            "--timeout",
            "2",
            "--seed",
            "42",
            "--threshold",
            "4",
            "--format",
            "csv",
            "--quiet",
        ])
        .unwrap();
        let config = parsed.to_config();

        assert_eq!(config.accounts, 10);
        assert_eq!(config.workers, 8);
        assert_eq!(config.transactions, 1000);
        assert_eq!(config.amount_range, 1..50);
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.threshold, 4);
        assert_eq!(parsed.format, ReportFormat::Csv);
        assert!(parsed.quiet);
    }

    #[rstest]
    #[case::plain("10..100", 10..100)]
    #[case::spaces(" 1 .. 2 ", 1..2)]
    fn test_parse_amount_range_valid(#[case] value: &str, #[case] expected: Range<Amount>) {
        assert_eq!(parse_amount_range(value), Ok(expected));
    }

    #[rstest]
    #[case::missing_separator("10-100")]
    #[case::not_a_number("a..b")]
    #[case::empty("10..10")]
    #[case::inverted("100..10")]
    #[case::zero_start("0..10")]
    fn test_parse_amount_range_invalid(#[case] value: &str) {
        assert!(parse_amount_range(value).is_err());
    }

    #[rstest]
    #[case::invalid_aggregation(&["program", "--aggregation", "invalid"])]
    #[case::invalid_format(&["program", "--format", "xml"])]
    #[case::negative_accounts(&["program", "--accounts", "-1"])]
    #[case::bad_range(&["program", "--amount-range", "5..1"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
