// ⚙️ Configuration - command line with environment fallbacks

use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// Full report as pretty-printed JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "tx-prioritizer")]
#[command(about = "Pick the most valuable transactions that can be processed within a time budget", long_about = None)]
#[command(version)]
pub struct Cli {
    /// CSV file with an id,amount,bank_country_code header
    #[arg(short, long, env = "PRIORITIZER_TRANSACTIONS", default_value = "transactions.csv")]
    pub transactions: PathBuf,

    /// JSON object mapping bank country codes to latency in milliseconds
    #[arg(short, long, env = "PRIORITIZER_LATENCIES", default_value = "api_latencies.json")]
    pub latencies: PathBuf,

    /// Time budget in milliseconds (repeat or comma-separate for several budgets)
    #[arg(
        short,
        long = "budget",
        env = "PRIORITIZER_BUDGET_MS",
        value_delimiter = ',',
        default_value = "50",
        value_parser = parse_budget
    )]
    pub budgets_ms: Vec<Decimal>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// List the selected transactions, not only the totals
    #[arg(long)]
    pub list: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Default tracing filter when RUST_LOG is not set
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "tx_prioritizer=debug"
        } else {
            "tx_prioritizer=warn"
        }
    }
}

/// Budgets are parsed straight into decimals so "0.3" means exactly 0.3
fn parse_budget(raw: &str) -> Result<Decimal, String> {
    let budget = Decimal::from_str(raw.trim())
        .map_err(|_| format!("'{}' is not a number of milliseconds", raw))?;

    if budget < Decimal::ZERO {
        return Err(format!("budget must be non-negative, got {}", raw));
    }

    Ok(budget)
}
