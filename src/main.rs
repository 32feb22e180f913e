use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use tx_prioritizer::{build_report, render_text, Cli, OutputFormat};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the report
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(version = tx_prioritizer::VERSION, ?cli, "Starting");

    let report = build_report(&cli.transactions, &cli.latencies, &cli.budgets_ms).with_context(|| {
        format!(
            "Failed to prioritize {} with latencies from {}",
            cli.transactions.display(),
            cli.latencies.display()
        )
    })?;

    match cli.format {
        OutputFormat::Text => print!("{}", render_text(&report, cli.list)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            println!("{}", json);
        }
    }

    Ok(())
}
