// Transaction Prioritizer - Core Library
// Exposes the ranking algorithm, file loaders and reporting for the CLI and tests

pub mod config;
pub mod error;
pub mod latency;
pub mod loader;
pub mod prioritizer;
pub mod report;
pub mod transaction;

// Re-export commonly used types
pub use config::{Cli, OutputFormat};
pub use error::{PrioritizerError, PrioritizerResult};
pub use latency::LatencyTable;
pub use loader::{
    load_latency_table, load_transactions, parse_latency_table, parse_transactions,
    Loaded, SourceInfo,
};
pub use prioritizer::{Prioritizer, Score, SelectedTransaction, SelectionResult};
pub use report::{build_report, render_text, SelectionReport};
pub use transaction::{Transaction, TYPICAL_AMOUNT_RANGE};
pub use rust_decimal::Decimal;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
