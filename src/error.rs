// ❌ Error Taxonomy
// Every failure aborts the whole run: no partial selections, no retries.

use rust_decimal::Decimal;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrioritizerError {
    // ========================================================================
    // INPUT UNAVAILABLE (source files missing, unreadable or malformed)
    // ========================================================================
    #[error("Cannot read input {path}: {source}")]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed transaction record at line {line} in {origin}: {source}")]
    MalformedRecord {
        origin: String,
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("Malformed latency document {origin}: {source}")]
    MalformedLatencyDocument {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Latency table must be a JSON object mapping country codes to milliseconds")]
    LatencyTableNotAnObject,

    #[error("Invalid latency for country {country}: {reason}")]
    InvalidLatency { country: String, reason: String },

    // ========================================================================
    // SELECTION ERRORS
    // ========================================================================
    #[error("Transaction {id} has a malformed amount: {amount:?}")]
    MalformedAmount { id: String, amount: String },

    #[error("Transaction {id} references unknown country code {country:?}")]
    UnknownCountry { id: String, country: String },

    #[error("Transaction {id} cannot be ranked: latency for {country} is zero")]
    ZeroLatency { id: String, country: String },

    #[error("Invalid time budget {0}ms: must be a non-negative number of milliseconds")]
    InvalidBudget(Decimal),
}

pub type PrioritizerResult<T> = Result<T, PrioritizerError>;
