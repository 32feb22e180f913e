// 📂 Loader - transactions CSV + latency JSON
//
// Each source is read fully into memory, hashed for provenance, then parsed.

use crate::error::{PrioritizerError, PrioritizerResult};
use crate::latency::LatencyTable;
use crate::transaction::Transaction;
use csv::{ReaderBuilder, Trim};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Provenance of one input file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceInfo {
    pub path: String,
    pub sha256: String,
    pub records: usize,
}

/// Parsed data together with where it came from
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub data: T,
    pub source: SourceInfo,
}

// ============================================================================
// TRANSACTIONS
// ============================================================================

/// Load all transactions from a CSV file with an `id,amount,bank_country_code` header
pub fn load_transactions(path: &Path) -> PrioritizerResult<Loaded<Vec<Transaction>>> {
    let bytes = read_source(path)?;
    let origin = path.display().to_string();

    let transactions = parse_transactions(bytes.as_slice(), &origin)?;
    let source = SourceInfo {
        path: origin,
        sha256: sha256_hex(&bytes),
        records: transactions.len(),
    };

    info!(path = %source.path, records = source.records, "Loaded transactions");
    debug!(sha256 = %source.sha256, "Transactions digest");

    Ok(Loaded {
        data: transactions,
        source,
    })
}

/// Parse transactions from any reader; `origin` names the source in errors
pub fn parse_transactions<R: Read>(reader: R, origin: &str) -> PrioritizerResult<Vec<Transaction>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut transactions = Vec::new();

    for (index, result) in reader.deserialize::<Transaction>().enumerate() {
        let transaction = result.map_err(|source| PrioritizerError::MalformedRecord {
            origin: origin.to_string(),
            // Position is 1-based and counts the header; fall back to index + 2
            line: source
                .position()
                .map(|p| p.line())
                .unwrap_or(index as u64 + 2),
            source,
        })?;

        transactions.push(transaction);
    }

    Ok(transactions)
}

// ============================================================================
// LATENCIES
// ============================================================================

/// Load the latency table from a JSON object of country code → milliseconds
pub fn load_latency_table(path: &Path) -> PrioritizerResult<Loaded<LatencyTable>> {
    let bytes = read_source(path)?;
    let origin = path.display().to_string();

    let table = parse_latency_table(bytes.as_slice(), &origin)?;
    let source = SourceInfo {
        path: origin,
        sha256: sha256_hex(&bytes),
        records: table.len(),
    };

    info!(path = %source.path, countries = source.records, "Loaded latency table");
    debug!(sha256 = %source.sha256, "Latency table digest");

    Ok(Loaded {
        data: table,
        source,
    })
}

pub fn parse_latency_table<R: Read>(reader: R, origin: &str) -> PrioritizerResult<LatencyTable> {
    let document: serde_json::Value = serde_json::from_reader(reader).map_err(|source| {
        PrioritizerError::MalformedLatencyDocument {
            origin: origin.to_string(),
            source,
        }
    })?;

    LatencyTable::from_json_value(document)
}

// ============================================================================
// HELPERS
// ============================================================================

fn read_source(path: &Path) -> PrioritizerResult<Vec<u8>> {
    std::fs::read(path).map_err(|source| PrioritizerError::InputUnavailable {
        path: path.to_path_buf(),
        source,
    })
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
