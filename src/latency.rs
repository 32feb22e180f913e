// ⏱️ Latency Table - processing cost per bank country
//
// Built once from the latency document and read-only afterwards.
// Entries are validated on construction so the ranking never sees a
// non-numeric or negative latency.
//
// Latencies are held as exact decimals: "0.1" + "0.2" must land on a
// budget of "0.3", which binary floats cannot guarantee.

use crate::error::{PrioritizerError, PrioritizerResult};
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LatencyTable {
    entries: BTreeMap<String, Decimal>,
}

impl LatencyTable {
    /// Build a table from (country, milliseconds) pairs
    ///
    /// Zero is accepted here: it only becomes an error when a transaction
    /// from that country is ranked.
    pub fn from_entries<I, S>(entries: I) -> PrioritizerResult<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut table = LatencyTable::default();

        for (country, latency_ms) in entries {
            let country = country.into();
            let latency = to_exact_latency(&country, latency_ms)?;
            table.entries.insert(country, latency);
        }

        Ok(table)
    }

    /// Build a table from a parsed JSON document of the form `{"US": 10, ...}`
    pub fn from_json_value(document: Value) -> PrioritizerResult<Self> {
        let Value::Object(map) = document else {
            return Err(PrioritizerError::LatencyTableNotAnObject);
        };

        let mut pairs = Vec::with_capacity(map.len());
        for (country, value) in map {
            let latency_ms = value.as_f64().ok_or_else(|| PrioritizerError::InvalidLatency {
                country: country.clone(),
                reason: format!("expected a number of milliseconds, got {}", value),
            })?;
            pairs.push((country, latency_ms));
        }

        Self::from_entries(pairs)
    }

    /// Latency in milliseconds for a country code
    pub fn latency_ms(&self, country: &str) -> Option<Decimal> {
        self.entries.get(country).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Convert through the shortest decimal rendering of the float, so that a
/// document value of 0.1 becomes exactly 0.1
fn to_exact_latency(country: &str, latency_ms: f64) -> PrioritizerResult<Decimal> {
    if !latency_ms.is_finite() {
        return Err(PrioritizerError::InvalidLatency {
            country: country.to_string(),
            reason: format!("{} is not a finite number", latency_ms),
        });
    }

    if latency_ms < 0.0 {
        return Err(PrioritizerError::InvalidLatency {
            country: country.to_string(),
            reason: format!("{}ms is negative", latency_ms),
        });
    }

    Decimal::from_str(&latency_ms.to_string()).map_err(|e| PrioritizerError::InvalidLatency {
        country: country.to_string(),
        reason: format!("{}ms cannot be represented exactly: {}", latency_ms, e),
    })
}
