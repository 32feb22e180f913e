// 💸 Transaction Record
// One row of the transactions CSV: id, amount, bank_country_code

use crate::error::{PrioritizerError, PrioritizerResult};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Amounts seen in practice, in USD. Values outside are accepted but logged.
pub const TYPICAL_AMOUNT_RANGE: RangeInclusive<f64> = 0.01..=1000.0;

/// Transaction as delivered by the CSV source
///
/// The amount stays string-encoded until ranking so that a malformed value
/// surfaces as `MalformedAmount` at selection time, not as a CSV error.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Transaction {
    /// Opaque identifier (a UUID in the usual feeds)
    pub id: String,

    /// Decimal amount in USD, e.g. "45.99"
    pub amount: String,

    /// 2-letter country code of the originating bank
    pub bank_country_code: String,
}

impl Transaction {
    pub fn new(id: &str, amount: &str, bank_country_code: &str) -> Self {
        Transaction {
            id: id.to_string(),
            amount: amount.to_string(),
            bank_country_code: bank_country_code.to_string(),
        }
    }

    /// Parse the amount as a finite number
    pub fn amount_value(&self) -> PrioritizerResult<f64> {
        match self.amount.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(PrioritizerError::MalformedAmount {
                id: self.id.clone(),
                amount: self.amount.clone(),
            }),
        }
    }
}
