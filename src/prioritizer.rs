// 🎯 Prioritizer - value per millisecond, greedy under a time budget
//
// Two phases:
//   1. rank: stable sort by efficiency = amount / latency, descending
//   2. fill: walk the ranking, include while consumed time stays <= budget,
//            stop at the first transaction that would overshoot or once the
//            budget is hit exactly
//
// The selection is always a prefix of the ranking. Time is summed as exact
// decimals so the <= comparison never suffers from float rounding.

use crate::error::{PrioritizerError, PrioritizerResult};
use crate::latency::LatencyTable;
use crate::transaction::{Transaction, TYPICAL_AMOUNT_RANGE};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::{debug, info, warn};

// ============================================================================
// RESULT TYPES
// ============================================================================

/// Values derived for one transaction while ranking
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Score {
    pub amount: f64,
    pub latency_ms: Decimal,
    pub efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub score: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionResult {
    pub budget_ms: Decimal,
    /// Chosen transactions in priority order
    pub selected: Vec<SelectedTransaction>,
    pub total_time_ms: Decimal,
    pub total_value: f64,
}

impl SelectionResult {
    fn empty(budget_ms: Decimal) -> Self {
        SelectionResult {
            budget_ms,
            selected: Vec::new(),
            total_time_ms: Decimal::ZERO,
            total_value: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.selected.iter().map(|s| s.transaction.id.as_str()).collect()
    }
}

// ============================================================================
// PRIORITIZER
// ============================================================================

pub struct Prioritizer<'a> {
    latencies: &'a LatencyTable,
}

impl<'a> Prioritizer<'a> {
    pub fn new(latencies: &'a LatencyTable) -> Self {
        Prioritizer { latencies }
    }

    /// Rank then fill under `budget_ms`
    ///
    /// On success `transactions` is left in ranked order. On error it is
    /// left untouched and no partial selection is produced.
    pub fn select(
        &self,
        transactions: &mut [Transaction],
        budget_ms: Decimal,
    ) -> PrioritizerResult<SelectionResult> {
        validate_budget(budget_ms)?;

        let scores = self.rank(transactions)?;
        Self::fill(transactions, &scores, budget_ms)
    }

    /// Score every transaction and stably sort the slice by efficiency
    ///
    /// Returns the scores aligned with the reordered slice.
    pub fn rank(&self, transactions: &mut [Transaction]) -> PrioritizerResult<Vec<Score>> {
        // Validate everything before touching the caller's order
        let scores = transactions
            .iter()
            .map(|tx| self.score(tx))
            .collect::<PrioritizerResult<Vec<Score>>>()?;

        let mut ranked: Vec<(Score, Transaction)> = scores
            .into_iter()
            .zip(transactions.iter_mut().map(std::mem::take))
            .collect();

        // sort_by is stable: equal efficiencies keep input order.
        // partial_cmp treats -0.0 and 0.0 as equal; efficiency is never NaN.
        ranked.sort_by(|(a, _), (b, _)| {
            b.efficiency
                .partial_cmp(&a.efficiency)
                .unwrap_or(Ordering::Equal)
        });

        let mut ordered_scores = Vec::with_capacity(ranked.len());
        for (slot, (score, tx)) in transactions.iter_mut().zip(ranked) {
            *slot = tx;
            ordered_scores.push(score);
        }

        debug!(count = ordered_scores.len(), "Ranked transactions by efficiency");
        Ok(ordered_scores)
    }

    /// Greedy walk over an already ranked slice
    pub fn fill(
        ranked: &[Transaction],
        scores: &[Score],
        budget_ms: Decimal,
    ) -> PrioritizerResult<SelectionResult> {
        validate_budget(budget_ms)?;
        debug_assert_eq!(ranked.len(), scores.len());

        let mut result = SelectionResult::empty(budget_ms);

        for (tx, score) in ranked.iter().zip(scores) {
            // Overflow can only happen far beyond any representable budget
            let consumed = match result.total_time_ms.checked_add(score.latency_ms) {
                Some(consumed) if consumed <= budget_ms => consumed,
                _ => {
                    debug!(id = %tx.id, %budget_ms, "Budget exceeded, stopping");
                    break;
                }
            };

            result.total_time_ms = consumed;
            result.total_value += score.amount;
            result.selected.push(SelectedTransaction {
                transaction: tx.clone(),
                score: *score,
            });

            if consumed == budget_ms {
                debug!(id = %tx.id, %budget_ms, "Budget used exactly, stopping");
                break;
            }
        }

        info!(
            %budget_ms,
            selected = result.len(),
            total_time_ms = %result.total_time_ms,
            total_value = result.total_value,
            "Selection complete"
        );

        Ok(result)
    }

    fn score(&self, tx: &Transaction) -> PrioritizerResult<Score> {
        let amount = tx.amount_value()?;
        if !TYPICAL_AMOUNT_RANGE.contains(&amount) {
            warn!(id = %tx.id, amount, "Amount outside the usual range");
        }

        let latency_ms = self
            .latencies
            .latency_ms(&tx.bank_country_code)
            .ok_or_else(|| PrioritizerError::UnknownCountry {
                id: tx.id.clone(),
                country: tx.bank_country_code.clone(),
            })?;

        if latency_ms.is_zero() {
            return Err(PrioritizerError::ZeroLatency {
                id: tx.id.clone(),
                country: tx.bank_country_code.clone(),
            });
        }

        // Table entries came from finite floats, so this conversion holds
        let latency_f64 = latency_ms.to_f64().unwrap_or(f64::MAX);

        Ok(Score {
            amount,
            latency_ms,
            efficiency: amount / latency_f64,
        })
    }
}

fn validate_budget(budget_ms: Decimal) -> PrioritizerResult<()> {
    if budget_ms < Decimal::ZERO {
        return Err(PrioritizerError::InvalidBudget(budget_ms));
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
