// 📊 Selection Report
// Loads both sources, ranks once, fills once per requested budget.

use crate::error::PrioritizerResult;
use crate::loader::{load_latency_table, load_transactions, SourceInfo};
use crate::prioritizer::{Prioritizer, SelectionResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct SelectionReport {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub transactions: SourceInfo,
    pub latencies: SourceInfo,
    /// Number of transactions in the full ranking
    pub ranked_count: usize,
    /// One selection per budget, in the order the budgets were given
    pub selections: Vec<SelectionResult>,
}

pub fn build_report(
    transactions_path: &Path,
    latencies_path: &Path,
    budgets_ms: &[Decimal],
) -> PrioritizerResult<SelectionReport> {
    let latencies = load_latency_table(latencies_path)?;
    let mut transactions = load_transactions(transactions_path)?;

    let prioritizer = Prioritizer::new(&latencies.data);
    let scores = prioritizer.rank(&mut transactions.data)?;

    let selections = budgets_ms
        .iter()
        .map(|&budget_ms| Prioritizer::fill(&transactions.data, &scores, budget_ms))
        .collect::<PrioritizerResult<Vec<_>>>()?;

    Ok(SelectionReport {
        run_id: Uuid::new_v4().to_string(),
        generated_at: Utc::now(),
        transactions: transactions.source,
        latencies: latencies.source,
        ranked_count: scores.len(),
        selections,
    })
}

// ============================================================================
// RENDERING
// ============================================================================

/// Console rendering: two summary lines per budget, optionally the selection table
pub fn render_text(report: &SelectionReport, list_transactions: bool) -> String {
    let mut out = String::new();

    for selection in &report.selections {
        out.push_str(&format!(
            "Total time of the selected transactions is {}ms\n",
            selection.total_time_ms
        ));
        out.push_str(&format!(
            "Maximum amount of transactions is ${:.2} in {}ms\n",
            selection.total_value, selection.budget_ms
        ));

        if list_transactions {
            out.push_str(&render_selection_table(selection));
        }
    }

    out
}

fn render_selection_table(selection: &SelectionResult) -> String {
    if selection.is_empty() {
        return format!("  (no transactions fit in {}ms)\n", selection.budget_ms);
    }

    let mut table = format!(
        "  {:>4}  {:<38} {:>10} {:>7} {:>9} {:>10}\n",
        "#", "id", "amount", "country", "latency", "$/ms"
    );

    for (rank, entry) in selection.selected.iter().enumerate() {
        table.push_str(&format!(
            "  {:>4}  {:<38} {:>10.2} {:>7} {:>7}ms {:>10.4}\n",
            rank + 1,
            entry.transaction.id,
            entry.score.amount,
            entry.transaction.bank_country_code,
            entry.score.latency_ms.to_string(),
            entry.score.efficiency
        ));
    }

    table
}
