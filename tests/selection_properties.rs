//! Property-based tests for the selection invariants
//!
//! These must hold for every generated batch, not only the hand-picked
//! cases in the unit tests. Latencies and budgets are fractional on purpose:
//! sums such as 0.1 + 0.2 must land exactly on a 0.3 budget.

use proptest::prelude::*;
use rust_decimal::Decimal;
use tx_prioritizer::*;

const COUNTRIES: [&str; 6] = ["US", "DE", "FR", "GB", "JP", "BR"];

fn latency_table() -> LatencyTable {
    LatencyTable::from_entries([
        ("US", 0.1),
        ("DE", 0.2),
        ("FR", 0.7),
        ("GB", 1.3),
        ("JP", 2.5),
        ("BR", 10.0),
    ])
    .unwrap()
}

fn transactions_strategy() -> impl Strategy<Value = Vec<Transaction>> {
    prop::collection::vec((1u32..=100_000, 0usize..COUNTRIES.len()), 0..40).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (cents, country))| {
                Transaction::new(
                    &format!("tx-{}", i),
                    &format!("{}.{:02}", cents / 100, cents % 100),
                    COUNTRIES[country],
                )
            })
            .collect()
    })
}

/// Budgets in tenths of a millisecond, 0.0 to 49.9
fn budget_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..500).prop_map(|tenths| Decimal::new(tenths, 1))
}

// ============================================================================
// Selection Invariants
// ============================================================================

proptest! {
    /// Property: total time never exceeds the budget
    #[test]
    fn budget_respected(txs in transactions_strategy(), budget in budget_strategy()) {
        let table = latency_table();
        let mut txs = txs;

        let result = Prioritizer::new(&table).select(&mut txs, budget).unwrap();

        prop_assert!(result.total_time_ms <= budget);
    }

    /// Property: the selection is a prefix of the full ranking
    #[test]
    fn selection_is_ranking_prefix(txs in transactions_strategy(), budget in budget_strategy()) {
        let table = latency_table();
        let mut txs = txs;

        let result = Prioritizer::new(&table).select(&mut txs, budget).unwrap();

        // `txs` now holds the full ranking
        let selected: Vec<Transaction> = result.selected.iter().map(|s| s.transaction.clone()).collect();
        prop_assert_eq!(&selected[..], &txs[..selected.len()]);

        // and the first excluded transaction would have overshot
        if let Some(next) = txs.get(selected.len()) {
            let next_latency = table.latency_ms(&next.bank_country_code).unwrap();
            prop_assert!(result.total_time_ms + next_latency > budget);
        }
    }

    /// Property: every transaction that fits before the first overshoot is taken
    #[test]
    fn fitting_transactions_are_never_dropped(txs in transactions_strategy(), budget in budget_strategy()) {
        let table = latency_table();
        let mut txs = txs;

        let result = Prioritizer::new(&table).select(&mut txs, budget).unwrap();

        let mut expected = 0;
        let mut consumed = Decimal::ZERO;
        for tx in &txs {
            consumed += table.latency_ms(&tx.bank_country_code).unwrap();
            if consumed > budget {
                break;
            }
            expected += 1;
        }

        prop_assert_eq!(result.len(), expected);
    }

    /// Property: nothing is selected after the running time reaches the budget exactly
    #[test]
    fn exact_budget_hit_is_the_last_selection(txs in transactions_strategy(), budget in budget_strategy()) {
        let table = latency_table();
        let mut txs = txs;

        let result = Prioritizer::new(&table).select(&mut txs, budget).unwrap();

        let mut running = Decimal::ZERO;
        for (i, entry) in result.selected.iter().enumerate() {
            running += entry.score.latency_ms;
            if running == budget {
                prop_assert_eq!(i + 1, result.len());
            }
        }
        prop_assert_eq!(running, result.total_time_ms);
    }

    /// Property: ranking is sorted by efficiency, descending
    #[test]
    fn ranking_is_descending(txs in transactions_strategy()) {
        let table = latency_table();
        let mut txs = txs;

        let scores = Prioritizer::new(&table).rank(&mut txs).unwrap();

        for pair in scores.windows(2) {
            prop_assert!(pair[0].efficiency >= pair[1].efficiency);
        }
    }

    /// Property: same input order and budget give the same selection
    #[test]
    fn selection_is_deterministic(txs in transactions_strategy(), budget in budget_strategy()) {
        let table = latency_table();
        let prioritizer = Prioritizer::new(&table);
        let mut first = txs.clone();
        let mut second = txs;

        let a = prioritizer.select(&mut first, budget).unwrap();
        let b = prioritizer.select(&mut second, budget).unwrap();

        prop_assert_eq!(a, b);
        prop_assert_eq!(first, second);
    }

    /// Property: a larger budget never shrinks the selection or its value
    #[test]
    fn selection_is_monotonic_in_budget(
        txs in transactions_strategy(),
        budget in budget_strategy(),
        extra in budget_strategy(),
    ) {
        let table = latency_table();
        let prioritizer = Prioritizer::new(&table);
        let mut txs = txs;
        let scores = prioritizer.rank(&mut txs).unwrap();

        let small = Prioritizer::fill(&txs, &scores, budget).unwrap();
        let large = Prioritizer::fill(&txs, &scores, budget + extra).unwrap();

        prop_assert!(large.len() >= small.len());
        prop_assert!(large.total_value >= small.total_value);
    }

    /// Property: zero budget selects nothing
    #[test]
    fn zero_budget_selects_nothing(txs in transactions_strategy()) {
        let table = latency_table();
        let mut txs = txs;

        let result = Prioritizer::new(&table).select(&mut txs, Decimal::ZERO).unwrap();

        prop_assert!(result.is_empty());
        prop_assert_eq!(result.total_time_ms, Decimal::ZERO);
        prop_assert_eq!(result.total_value, 0.0);
    }
}

// ============================================================================
// Failure Modes
// ============================================================================

proptest! {
    /// Property: one unknown country anywhere aborts the whole selection
    #[test]
    fn unknown_country_aborts(txs in transactions_strategy(), position in 0usize..40) {
        let table = latency_table();
        let mut txs = txs;
        let at = position.min(txs.len());
        txs.insert(at, Transaction::new("rogue", "10.00", "ZZ"));
        let before = txs.clone();

        let result = Prioritizer::new(&table).select(&mut txs, Decimal::new(1_000, 0));

        prop_assert!(
            matches!(result, Err(PrioritizerError::UnknownCountry { .. })),
            "expected UnknownCountry"
        );
        prop_assert_eq!(txs, before);
    }
}

#[test]
fn empty_input_selects_nothing_for_any_budget() {
    let table = latency_table();
    let prioritizer = Prioritizer::new(&table);

    for budget in [0i64, 1, 50, 1_000_000] {
        let mut txs: Vec<Transaction> = Vec::new();
        let result = prioritizer.select(&mut txs, Decimal::new(budget, 0)).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.total_value, 0.0);
    }
}
