//! Utilization aggregation over the ledger posting feed.
//!
//! Read-only: nothing here mutates budget state. Figures are recomputed
//! from the feed on every call, so a report may lag an in-flight approval
//! by design.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::budget::Budget;
use crate::directory::PostingFeed;

use super::types::{BudgetUtilization, ItemUtilization, UtilizationCategory};

/// Computes the raw utilization percentage (utilized / budgeted x 100),
/// rounded to two decimal places.
///
/// A zero budgeted amount yields 0, never a division error. The value is
/// not clamped; figures above 100 indicate over-utilization.
#[must_use]
pub fn utilization_percent(utilized: Decimal, budgeted: Decimal) -> Decimal {
    if budgeted.is_zero() {
        Decimal::ZERO
    } else {
        (utilized / budgeted * Decimal::ONE_HUNDRED).round_dp(2)
    }
}

/// Clamps a raw percentage into [0, 100] for progress-bar widths.
///
/// Display-only: the raw percentage remains the authoritative value in
/// every returned or stored figure.
#[must_use]
pub fn display_width(percent: Decimal) -> Decimal {
    percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// Utilization aggregator.
pub struct UtilizationService {
    feed: Arc<dyn PostingFeed>,
}

impl UtilizationService {
    /// Creates an aggregator over the given posting feed.
    #[must_use]
    pub fn new(feed: Arc<dyn PostingFeed>) -> Self {
        Self { feed }
    }

    /// Computes per-item and whole-budget utilization.
    ///
    /// Postings are summed per item ledger, restricted to the budget's
    /// date range.
    #[must_use]
    pub fn utilization_for(&self, budget: &Budget) -> BudgetUtilization {
        let per_item: Vec<ItemUtilization> = budget
            .items
            .iter()
            .map(|item| {
                let utilized: Decimal = self
                    .feed
                    .postings_for(item.ledger_id, budget.period)
                    .iter()
                    .map(|p| p.amount)
                    .sum();
                ItemUtilization {
                    item_id: item.id,
                    ledger_id: item.ledger_id,
                    budgeted: item.budgeted_amount,
                    utilized,
                    remaining: item.budgeted_amount - utilized,
                    percent: utilization_percent(utilized, item.budgeted_amount),
                }
            })
            .collect();

        let total_budgeted: Decimal = per_item.iter().map(|i| i.budgeted).sum();
        let total_utilized: Decimal = per_item.iter().map(|i| i.utilized).sum();
        let percent = utilization_percent(total_utilized, total_budgeted);

        BudgetUtilization {
            budget_id: budget.id,
            per_item,
            total_budgeted,
            total_utilized,
            total_remaining: total_budgeted - total_utilized,
            utilization_percent: percent,
            category: UtilizationCategory::classify(percent),
        }
    }
}
