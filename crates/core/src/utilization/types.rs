//! Utilization data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use mandira_shared::types::{BudgetId, BudgetItemId, LedgerId};

/// Utilization classification buckets.
///
/// Boundaries are half-open on the lower bound: exactly 50% is
/// `Moderate`, exactly 80% is `WellUtilized`, and exactly 100% is
/// `WellUtilized`, not `OverUtilized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilizationCategory {
    /// Below 50% utilized.
    UnderUtilized,
    /// 50% to below 80% utilized.
    Moderate,
    /// 80% up to and including 100% utilized.
    WellUtilized,
    /// Above 100% utilized.
    OverUtilized,
}

impl UtilizationCategory {
    /// Classifies a raw utilization percentage.
    #[must_use]
    pub fn classify(percent: Decimal) -> Self {
        let fifty = Decimal::new(50, 0);
        let eighty = Decimal::new(80, 0);

        if percent < fifty {
            Self::UnderUtilized
        } else if percent < eighty {
            Self::Moderate
        } else if percent <= Decimal::ONE_HUNDRED {
            Self::WellUtilized
        } else {
            Self::OverUtilized
        }
    }

    /// Returns the string representation of the category.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnderUtilized => "under_utilized",
            Self::Moderate => "moderate",
            Self::WellUtilized => "well_utilized",
            Self::OverUtilized => "over_utilized",
        }
    }
}

impl fmt::Display for UtilizationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Utilization figures for a single budget item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemUtilization {
    /// Budget item ID.
    pub item_id: BudgetItemId,
    /// Ledger the item allocates against.
    pub ledger_id: LedgerId,
    /// Budgeted amount.
    pub budgeted: Decimal,
    /// Utilized amount, summed from ledger postings in the budget period.
    pub utilized: Decimal,
    /// Remaining amount (budgeted - utilized).
    pub remaining: Decimal,
    /// Raw utilization percentage, never clamped.
    pub percent: Decimal,
}

/// Utilization figures for a whole budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetUtilization {
    /// Budget ID.
    pub budget_id: BudgetId,
    /// Per-item figures, in item order.
    pub per_item: Vec<ItemUtilization>,
    /// Total budgeted amount.
    pub total_budgeted: Decimal,
    /// Total utilized amount.
    pub total_utilized: Decimal,
    /// Total remaining amount.
    pub total_remaining: Decimal,
    /// Raw utilization percentage, never clamped.
    pub utilization_percent: Decimal,
    /// Classification bucket for the budget as a whole.
    pub category: UtilizationCategory,
}
