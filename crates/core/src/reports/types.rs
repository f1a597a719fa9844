//! Report data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::budget::{BudgetStatus, DateRange};
use crate::utilization::UtilizationCategory;
use mandira_shared::types::{BudgetId, FundId, LedgerId};

/// Whether a budget's spending landed under, over, or on its allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceStatus {
    /// Spent less than budgeted.
    Favorable,
    /// Spent more than budgeted.
    Unfavorable,
    /// Spent exactly the budgeted amount.
    OnBudget,
}

impl VarianceStatus {
    /// Classifies a variance figure (budgeted - utilized).
    #[must_use]
    pub fn classify(variance: Decimal) -> Self {
        if variance.is_zero() {
            Self::OnBudget
        } else if variance > Decimal::ZERO {
            Self::Favorable
        } else {
            Self::Unfavorable
        }
    }
}

/// One budget's figures as rendered in a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetReportRow {
    /// Budget ID.
    pub budget_id: BudgetId,
    /// Budget name.
    pub name: String,
    /// Fund the budget belongs to.
    pub fund_id: FundId,
    /// Human-readable fund name.
    pub fund_name: String,
    /// Current workflow status.
    pub status: BudgetStatus,
    /// Budget period.
    pub period: DateRange,
    /// Declared budget amount.
    pub budget_amount: Decimal,
    /// Utilized amount from ledger postings.
    pub utilized: Decimal,
    /// Remaining amount (budget_amount - utilized).
    pub remaining: Decimal,
    /// Raw utilization percentage, never clamped.
    pub utilization_percent: Decimal,
    /// Utilization bucket.
    pub category: UtilizationCategory,
    /// Variance (budget_amount - utilized).
    pub variance: Decimal,
    /// Variance classification.
    pub variance_status: VarianceStatus,
}

/// Aggregate totals over a set of report rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryTotals {
    /// Sum of budget amounts.
    pub total_budget_amount: Decimal,
    /// Sum of utilized amounts.
    pub total_utilized: Decimal,
    /// Sum of remaining amounts.
    pub total_remaining: Decimal,
    /// Number of budgets included.
    pub total_budgets: u64,
}

/// Summary report: rows plus their totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Currency code all amounts are denominated in.
    pub currency: String,
    /// One row per matching budget.
    pub budgets: Vec<BudgetReportRow>,
    /// Totals over exactly the rows above.
    pub summary: SummaryTotals,
}

/// Grouping axis for the comparison report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    /// Group by fund.
    Fund,
    /// Group by workflow status.
    Status,
    /// Group by the month of the period start (`YYYY-MM`).
    Month,
}

impl GroupBy {
    /// Returns the string representation of the axis.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fund => "fund",
            Self::Status => "status",
            Self::Month => "month",
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One group's aggregated figures in a comparison report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// Group key (fund name, status, or `YYYY-MM`).
    pub key: String,
    /// Sum of budget amounts in the group.
    pub total_budget: Decimal,
    /// Sum of utilized amounts in the group.
    pub total_utilized: Decimal,
    /// Sum of remaining amounts in the group.
    pub total_remaining: Decimal,
    /// Group-level utilization percentage, never clamped.
    pub utilization_rate: Decimal,
    /// Number of budgets in the group.
    pub budget_count: u64,
}

/// Comparison report grouped along one axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Currency code all amounts are denominated in.
    pub currency: String,
    /// Axis the rows are grouped by.
    pub group_by: GroupBy,
    /// One row per group key, in key order.
    pub comparisons: Vec<ComparisonRow>,
}

/// Budget counts per utilization bucket.
///
/// Every reported budget lands in exactly one bucket, so the four counts
/// always sum to the number of rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryBuckets {
    /// Budgets below 50% utilized.
    pub under_utilized: u64,
    /// Budgets at 50% to below 80%.
    pub moderate: u64,
    /// Budgets at 80% up to and including 100%.
    pub well_utilized: u64,
    /// Budgets above 100%.
    pub over_utilized: u64,
}

impl CategoryBuckets {
    /// Adds a budget to this category's count.
    pub fn record(&mut self, category: UtilizationCategory) {
        match category {
            UtilizationCategory::UnderUtilized => self.under_utilized += 1,
            UtilizationCategory::Moderate => self.moderate += 1,
            UtilizationCategory::WellUtilized => self.well_utilized += 1,
            UtilizationCategory::OverUtilized => self.over_utilized += 1,
        }
    }

    /// Total budgets counted across all buckets.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.under_utilized + self.moderate + self.well_utilized + self.over_utilized
    }
}

/// Per-ledger aggregation across all matching budgets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerWiseRow {
    /// Ledger ID.
    pub ledger_id: LedgerId,
    /// Human-readable ledger name.
    pub ledger_name: String,
    /// Sum of budgeted amounts allocated to this ledger.
    pub budgeted: Decimal,
    /// Sum of utilized amounts posted to this ledger.
    pub utilized: Decimal,
    /// Remaining amount (budgeted - utilized).
    pub remaining: Decimal,
    /// Raw utilization percentage, never clamped.
    pub percent: Decimal,
}

/// Utilization report: bucket counts, rows, and ledger-wise breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UtilizationReport {
    /// Currency code all amounts are denominated in.
    pub currency: String,
    /// Budget counts per bucket.
    pub summary: CategoryBuckets,
    /// One row per matching budget.
    pub budgets: Vec<BudgetReportRow>,
    /// Per-ledger breakdown, ordered by ledger name.
    pub ledger_wise: Vec<LedgerWiseRow>,
}
