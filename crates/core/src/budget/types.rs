//! Budget data types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use mandira_shared::types::{BudgetId, BudgetItemId, FundId, LedgerId, TemplateId, UserId};

use super::error::BudgetError;

/// Budget status in the approval lifecycle.
///
/// Budgets progress through these states from creation to closure.
/// The valid transitions are:
/// - Draft → Submitted (submit)
/// - Submitted → Approved (approve)
/// - Submitted → Rejected (reject)
/// - Approved → Closed (close)
/// - Closed → Approved (reopen)
/// - Rejected → Draft (return for re-editing)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    /// Budget is being drafted and can be modified.
    Draft,
    /// Budget has been submitted for approval.
    Submitted,
    /// Budget has been approved and is live.
    Approved,
    /// Budget has been rejected; editable again only after an explicit
    /// return to draft.
    Rejected,
    /// Budget has been closed; immutable except for reopening.
    Closed,
}

impl BudgetStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Closed => "closed",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "submitted" => Some(Self::Submitted),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }

    /// Returns true if amounts, items, and the period can be modified.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if ledger postings may still be recorded against the
    /// budget's items.
    #[must_use]
    pub fn accepts_postings(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range.
    pub from: NaiveDate,
    /// Last day of the range (inclusive).
    pub to: NaiveDate,
}

impl DateRange {
    /// Creates a range, validating `from <= to`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, BudgetError> {
        if from > to {
            return Err(BudgetError::InvalidDateRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// Returns true if the date falls within the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }

    /// Returns true if the two ranges share at least one day.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.from <= other.to && other.from <= self.to
    }
}

/// Marker linking a generated budget back to its recurring template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceMarker {
    /// The template the budget was generated from.
    pub template_id: TemplateId,
    /// The template's base name.
    pub base_name: String,
    /// Zero-based occurrence index within the series.
    pub occurrence_index: u32,
}

/// A budget line item, owned exclusively by one budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetItem {
    /// Budget item ID.
    pub id: BudgetItemId,
    /// Ledger (expense category) this line allocates against.
    pub ledger_id: LedgerId,
    /// Budgeted amount.
    pub budgeted_amount: Decimal,
    /// Optional description.
    pub description: Option<String>,
}

/// A budget record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    /// Budget ID.
    pub id: BudgetId,
    /// Fund this budget belongs to.
    pub fund_id: FundId,
    /// Budget name.
    pub name: String,
    /// Total budgeted amount; always equals the sum of item amounts.
    pub amount: Decimal,
    /// Budget period.
    pub period: DateRange,
    /// Lifecycle status.
    pub status: BudgetStatus,
    /// Whether the budget is active.
    pub is_active: bool,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Present when the budget was generated from a recurring template.
    pub recurrence: Option<RecurrenceMarker>,
    /// Line items, in creation order.
    pub items: Vec<BudgetItem>,
    /// User who created the budget.
    pub created_by: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// When the budget was submitted for approval.
    pub submitted_at: Option<DateTime<Utc>>,
    /// Who submitted the budget.
    pub submitted_by: Option<UserId>,
    /// When the budget was approved or rejected.
    pub decided_at: Option<DateTime<Utc>>,
    /// Who approved or rejected the budget.
    pub decided_by: Option<UserId>,
    /// Approval notes or rejection reason.
    pub decision_notes: Option<String>,
    /// When the budget was closed.
    pub closed_at: Option<DateTime<Utc>>,
    /// Version counter for optimistic concurrency control.
    pub version: u64,
}

/// Input for creating a budget line item.
#[derive(Debug, Clone)]
pub struct CreateBudgetItemInput {
    /// Ledger this line allocates against.
    pub ledger_id: LedgerId,
    /// Budgeted amount.
    pub budgeted_amount: Decimal,
    /// Optional description.
    pub description: Option<String>,
}

/// Input for creating a new budget.
#[derive(Debug, Clone)]
pub struct CreateBudgetInput {
    /// Fund the budget belongs to.
    pub fund_id: FundId,
    /// Budget name.
    pub name: String,
    /// Total budgeted amount; must equal the sum of item amounts.
    pub amount: Decimal,
    /// Budget period.
    pub period: DateRange,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Recurrence marker, set only by the recurring generator.
    pub recurrence: Option<RecurrenceMarker>,
    /// Line items.
    pub items: Vec<CreateBudgetItemInput>,
    /// User creating the budget.
    pub created_by: UserId,
}

/// Partial update applied to a draft budget.
///
/// Fields left as `None` are untouched.
#[derive(Debug, Clone, Default)]
pub struct BudgetPatch {
    /// New name.
    pub name: Option<String>,
    /// New total amount; requires `items` so the sum invariant holds.
    pub amount: Option<Decimal>,
    /// Replacement line items.
    pub items: Option<Vec<CreateBudgetItemInput>>,
    /// New period.
    pub period: Option<DateRange>,
    /// New notes.
    pub notes: Option<Option<String>>,
    /// New active flag.
    pub is_active: Option<bool>,
}

/// Filter for listing budgets.
#[derive(Debug, Clone, Default)]
pub struct BudgetFilter {
    /// Only budgets belonging to this fund.
    pub fund_id: Option<FundId>,
    /// Only budgets in this status.
    pub status: Option<BudgetStatus>,
    /// Only budgets with this active flag.
    pub is_active: Option<bool>,
    /// Only budgets whose period overlaps this range.
    pub overlapping: Option<DateRange>,
}

impl BudgetFilter {
    /// Returns true if the budget matches every set criterion.
    #[must_use]
    pub fn matches(&self, budget: &Budget) -> bool {
        if let Some(fund_id) = self.fund_id
            && budget.fund_id != fund_id
        {
            return false;
        }
        if let Some(status) = self.status
            && budget.status != status
        {
            return false;
        }
        if let Some(is_active) = self.is_active
            && budget.is_active != is_active
        {
            return false;
        }
        if let Some(range) = self.overlapping
            && !budget.period.overlaps(&range)
        {
            return false;
        }
        true
    }
}
