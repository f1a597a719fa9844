//! Budget error types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use mandira_shared::types::{BudgetId, FundId, LedgerId};
use mandira_shared::AppError;

/// Budget-related errors.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// Budget not found.
    #[error("Budget not found: {0}")]
    NotFound(BudgetId),

    /// Declared amount does not equal the sum of item amounts.
    #[error("Budget amount {declared} does not match item sum {items}")]
    ItemSumMismatch {
        /// The declared budget amount.
        declared: Decimal,
        /// The sum of item amounts.
        items: Decimal,
    },

    /// Amount cannot be negative.
    #[error("Amount cannot be negative")]
    NegativeAmount,

    /// Budget name is required.
    #[error("Budget name is required")]
    NameRequired,

    /// A budget must have at least one item.
    #[error("Budget must have at least one item")]
    EmptyItems,

    /// Date range start is after its end.
    #[error("Invalid date range: {from} is after {to}")]
    InvalidDateRange {
        /// Range start.
        from: NaiveDate,
        /// Range end.
        to: NaiveDate,
    },

    /// Fund does not exist.
    #[error("Fund not found: {0}")]
    FundNotFound(FundId),

    /// Ledger does not exist.
    #[error("Ledger not found: {0}")]
    LedgerNotFound(LedgerId),

    /// Amounts and items can only change while the budget is a draft.
    #[error("Budget {0} is no longer editable")]
    NotEditable(BudgetId),

    /// The period cannot change once the budget has left draft.
    #[error("Budget {0} period is locked")]
    PeriodLocked(BudgetId),

    /// Only draft budgets may be deleted.
    #[error("Budget {0} is not a draft and cannot be deleted")]
    DeleteNotDraft(BudgetId),
}

impl BudgetError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::ItemSumMismatch { .. }
            | Self::NegativeAmount
            | Self::NameRequired
            | Self::EmptyItems
            | Self::InvalidDateRange { .. } => 400,
            Self::FundNotFound(_) | Self::LedgerNotFound(_) => 422,
            Self::NotEditable(_) | Self::PeriodLocked(_) | Self::DeleteNotDraft(_) => 409,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "BUDGET_NOT_FOUND",
            Self::ItemSumMismatch { .. } => "ITEM_SUM_MISMATCH",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::NameRequired => "NAME_REQUIRED",
            Self::EmptyItems => "EMPTY_ITEMS",
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            Self::FundNotFound(_) => "FUND_NOT_FOUND",
            Self::LedgerNotFound(_) => "LEDGER_NOT_FOUND",
            Self::NotEditable(_) => "BUDGET_NOT_EDITABLE",
            Self::PeriodLocked(_) => "BUDGET_PERIOD_LOCKED",
            Self::DeleteNotDraft(_) => "DELETE_NOT_DRAFT",
        }
    }
}

impl From<BudgetError> for AppError {
    fn from(err: BudgetError) -> Self {
        let message = err.to_string();
        match err {
            BudgetError::NotFound(_) => Self::NotFound(message),
            BudgetError::ItemSumMismatch { .. }
            | BudgetError::NegativeAmount
            | BudgetError::NameRequired
            | BudgetError::EmptyItems
            | BudgetError::InvalidDateRange { .. } => Self::Validation(message),
            BudgetError::FundNotFound(_) | BudgetError::LedgerNotFound(_) => {
                Self::Referential(message)
            }
            BudgetError::NotEditable(_)
            | BudgetError::PeriodLocked(_)
            | BudgetError::DeleteNotDraft(_) => Self::Conflict(message),
        }
    }
}
