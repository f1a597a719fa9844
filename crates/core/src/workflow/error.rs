//! Workflow error types for the budget approval lifecycle.

use rust_decimal::Decimal;
use thiserror::Error;

use mandira_shared::types::{BudgetId, UserId};
use mandira_shared::AppError;

use crate::budget::BudgetStatus;

/// Errors that can occur during workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: BudgetStatus,
        /// The attempted target status.
        to: BudgetStatus,
    },

    /// Budget not found.
    #[error("Budget {0} not found")]
    BudgetNotFound(BudgetId),

    /// Rejection reason is required but not provided.
    #[error("Rejection reason is required")]
    RejectionReasonRequired,

    /// User is not authorized to approve budgets.
    #[error("User {user_id} is not authorized to approve budgets")]
    NotAuthorizedToApprove {
        /// The user who attempted to approve.
        user_id: UserId,
    },

    /// Item amounts no longer reconcile with the declared budget amount.
    #[error("Budget amount {declared} does not match item sum {items}")]
    ItemSumMismatch {
        /// The declared budget amount.
        declared: Decimal,
        /// The sum of item amounts.
        items: Decimal,
    },
}

impl WorkflowError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. } => 409,
            Self::BudgetNotFound(_) => 404,
            Self::RejectionReasonRequired | Self::ItemSumMismatch { .. } => 400,
            Self::NotAuthorizedToApprove { .. } => 403,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::BudgetNotFound(_) => "BUDGET_NOT_FOUND",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
            Self::NotAuthorizedToApprove { .. } => "NOT_AUTHORIZED_TO_APPROVE",
            Self::ItemSumMismatch { .. } => "ITEM_SUM_MISMATCH",
        }
    }
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        let message = err.to_string();
        match err {
            WorkflowError::InvalidTransition { .. } => Self::InvalidTransition(message),
            WorkflowError::BudgetNotFound(_) => Self::NotFound(message),
            WorkflowError::RejectionReasonRequired | WorkflowError::ItemSumMismatch { .. } => {
                Self::Validation(message)
            }
            WorkflowError::NotAuthorizedToApprove { .. } => Self::Unauthorized(message),
        }
    }
}
