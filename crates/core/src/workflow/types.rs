//! Workflow domain types for the budget approval lifecycle.

use chrono::{DateTime, Utc};

use mandira_shared::types::UserId;

use crate::budget::BudgetStatus;

/// Workflow action representing a state transition with audit data.
///
/// Each variant captures the action performed, the resulting status,
/// and the audit trail information (who, when, why).
#[derive(Debug, Clone)]
pub enum WorkflowAction {
    /// Submit a draft budget for approval.
    Submit {
        /// The new status after submission.
        new_status: BudgetStatus,
        /// The user who submitted the budget.
        submitted_by: UserId,
        /// When the budget was submitted.
        submitted_at: DateTime<Utc>,
    },
    /// Approve a submitted budget.
    Approve {
        /// The new status after approval.
        new_status: BudgetStatus,
        /// The user who approved the budget.
        approved_by: UserId,
        /// When the budget was approved.
        approved_at: DateTime<Utc>,
        /// Optional notes from the approver.
        approval_notes: Option<String>,
    },
    /// Reject a submitted budget.
    Reject {
        /// The new status after rejection.
        new_status: BudgetStatus,
        /// The user who rejected the budget.
        rejected_by: UserId,
        /// When the budget was rejected.
        rejected_at: DateTime<Utc>,
        /// The reason for rejection.
        rejection_reason: String,
    },
    /// Close an approved budget.
    Close {
        /// The new status after closing.
        new_status: BudgetStatus,
        /// The user who closed the budget.
        closed_by: UserId,
        /// When the budget was closed.
        closed_at: DateTime<Utc>,
    },
    /// Reopen a closed budget back to approved.
    Reopen {
        /// The new status after reopening.
        new_status: BudgetStatus,
        /// The user who reopened the budget.
        reopened_by: UserId,
        /// When the budget was reopened.
        reopened_at: DateTime<Utc>,
        /// Optional reason for reopening.
        reopen_reason: Option<String>,
    },
    /// Return a rejected budget to draft for re-editing.
    Return {
        /// The new status after the return.
        new_status: BudgetStatus,
        /// The user who returned the budget.
        returned_by: UserId,
        /// When the budget was returned.
        returned_at: DateTime<Utc>,
    },
}

impl WorkflowAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub fn new_status(&self) -> BudgetStatus {
        match self {
            Self::Submit { new_status, .. }
            | Self::Approve { new_status, .. }
            | Self::Reject { new_status, .. }
            | Self::Close { new_status, .. }
            | Self::Reopen { new_status, .. }
            | Self::Return { new_status, .. } => *new_status,
        }
    }
}
