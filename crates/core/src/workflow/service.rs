//! Pure state machine logic for budget approval transitions.
//!
//! All methods are associated functions that validate and describe a
//! transition, returning the appropriate `WorkflowAction` with audit
//! trail information. Applying the action to the store is the engine's
//! job; nothing here touches shared state.

use chrono::{DateTime, Utc};

use mandira_shared::types::UserId;

use crate::budget::BudgetStatus;
use crate::workflow::error::WorkflowError;
use crate::workflow::types::WorkflowAction;

/// Stateless service describing budget workflow transitions.
pub struct TransitionService;

impl TransitionService {
    /// Submit a draft budget for approval.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::InvalidTransition` if the budget is not in
    /// `Draft` status. A second submit on the same budget is an error,
    /// never a silent no-op.
    pub fn submit(
        current_status: BudgetStatus,
        submitted_by: UserId,
        at: DateTime<Utc>,
    ) -> Result<WorkflowAction, WorkflowError> {
        match current_status {
            BudgetStatus::Draft => Ok(WorkflowAction::Submit {
                new_status: BudgetStatus::Submitted,
                submitted_by,
                submitted_at: at,
            }),
            _ => Err(WorkflowError::InvalidTransition {
                from: current_status,
                to: BudgetStatus::Submitted,
            }),
        }
    }

    /// Approve a submitted budget.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::InvalidTransition` if the budget is not in
    /// `Submitted` status.
    pub fn approve(
        current_status: BudgetStatus,
        approved_by: UserId,
        approval_notes: Option<String>,
        at: DateTime<Utc>,
    ) -> Result<WorkflowAction, WorkflowError> {
        match current_status {
            BudgetStatus::Submitted => Ok(WorkflowAction::Approve {
                new_status: BudgetStatus::Approved,
                approved_by,
                approved_at: at,
                approval_notes,
            }),
            _ => Err(WorkflowError::InvalidTransition {
                from: current_status,
                to: BudgetStatus::Approved,
            }),
        }
    }

    /// Reject a submitted budget.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::RejectionReasonRequired` if the reason is
    /// empty, `WorkflowError::InvalidTransition` if the budget is not in
    /// `Submitted` status.
    pub fn reject(
        current_status: BudgetStatus,
        rejected_by: UserId,
        rejection_reason: String,
        at: DateTime<Utc>,
    ) -> Result<WorkflowAction, WorkflowError> {
        if rejection_reason.trim().is_empty() {
            return Err(WorkflowError::RejectionReasonRequired);
        }

        match current_status {
            BudgetStatus::Submitted => Ok(WorkflowAction::Reject {
                new_status: BudgetStatus::Rejected,
                rejected_by,
                rejected_at: at,
                rejection_reason,
            }),
            _ => Err(WorkflowError::InvalidTransition {
                from: current_status,
                to: BudgetStatus::Rejected,
            }),
        }
    }

    /// Close an approved budget.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::InvalidTransition` if the budget is not in
    /// `Approved` status.
    pub fn close(
        current_status: BudgetStatus,
        closed_by: UserId,
        at: DateTime<Utc>,
    ) -> Result<WorkflowAction, WorkflowError> {
        match current_status {
            BudgetStatus::Approved => Ok(WorkflowAction::Close {
                new_status: BudgetStatus::Closed,
                closed_by,
                closed_at: at,
            }),
            _ => Err(WorkflowError::InvalidTransition {
                from: current_status,
                to: BudgetStatus::Closed,
            }),
        }
    }

    /// Reopen a closed budget back to approved.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::InvalidTransition` if the budget is not in
    /// `Closed` status.
    pub fn reopen(
        current_status: BudgetStatus,
        reopened_by: UserId,
        reopen_reason: Option<String>,
        at: DateTime<Utc>,
    ) -> Result<WorkflowAction, WorkflowError> {
        match current_status {
            BudgetStatus::Closed => Ok(WorkflowAction::Reopen {
                new_status: BudgetStatus::Approved,
                reopened_by,
                reopened_at: at,
                reopen_reason,
            }),
            _ => Err(WorkflowError::InvalidTransition {
                from: current_status,
                to: BudgetStatus::Approved,
            }),
        }
    }

    /// Return a rejected budget to draft for re-editing and resubmission.
    ///
    /// This is an explicit operation; rejection never returns a budget to
    /// draft automatically.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::InvalidTransition` if the budget is not in
    /// `Rejected` status.
    pub fn return_to_draft(
        current_status: BudgetStatus,
        returned_by: UserId,
        at: DateTime<Utc>,
    ) -> Result<WorkflowAction, WorkflowError> {
        match current_status {
            BudgetStatus::Rejected => Ok(WorkflowAction::Return {
                new_status: BudgetStatus::Draft,
                returned_by,
                returned_at: at,
            }),
            _ => Err(WorkflowError::InvalidTransition {
                from: current_status,
                to: BudgetStatus::Draft,
            }),
        }
    }

    /// Check if a status transition is valid.
    ///
    /// Valid transitions:
    /// - Draft → Submitted (submit)
    /// - Submitted → Approved (approve)
    /// - Submitted → Rejected (reject)
    /// - Approved → Closed (close)
    /// - Closed → Approved (reopen)
    /// - Rejected → Draft (return)
    #[must_use]
    pub fn is_valid_transition(from: BudgetStatus, to: BudgetStatus) -> bool {
        matches!(
            (from, to),
            (BudgetStatus::Draft, BudgetStatus::Submitted)
                | (
                    BudgetStatus::Submitted,
                    BudgetStatus::Approved | BudgetStatus::Rejected
                )
                | (BudgetStatus::Approved, BudgetStatus::Closed)
                | (BudgetStatus::Closed, BudgetStatus::Approved)
                | (BudgetStatus::Rejected, BudgetStatus::Draft)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn test_submit_from_draft() {
        let user_id = UserId::new();
        let result = TransitionService::submit(BudgetStatus::Draft, user_id, now());
        assert!(result.is_ok());
        let action = result.expect("submit from draft");
        assert_eq!(action.new_status(), BudgetStatus::Submitted);
    }

    #[test]
    fn test_submit_from_non_draft_fails() {
        for status in [
            BudgetStatus::Submitted,
            BudgetStatus::Approved,
            BudgetStatus::Rejected,
            BudgetStatus::Closed,
        ] {
            let result = TransitionService::submit(status, UserId::new(), now());
            assert!(matches!(
                result,
                Err(WorkflowError::InvalidTransition { .. })
            ));
        }
    }

    #[test]
    fn test_approve_from_submitted() {
        let result = TransitionService::approve(
            BudgetStatus::Submitted,
            UserId::new(),
            Some("looks right".to_string()),
            now(),
        );
        assert_eq!(
            result.expect("approve from submitted").new_status(),
            BudgetStatus::Approved
        );
    }

    #[test]
    fn test_approve_from_draft_fails() {
        let result = TransitionService::approve(BudgetStatus::Draft, UserId::new(), None, now());
        assert!(matches!(
            result,
            Err(WorkflowError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_reject_with_reason() {
        let result = TransitionService::reject(
            BudgetStatus::Submitted,
            UserId::new(),
            "Amounts unclear".to_string(),
            now(),
        );
        assert_eq!(
            result.expect("reject with reason").new_status(),
            BudgetStatus::Rejected
        );
    }

    #[test]
    fn test_reject_empty_reason_fails() {
        let result =
            TransitionService::reject(BudgetStatus::Submitted, UserId::new(), String::new(), now());
        assert!(matches!(result, Err(WorkflowError::RejectionReasonRequired)));
    }

    #[test]
    fn test_reject_whitespace_reason_fails() {
        let result = TransitionService::reject(
            BudgetStatus::Submitted,
            UserId::new(),
            "   ".to_string(),
            now(),
        );
        assert!(matches!(result, Err(WorkflowError::RejectionReasonRequired)));
    }

    #[test]
    fn test_close_from_approved() {
        let result = TransitionService::close(BudgetStatus::Approved, UserId::new(), now());
        assert_eq!(
            result.expect("close from approved").new_status(),
            BudgetStatus::Closed
        );
    }

    #[test]
    fn test_close_from_non_approved_fails() {
        let result = TransitionService::close(BudgetStatus::Submitted, UserId::new(), now());
        assert!(matches!(
            result,
            Err(WorkflowError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_reopen_from_closed() {
        let result = TransitionService::reopen(
            BudgetStatus::Closed,
            UserId::new(),
            Some("late invoices".to_string()),
            now(),
        );
        assert_eq!(
            result.expect("reopen from closed").new_status(),
            BudgetStatus::Approved
        );
    }

    #[test]
    fn test_reopen_from_approved_fails() {
        let result = TransitionService::reopen(BudgetStatus::Approved, UserId::new(), None, now());
        assert!(matches!(
            result,
            Err(WorkflowError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_return_to_draft_from_rejected() {
        let result = TransitionService::return_to_draft(BudgetStatus::Rejected, UserId::new(), now());
        assert_eq!(
            result.expect("return from rejected").new_status(),
            BudgetStatus::Draft
        );
    }

    #[test]
    fn test_return_to_draft_from_draft_fails() {
        let result = TransitionService::return_to_draft(BudgetStatus::Draft, UserId::new(), now());
        assert!(matches!(
            result,
            Err(WorkflowError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_is_valid_transition() {
        // Valid transitions
        assert!(TransitionService::is_valid_transition(
            BudgetStatus::Draft,
            BudgetStatus::Submitted
        ));
        assert!(TransitionService::is_valid_transition(
            BudgetStatus::Submitted,
            BudgetStatus::Approved
        ));
        assert!(TransitionService::is_valid_transition(
            BudgetStatus::Submitted,
            BudgetStatus::Rejected
        ));
        assert!(TransitionService::is_valid_transition(
            BudgetStatus::Approved,
            BudgetStatus::Closed
        ));
        assert!(TransitionService::is_valid_transition(
            BudgetStatus::Closed,
            BudgetStatus::Approved
        ));
        assert!(TransitionService::is_valid_transition(
            BudgetStatus::Rejected,
            BudgetStatus::Draft
        ));

        // Invalid transitions
        assert!(!TransitionService::is_valid_transition(
            BudgetStatus::Draft,
            BudgetStatus::Approved
        ));
        assert!(!TransitionService::is_valid_transition(
            BudgetStatus::Draft,
            BudgetStatus::Closed
        ));
        assert!(!TransitionService::is_valid_transition(
            BudgetStatus::Closed,
            BudgetStatus::Draft
        ));
        assert!(!TransitionService::is_valid_transition(
            BudgetStatus::Rejected,
            BudgetStatus::Submitted
        ));
    }
}
