//! Property-based tests for the transition service.

use chrono::Utc;
use proptest::prelude::*;
use uuid::Uuid;

use mandira_shared::types::UserId;

use crate::budget::BudgetStatus;
use crate::workflow::error::WorkflowError;
use crate::workflow::service::TransitionService;
use crate::workflow::types::WorkflowAction;

/// Strategy for generating random budget statuses.
fn arb_status() -> impl Strategy<Value = BudgetStatus> {
    prop_oneof![
        Just(BudgetStatus::Draft),
        Just(BudgetStatus::Submitted),
        Just(BudgetStatus::Approved),
        Just(BudgetStatus::Rejected),
        Just(BudgetStatus::Closed),
    ]
}

/// Strategy for generating random user IDs.
fn arb_user() -> impl Strategy<Value = UserId> {
    any::<u128>().prop_map(|n| UserId::from_uuid(Uuid::from_u128(n)))
}

/// Strategy for generating non-empty reason strings.
fn arb_reason() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,80}".prop_map(|s| format!("r{s}"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A submit succeeds exactly when the budget is in Draft, and the
    /// resulting action carries the actor.
    #[test]
    fn prop_submit_only_from_draft(status in arb_status(), user in arb_user()) {
        let result = TransitionService::submit(status, user, Utc::now());
        match status {
            BudgetStatus::Draft => {
                let action = result.expect("submit from draft");
                prop_assert_eq!(action.new_status(), BudgetStatus::Submitted);
                if let WorkflowAction::Submit { submitted_by, .. } = action {
                    prop_assert_eq!(submitted_by, user);
                } else {
                    prop_assert!(false, "expected Submit action");
                }
            }
            _ => prop_assert!(
                matches!(result, Err(WorkflowError::InvalidTransition { .. })),
                "expected InvalidTransition",
            ),
        }
    }

    /// An approve succeeds exactly when the budget is in Submitted.
    #[test]
    fn prop_approve_only_from_submitted(status in arb_status(), user in arb_user()) {
        let result = TransitionService::approve(status, user, None, Utc::now());
        match status {
            BudgetStatus::Submitted => {
                prop_assert_eq!(result.expect("approve").new_status(), BudgetStatus::Approved);
            }
            _ => prop_assert!(
                matches!(result, Err(WorkflowError::InvalidTransition { .. })),
                "expected InvalidTransition",
            ),
        }
    }

    /// A reject with a non-empty reason succeeds exactly from Submitted
    /// and carries the reason verbatim.
    #[test]
    fn prop_reject_only_from_submitted(
        status in arb_status(),
        user in arb_user(),
        reason in arb_reason(),
    ) {
        let result = TransitionService::reject(status, user, reason.clone(), Utc::now());
        match status {
            BudgetStatus::Submitted => {
                let action = result.expect("reject");
                prop_assert_eq!(action.new_status(), BudgetStatus::Rejected);
                if let WorkflowAction::Reject { rejection_reason, .. } = action {
                    prop_assert_eq!(rejection_reason, reason);
                } else {
                    prop_assert!(false, "expected Reject action");
                }
            }
            _ => prop_assert!(
                matches!(result, Err(WorkflowError::InvalidTransition { .. })),
                "expected InvalidTransition",
            ),
        }
    }

    /// An empty or whitespace reason always fails rejection, regardless
    /// of status.
    #[test]
    fn prop_reject_blank_reason_always_fails(
        status in arb_status(),
        user in arb_user(),
        blanks in " {0,10}",
    ) {
        let result = TransitionService::reject(status, user, blanks, Utc::now());
        prop_assert!(matches!(result, Err(WorkflowError::RejectionReasonRequired)));
    }

    /// Every action a transition function produces lands on a status the
    /// transition table declares reachable from the starting status.
    #[test]
    fn prop_actions_agree_with_transition_table(status in arb_status(), user in arb_user()) {
        let now = Utc::now();
        let attempts = [
            TransitionService::submit(status, user, now),
            TransitionService::approve(status, user, None, now),
            TransitionService::reject(status, user, "reason".to_string(), now),
            TransitionService::close(status, user, now),
            TransitionService::reopen(status, user, None, now),
            TransitionService::return_to_draft(status, user, now),
        ];

        for attempt in attempts {
            if let Ok(action) = attempt {
                prop_assert!(TransitionService::is_valid_transition(status, action.new_status()));
            }
        }
    }

    /// From any status, exactly as many operations succeed as the
    /// transition table has outgoing edges.
    #[test]
    fn prop_outgoing_edge_count(status in arb_status(), user in arb_user()) {
        let now = Utc::now();
        let successes = [
            TransitionService::submit(status, user, now).is_ok(),
            TransitionService::approve(status, user, None, now).is_ok(),
            TransitionService::reject(status, user, "reason".to_string(), now).is_ok(),
            TransitionService::close(status, user, now).is_ok(),
            TransitionService::reopen(status, user, None, now).is_ok(),
            TransitionService::return_to_draft(status, user, now).is_ok(),
        ]
        .iter()
        .filter(|ok| **ok)
        .count();

        let expected = match status {
            BudgetStatus::Submitted => 2,
            BudgetStatus::Draft
            | BudgetStatus::Approved
            | BudgetStatus::Rejected
            | BudgetStatus::Closed => 1,
        };
        prop_assert_eq!(successes, expected);
    }
}
