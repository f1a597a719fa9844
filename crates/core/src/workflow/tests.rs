//! Engine-level workflow tests against the in-process store.

use std::sync::Arc;
use std::thread;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use mandira_shared::types::UserId;
use mandira_shared::AppConfig;

use crate::budget::{
    BudgetStatus, BudgetStore, CreateBudgetInput, CreateBudgetItemInput, DateRange,
};
use crate::directory::memory::{
    FixedClock, MemoryFundDirectory, MemoryLedgerDirectory, RoleAuthorizer,
};

use super::error::WorkflowError;
use super::WorkflowEngine;

struct Fixture {
    store: Arc<BudgetStore>,
    engine: Arc<WorkflowEngine>,
    authorizer: Arc<RoleAuthorizer>,
    clerk: UserId,
    approver: UserId,
    input: CreateBudgetInput,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn fixture() -> Fixture {
    let funds = Arc::new(MemoryFundDirectory::new());
    let ledgers = Arc::new(MemoryLedgerDirectory::new());
    let clock = Arc::new(FixedClock::at(date(2025, 6, 1)));
    let authorizer = Arc::new(RoleAuthorizer::new());

    let fund = funds.insert("Annadanam Fund");
    let ledger = ledgers.insert("Groceries", "Kitchen");

    let store = Arc::new(BudgetStore::new(
        funds,
        ledgers,
        clock.clone(),
        AppConfig::default(),
    ));
    let engine = Arc::new(WorkflowEngine::new(
        store.clone(),
        authorizer.clone(),
        clock,
    ));

    let clerk = UserId::new();
    let approver = UserId::new();
    authorizer.grant(approver);

    let input = CreateBudgetInput {
        fund_id: fund,
        name: "June kitchen".to_string(),
        amount: dec!(1500),
        period: DateRange::new(date(2025, 6, 1), date(2025, 6, 30)).expect("valid range"),
        notes: None,
        recurrence: None,
        items: vec![CreateBudgetItemInput {
            ledger_id: ledger,
            budgeted_amount: dec!(1500),
            description: None,
        }],
        created_by: clerk,
    };

    Fixture {
        store,
        engine,
        authorizer,
        clerk,
        approver,
        input,
    }
}

#[test]
fn test_submit_records_audit_trail() {
    let fx = fixture();
    let budget = fx.store.create(fx.input.clone()).expect("create");

    let submitted = fx.engine.submit(budget.id, fx.clerk).expect("submit");
    assert_eq!(submitted.status, BudgetStatus::Submitted);
    assert_eq!(submitted.submitted_by, Some(fx.clerk));
    assert!(submitted.submitted_at.is_some());
    assert_eq!(submitted.version, budget.version + 1);
}

#[test]
fn test_double_submit_fails() {
    let fx = fixture();
    let budget = fx.store.create(fx.input.clone()).expect("create");

    fx.engine.submit(budget.id, fx.clerk).expect("first submit");
    let second = fx.engine.submit(budget.id, fx.clerk);
    assert!(matches!(
        second,
        Err(WorkflowError::InvalidTransition {
            from: BudgetStatus::Submitted,
            ..
        })
    ));
}

#[test]
fn test_approve_skipping_submit_fails() {
    let fx = fixture();
    let budget = fx.store.create(fx.input.clone()).expect("create");

    let result = fx.engine.approve(budget.id, fx.approver, None);
    assert!(matches!(
        result,
        Err(WorkflowError::InvalidTransition {
            from: BudgetStatus::Draft,
            ..
        })
    ));
}

#[test]
fn test_approve_requires_role() {
    let fx = fixture();
    let budget = fx.store.create(fx.input.clone()).expect("create");
    fx.engine.submit(budget.id, fx.clerk).expect("submit");

    let denied = fx.engine.approve(budget.id, fx.clerk, None);
    assert!(matches!(
        denied,
        Err(WorkflowError::NotAuthorizedToApprove { user_id }) if user_id == fx.clerk
    ));

    // Status is untouched by the failed attempt.
    let current = fx.store.get(budget.id).expect("get");
    assert_eq!(current.status, BudgetStatus::Submitted);
}

#[test]
fn test_approve_records_notes() {
    let fx = fixture();
    let budget = fx.store.create(fx.input.clone()).expect("create");
    fx.engine.submit(budget.id, fx.clerk).expect("submit");

    let approved = fx
        .engine
        .approve(budget.id, fx.approver, Some("within plan".to_string()))
        .expect("approve");
    assert_eq!(approved.status, BudgetStatus::Approved);
    assert_eq!(approved.decided_by, Some(fx.approver));
    assert_eq!(approved.decision_notes.as_deref(), Some("within plan"));
}

#[test]
fn test_reject_requires_reason() {
    let fx = fixture();
    let budget = fx.store.create(fx.input.clone()).expect("create");
    fx.engine.submit(budget.id, fx.clerk).expect("submit");

    let empty = fx.engine.reject(budget.id, fx.approver, String::new());
    assert!(matches!(empty, Err(WorkflowError::RejectionReasonRequired)));

    let rejected = fx
        .engine
        .reject(budget.id, fx.approver, "no quotes attached".to_string())
        .expect("reject");
    assert_eq!(rejected.status, BudgetStatus::Rejected);
    assert_eq!(
        rejected.decision_notes.as_deref(),
        Some("no quotes attached")
    );
}

#[test]
fn test_close_then_reopen_round_trip() {
    let fx = fixture();
    let budget = fx.store.create(fx.input.clone()).expect("create");
    fx.engine.submit(budget.id, fx.clerk).expect("submit");
    fx.engine
        .approve(budget.id, fx.approver, None)
        .expect("approve");

    let closed = fx.engine.close(budget.id, fx.approver).expect("close");
    assert_eq!(closed.status, BudgetStatus::Closed);
    assert!(closed.closed_at.is_some());
    assert!(!closed.status.accepts_postings());

    let reopened = fx
        .engine
        .reopen(budget.id, fx.approver, Some("late invoices".to_string()))
        .expect("reopen");
    assert_eq!(reopened.status, BudgetStatus::Approved);
    assert!(reopened.closed_at.is_none());
    assert!(reopened.status.accepts_postings());
}

#[test]
fn test_close_from_submitted_fails() {
    let fx = fixture();
    let budget = fx.store.create(fx.input.clone()).expect("create");
    fx.engine.submit(budget.id, fx.clerk).expect("submit");

    let result = fx.engine.close(budget.id, fx.approver);
    assert!(matches!(
        result,
        Err(WorkflowError::InvalidTransition { .. })
    ));
}

#[test]
fn test_rejected_budget_returns_to_draft_and_resubmits() {
    let fx = fixture();
    let budget = fx.store.create(fx.input.clone()).expect("create");
    fx.engine.submit(budget.id, fx.clerk).expect("submit");
    fx.engine
        .reject(budget.id, fx.approver, "wrong fund".to_string())
        .expect("reject");

    let returned = fx
        .engine
        .return_to_draft(budget.id, fx.clerk)
        .expect("return");
    assert_eq!(returned.status, BudgetStatus::Draft);
    assert!(returned.submitted_at.is_none());
    assert!(returned.decision_notes.is_none());

    let resubmitted = fx.engine.submit(budget.id, fx.clerk).expect("resubmit");
    assert_eq!(resubmitted.status, BudgetStatus::Submitted);
}

#[test]
fn test_unknown_budget() {
    let fx = fixture();
    let missing = mandira_shared::types::BudgetId::new();
    assert!(matches!(
        fx.engine.submit(missing, fx.clerk),
        Err(WorkflowError::BudgetNotFound(_))
    ));
}

#[test]
fn test_concurrent_submits_only_one_wins() {
    let fx = fixture();
    let budget = fx.store.create(fx.input.clone()).expect("create");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = fx.engine.clone();
            let clerk = fx.clerk;
            let id = budget.id;
            thread::spawn(move || engine.submit(id, clerk))
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("thread join"))
        .collect();

    let wins = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1);
    for result in results {
        if let Err(err) = result {
            assert!(matches!(err, WorkflowError::InvalidTransition { .. }));
        }
    }
}

#[test]
fn test_concurrent_approve_and_reject_are_exclusive() {
    let fx = fixture();
    fx.authorizer.grant(fx.clerk);
    let budget = fx.store.create(fx.input.clone()).expect("create");
    fx.engine.submit(budget.id, fx.clerk).expect("submit");

    let approve = {
        let engine = fx.engine.clone();
        let actor = fx.approver;
        let id = budget.id;
        thread::spawn(move || engine.approve(id, actor, None).map(|b| b.status))
    };
    let reject = {
        let engine = fx.engine.clone();
        let actor = fx.clerk;
        let id = budget.id;
        thread::spawn(move || {
            engine
                .reject(id, actor, "duplicate request".to_string())
                .map(|b| b.status)
        })
    };

    let outcomes = [
        approve.join().expect("thread join"),
        reject.join().expect("thread join"),
    ];
    let wins = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1);

    let final_status = fx.store.get(budget.id).expect("get").status;
    assert!(matches!(
        final_status,
        BudgetStatus::Approved | BudgetStatus::Rejected
    ));
}

#[test]
fn test_item_sum_recheck_uses_current_items() {
    let fx = fixture();
    let budget = fx.store.create(fx.input.clone()).expect("create");

    // Sum invariant holds on anything the store produced, so the
    // pre-submit recheck passes and the submit goes through.
    let sum: Decimal = budget.items.iter().map(|i| i.budgeted_amount).sum();
    assert_eq!(sum, budget.amount);
    assert!(fx.engine.submit(budget.id, fx.clerk).is_ok());
}
