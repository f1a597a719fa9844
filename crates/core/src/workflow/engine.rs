//! Stateful workflow engine.
//!
//! Each operation is a single read-validate-commit cycle over one budget:
//! load the current record, run the pure transition, then commit through
//! the store's compare-and-swap so a concurrent transition on the same
//! budget cannot also succeed.

use std::sync::Arc;

use rust_decimal::Decimal;

use mandira_shared::types::{BudgetId, UserId};

use crate::budget::{Budget, BudgetError, BudgetStore};
use crate::directory::{Authorizer, Clock};
use crate::workflow::error::WorkflowError;
use crate::workflow::service::TransitionService;

/// Workflow engine driving budget approval operations.
pub struct WorkflowEngine {
    store: Arc<BudgetStore>,
    authorizer: Arc<dyn Authorizer>,
    clock: Arc<dyn Clock>,
}

impl WorkflowEngine {
    /// Creates an engine over the given store and collaborators.
    #[must_use]
    pub fn new(
        store: Arc<BudgetStore>,
        authorizer: Arc<dyn Authorizer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            authorizer,
            clock,
        }
    }

    fn load(&self, id: BudgetId) -> Result<Budget, WorkflowError> {
        // `get` only fails with NotFound.
        self.store
            .get(id)
            .map_err(|_: BudgetError| WorkflowError::BudgetNotFound(id))
    }

    /// Submits a draft budget for approval.
    ///
    /// The item-sum invariant is re-checked before the transition; a
    /// budget whose items no longer reconcile fails validation without
    /// any status change.
    pub fn submit(&self, id: BudgetId, actor: UserId) -> Result<Budget, WorkflowError> {
        let budget = self.load(id)?;

        let items: Decimal = budget.items.iter().map(|i| i.budgeted_amount).sum();
        if items != budget.amount {
            return Err(WorkflowError::ItemSumMismatch {
                declared: budget.amount,
                items,
            });
        }

        let action = TransitionService::submit(budget.status, actor, self.clock.now())?;
        let updated = self.store.apply_action(id, budget.status, &action)?;
        tracing::info!(budget_id = %id, actor = %actor, "budget submitted");
        Ok(updated)
    }

    /// Approves a submitted budget.
    ///
    /// The actor must hold an approver role per the authorizer.
    pub fn approve(
        &self,
        id: BudgetId,
        actor: UserId,
        notes: Option<String>,
    ) -> Result<Budget, WorkflowError> {
        if !self.authorizer.can_approve(actor) {
            tracing::warn!(budget_id = %id, actor = %actor, "approval denied");
            return Err(WorkflowError::NotAuthorizedToApprove { user_id: actor });
        }

        let budget = self.load(id)?;
        let action = TransitionService::approve(budget.status, actor, notes, self.clock.now())?;
        let updated = self.store.apply_action(id, budget.status, &action)?;
        tracing::info!(budget_id = %id, actor = %actor, "budget approved");
        Ok(updated)
    }

    /// Rejects a submitted budget with a mandatory reason.
    pub fn reject(
        &self,
        id: BudgetId,
        actor: UserId,
        reason: String,
    ) -> Result<Budget, WorkflowError> {
        let budget = self.load(id)?;
        let action = TransitionService::reject(budget.status, actor, reason, self.clock.now())?;
        let updated = self.store.apply_action(id, budget.status, &action)?;
        tracing::info!(budget_id = %id, actor = %actor, "budget rejected");
        Ok(updated)
    }

    /// Closes an approved budget.
    ///
    /// Once closed, the budget no longer accepts ledger postings.
    pub fn close(&self, id: BudgetId, actor: UserId) -> Result<Budget, WorkflowError> {
        let budget = self.load(id)?;
        let action = TransitionService::close(budget.status, actor, self.clock.now())?;
        let updated = self.store.apply_action(id, budget.status, &action)?;
        tracing::info!(budget_id = %id, actor = %actor, "budget closed");
        Ok(updated)
    }

    /// Reopens a closed budget back to approved.
    pub fn reopen(
        &self,
        id: BudgetId,
        actor: UserId,
        reason: Option<String>,
    ) -> Result<Budget, WorkflowError> {
        let budget = self.load(id)?;
        let action = TransitionService::reopen(budget.status, actor, reason, self.clock.now())?;
        let updated = self.store.apply_action(id, budget.status, &action)?;
        tracing::info!(budget_id = %id, actor = %actor, "budget reopened");
        Ok(updated)
    }

    /// Returns a rejected budget to draft for re-editing.
    pub fn return_to_draft(&self, id: BudgetId, actor: UserId) -> Result<Budget, WorkflowError> {
        let budget = self.load(id)?;
        let action = TransitionService::return_to_draft(budget.status, actor, self.clock.now())?;
        let updated = self.store.apply_action(id, budget.status, &action)?;
        tracing::info!(budget_id = %id, actor = %actor, "budget returned to draft");
        Ok(updated)
    }
}
