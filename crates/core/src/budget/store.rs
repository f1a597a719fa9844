//! In-process budget entity store.
//!
//! The store owns durable CRUD and referential integrity only; business
//! rules around status live in the workflow module. Mutations go through a
//! single write lock, and workflow commits use a compare-and-swap on the
//! stored status so two racing transitions cannot both succeed.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use mandira_shared::types::{BudgetId, BudgetItemId, PageRequest, PageResponse};
use mandira_shared::AppConfig;

use super::error::BudgetError;
use super::types::{
    Budget, BudgetFilter, BudgetItem, BudgetPatch, BudgetStatus, CreateBudgetInput,
    CreateBudgetItemInput,
};
use super::validation;
use crate::directory::{Clock, FundDirectory, LedgerDirectory};
use crate::workflow::error::WorkflowError;
use crate::workflow::types::WorkflowAction;

/// Budget entity store.
pub struct BudgetStore {
    funds: Arc<dyn FundDirectory>,
    ledgers: Arc<dyn LedgerDirectory>,
    clock: Arc<dyn Clock>,
    config: AppConfig,
    budgets: RwLock<HashMap<BudgetId, Budget>>,
}

impl BudgetStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new(
        funds: Arc<dyn FundDirectory>,
        ledgers: Arc<dyn LedgerDirectory>,
        clock: Arc<dyn Clock>,
        config: AppConfig,
    ) -> Self {
        Self {
            funds,
            ledgers,
            clock,
            config,
            budgets: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<BudgetId, Budget>> {
        self.budgets.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<BudgetId, Budget>> {
        self.budgets.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validates shape and referential integrity of a create input.
    fn validate_input(&self, input: &CreateBudgetInput) -> Result<(), BudgetError> {
        validation::validate_name(&input.name)?;
        validation::validate_items(input.amount, &input.items)?;

        if !self.funds.exists(input.fund_id) {
            return Err(BudgetError::FundNotFound(input.fund_id));
        }
        for item in &input.items {
            if !self.ledgers.exists(item.ledger_id) {
                return Err(BudgetError::LedgerNotFound(item.ledger_id));
            }
        }
        Ok(())
    }

    fn materialize(&self, input: CreateBudgetInput) -> Budget {
        let now = self.clock.now();
        let items = input
            .items
            .into_iter()
            .map(|item| BudgetItem {
                id: BudgetItemId::new(),
                ledger_id: item.ledger_id,
                budgeted_amount: item.budgeted_amount,
                description: item.description,
            })
            .collect();

        Budget {
            id: BudgetId::new(),
            fund_id: input.fund_id,
            name: input.name,
            amount: input.amount,
            period: input.period,
            status: BudgetStatus::Draft,
            is_active: true,
            notes: input.notes,
            recurrence: input.recurrence,
            items,
            created_by: input.created_by,
            created_at: now,
            updated_at: now,
            submitted_at: None,
            submitted_by: None,
            decided_at: None,
            decided_by: None,
            decision_notes: None,
            closed_at: None,
            version: 1,
        }
    }

    /// Creates a budget in `Draft` status.
    pub fn create(&self, input: CreateBudgetInput) -> Result<Budget, BudgetError> {
        self.validate_input(&input)?;
        let budget = self.materialize(input);
        tracing::debug!(budget_id = %budget.id, fund_id = %budget.fund_id, "budget created");
        self.write().insert(budget.id, budget.clone());
        Ok(budget)
    }

    /// Creates a batch of budgets atomically.
    ///
    /// Every input is validated before any budget is inserted; a single
    /// failure leaves the store untouched.
    pub fn create_many(&self, inputs: Vec<CreateBudgetInput>) -> Result<Vec<Budget>, BudgetError> {
        for input in &inputs {
            self.validate_input(input)?;
        }

        let budgets: Vec<Budget> = inputs.into_iter().map(|i| self.materialize(i)).collect();
        let mut guard = self.write();
        for budget in &budgets {
            guard.insert(budget.id, budget.clone());
        }
        tracing::debug!(count = budgets.len(), "budget batch created");
        Ok(budgets)
    }

    /// Fetches a budget by ID.
    pub fn get(&self, id: BudgetId) -> Result<Budget, BudgetError> {
        self.read()
            .get(&id)
            .cloned()
            .ok_or(BudgetError::NotFound(id))
    }

    /// Applies a partial update.
    ///
    /// Amount, items, and period may only change while the budget is a
    /// draft; name, notes, and the active flag may change at any time
    /// outside the terminal states.
    pub fn update(&self, id: BudgetId, patch: BudgetPatch) -> Result<Budget, BudgetError> {
        let mut guard = self.write();
        let budget = guard.get_mut(&id).ok_or(BudgetError::NotFound(id))?;

        // Closed and Rejected budgets are immutable; Closed only changes
        // through reopen, Rejected only through an explicit return to draft.
        if matches!(budget.status, BudgetStatus::Closed | BudgetStatus::Rejected) {
            return Err(BudgetError::NotEditable(id));
        }

        let touches_structure =
            patch.amount.is_some() || patch.items.is_some() || patch.period.is_some();
        if touches_structure && !budget.status.is_editable() {
            if patch.period.is_some() && patch.amount.is_none() && patch.items.is_none() {
                return Err(BudgetError::PeriodLocked(id));
            }
            return Err(BudgetError::NotEditable(id));
        }

        let next_amount = patch.amount.unwrap_or(budget.amount);
        let next_items: Vec<CreateBudgetItemInput> = match &patch.items {
            Some(items) => items.clone(),
            None => budget
                .items
                .iter()
                .map(|item| CreateBudgetItemInput {
                    ledger_id: item.ledger_id,
                    budgeted_amount: item.budgeted_amount,
                    description: item.description.clone(),
                })
                .collect(),
        };

        if let Some(name) = &patch.name {
            validation::validate_name(name)?;
        }
        validation::validate_items(next_amount, &next_items)?;
        for item in &next_items {
            if !self.ledgers.exists(item.ledger_id) {
                return Err(BudgetError::LedgerNotFound(item.ledger_id));
            }
        }

        if let Some(name) = patch.name {
            budget.name = name;
        }
        budget.amount = next_amount;
        if patch.items.is_some() {
            budget.items = next_items
                .into_iter()
                .map(|item| BudgetItem {
                    id: BudgetItemId::new(),
                    ledger_id: item.ledger_id,
                    budgeted_amount: item.budgeted_amount,
                    description: item.description,
                })
                .collect();
        }
        if let Some(period) = patch.period {
            budget.period = period;
        }
        if let Some(notes) = patch.notes {
            budget.notes = notes;
        }
        if let Some(is_active) = patch.is_active {
            budget.is_active = is_active;
        }
        budget.updated_at = self.clock.now();
        budget.version += 1;

        Ok(budget.clone())
    }

    /// Deletes a draft budget.
    pub fn delete(&self, id: BudgetId) -> Result<(), BudgetError> {
        let mut guard = self.write();
        let budget = guard.get(&id).ok_or(BudgetError::NotFound(id))?;
        if budget.status != BudgetStatus::Draft {
            return Err(BudgetError::DeleteNotDraft(id));
        }
        guard.remove(&id);
        tracing::debug!(budget_id = %id, "budget deleted");
        Ok(())
    }

    /// Returns all budgets matching the filter, ordered by period start,
    /// then name, then ID.
    #[must_use]
    pub fn find(&self, filter: &BudgetFilter) -> Vec<Budget> {
        let mut budgets: Vec<Budget> = self
            .read()
            .values()
            .filter(|b| filter.matches(b))
            .cloned()
            .collect();
        budgets.sort_by(|a, b| {
            (a.period.from, &a.name, a.id).cmp(&(b.period.from, &b.name, b.id))
        });
        budgets
    }

    /// Lists budgets matching the filter, paginated.
    #[must_use]
    pub fn list(&self, filter: &BudgetFilter, page: PageRequest) -> PageResponse<Budget> {
        let page = page.capped(self.config.pagination.max_per_page);
        let matching = self.find(filter);
        let total = matching.len() as u64;
        let data: Vec<Budget> = matching
            .into_iter()
            .skip(page.offset())
            .take(page.limit())
            .collect();
        PageResponse::new(data, page.page, page.per_page, total)
    }

    /// Commits a workflow action if the stored status still matches the
    /// status the transition was computed from.
    ///
    /// This is the compare-and-swap that keeps concurrent transitions on
    /// the same budget from both succeeding: the loser observes the
    /// already-changed status and fails with `InvalidTransition`.
    pub fn apply_action(
        &self,
        id: BudgetId,
        expected_status: BudgetStatus,
        action: &WorkflowAction,
    ) -> Result<Budget, WorkflowError> {
        let mut guard = self.write();
        let budget = guard
            .get_mut(&id)
            .ok_or(WorkflowError::BudgetNotFound(id))?;

        if budget.status != expected_status {
            return Err(WorkflowError::InvalidTransition {
                from: budget.status,
                to: action.new_status(),
            });
        }

        budget.status = action.new_status();
        match action {
            WorkflowAction::Submit {
                submitted_by,
                submitted_at,
                ..
            } => {
                budget.submitted_at = Some(*submitted_at);
                budget.submitted_by = Some(*submitted_by);
                budget.updated_at = *submitted_at;
            }
            WorkflowAction::Approve {
                approved_by,
                approved_at,
                approval_notes,
                ..
            } => {
                budget.decided_at = Some(*approved_at);
                budget.decided_by = Some(*approved_by);
                budget.decision_notes = approval_notes.clone();
                budget.updated_at = *approved_at;
            }
            WorkflowAction::Reject {
                rejected_by,
                rejected_at,
                rejection_reason,
                ..
            } => {
                budget.decided_at = Some(*rejected_at);
                budget.decided_by = Some(*rejected_by);
                budget.decision_notes = Some(rejection_reason.clone());
                budget.updated_at = *rejected_at;
            }
            WorkflowAction::Close {
                closed_at, ..
            } => {
                budget.closed_at = Some(*closed_at);
                budget.updated_at = *closed_at;
            }
            WorkflowAction::Reopen {
                reopened_at,
                reopen_reason,
                ..
            } => {
                budget.closed_at = None;
                if reopen_reason.is_some() {
                    budget.decision_notes = reopen_reason.clone();
                }
                budget.updated_at = *reopened_at;
            }
            WorkflowAction::Return {
                returned_at, ..
            } => {
                budget.submitted_at = None;
                budget.submitted_by = None;
                budget.decided_at = None;
                budget.decided_by = None;
                budget.decision_notes = None;
                budget.updated_at = *returned_at;
            }
        }
        budget.version += 1;

        Ok(budget.clone())
    }
}
