//! Expansion of recurring templates into budget batches.

use std::sync::Arc;

use crate::budget::validation::item_sum;
use crate::budget::{
    Budget, BudgetStore, CreateBudgetInput, CreateBudgetItemInput, RecurrenceMarker,
};
use mandira_shared::config::RecurringConfig;
use mandira_shared::types::{TemplateId, UserId};

use super::error::RecurringError;
use super::schedule::occurrence_range;
use super::types::{RecurringTemplate, TemplateAmounts};

/// Expands recurring templates into draft budgets.
///
/// Generation is all-or-nothing: every occurrence is validated before any
/// budget is created, so a failing template never leaves a partial series
/// behind.
pub struct RecurringGenerator {
    store: Arc<BudgetStore>,
    config: RecurringConfig,
}

impl RecurringGenerator {
    /// Creates a generator writing into `store`.
    #[must_use]
    pub fn new(store: Arc<BudgetStore>, config: RecurringConfig) -> Self {
        Self { store, config }
    }

    /// Generates one draft budget per occurrence of `template`.
    ///
    /// All generated budgets share a freshly minted template ID in their
    /// recurrence markers and are named `"<base_name> <occurrence start>"`.
    pub fn generate(
        &self,
        template: &RecurringTemplate,
        created_by: UserId,
    ) -> Result<Vec<Budget>, RecurringError> {
        self.validate_template(template)?;

        let template_id = TemplateId::new();
        let mut inputs = Vec::with_capacity(template.occurrences as usize);
        for index in 0..template.occurrences {
            inputs.push(self.occurrence_input(template, template_id, index, created_by)?);
        }

        let budgets = self.store.create_many(inputs)?;
        tracing::info!(
            template_id = %template_id,
            base_name = %template.base_name,
            recurrence = %template.recurrence,
            count = budgets.len(),
            "recurring series generated"
        );
        Ok(budgets)
    }

    fn validate_template(&self, template: &RecurringTemplate) -> Result<(), RecurringError> {
        if template.occurrences == 0 {
            return Err(RecurringError::ZeroOccurrences);
        }
        if template.occurrences > self.config.max_occurrences {
            return Err(RecurringError::TooManyOccurrences {
                max: self.config.max_occurrences,
            });
        }
        if template.duration_days == 0 {
            return Err(RecurringError::ZeroDuration);
        }
        if template.items.is_empty() {
            return Err(RecurringError::EmptyItems);
        }
        for item in &template.items {
            if let TemplateAmounts::PerOccurrence(amounts) = &item.amounts
                && amounts.len() != template.occurrences as usize
            {
                return Err(RecurringError::AmountCountMismatch {
                    expected: template.occurrences,
                    got: amounts.len(),
                });
            }
        }
        Ok(())
    }

    fn occurrence_input(
        &self,
        template: &RecurringTemplate,
        template_id: TemplateId,
        index: u32,
        created_by: UserId,
    ) -> Result<CreateBudgetInput, RecurringError> {
        let period = occurrence_range(
            template.start,
            template.recurrence,
            index,
            template.duration_days,
        )?;

        let mut items = Vec::with_capacity(template.items.len());
        for item in &template.items {
            // Length was checked in validate_template, so the index is
            // always in bounds for per-occurrence lists.
            let budgeted_amount = item.amounts.amount_for(index as usize).ok_or(
                RecurringError::AmountCountMismatch {
                    expected: template.occurrences,
                    got: index as usize,
                },
            )?;
            items.push(CreateBudgetItemInput {
                ledger_id: item.ledger_id,
                budgeted_amount,
                description: item.description.clone(),
            });
        }

        let amount = item_sum(&items);
        Ok(CreateBudgetInput {
            fund_id: template.fund_id,
            name: format!("{} {}", template.base_name, period.from),
            amount,
            period,
            notes: None,
            recurrence: Some(RecurrenceMarker {
                template_id,
                base_name: template.base_name.clone(),
                occurrence_index: index,
            }),
            items,
            created_by,
        })
    }
}
