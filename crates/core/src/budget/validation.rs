//! Pure validation rules for budget shape invariants.

use rust_decimal::Decimal;

use super::error::BudgetError;
use super::types::CreateBudgetItemInput;

/// Returns the sum of item amounts.
#[must_use]
pub fn item_sum(items: &[CreateBudgetItemInput]) -> Decimal {
    items.iter().map(|item| item.budgeted_amount).sum()
}

/// Validates a budget name.
pub fn validate_name(name: &str) -> Result<(), BudgetError> {
    if name.trim().is_empty() {
        return Err(BudgetError::NameRequired);
    }
    Ok(())
}

/// Validates the declared amount against its items.
///
/// Checks that items are present, no amount is negative, and the sum of
/// item amounts equals the declared budget amount.
pub fn validate_items(
    declared: Decimal,
    items: &[CreateBudgetItemInput],
) -> Result<(), BudgetError> {
    if items.is_empty() {
        return Err(BudgetError::EmptyItems);
    }

    if declared < Decimal::ZERO || items.iter().any(|item| item.budgeted_amount < Decimal::ZERO) {
        return Err(BudgetError::NegativeAmount);
    }

    let sum = item_sum(items);
    if sum != declared {
        return Err(BudgetError::ItemSumMismatch {
            declared,
            items: sum,
        });
    }

    Ok(())
}
