//! Recurring generation errors.

use thiserror::Error;

use crate::budget::BudgetError;
use mandira_shared::error::AppError;

/// Errors produced while validating or expanding a recurring template.
#[derive(Debug, Error)]
pub enum RecurringError {
    /// The template requested zero occurrences.
    #[error("A recurring template must request at least one occurrence")]
    ZeroOccurrences,

    /// The template requested more occurrences than allowed.
    #[error("A recurring template may request at most {max} occurrences")]
    TooManyOccurrences {
        /// Configured ceiling.
        max: u32,
    },

    /// Each occurrence must span at least one day.
    #[error("Occurrence duration must be at least one day")]
    ZeroDuration,

    /// The template carries no line items.
    #[error("A recurring template must have at least one item")]
    EmptyItems,

    /// A per-occurrence amount list does not match the occurrence count.
    #[error("Expected {expected} per-occurrence amounts, got {got}")]
    AmountCountMismatch {
        /// Occurrence count declared by the template.
        expected: u32,
        /// Length of the offending amount list.
        got: usize,
    },

    /// Advancing the schedule walked off the calendar.
    #[error("Occurrence date arithmetic overflowed the calendar")]
    DateOverflow,

    /// A generated budget failed budget-level validation.
    #[error(transparent)]
    Budget(#[from] BudgetError),
}

impl RecurringError {
    /// HTTP-style status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ZeroOccurrences
            | Self::TooManyOccurrences { .. }
            | Self::ZeroDuration
            | Self::EmptyItems
            | Self::AmountCountMismatch { .. } => 400,
            Self::DateOverflow => 422,
            Self::Budget(err) => err.status_code(),
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroOccurrences => "RECURRING_ZERO_OCCURRENCES",
            Self::TooManyOccurrences { .. } => "RECURRING_TOO_MANY_OCCURRENCES",
            Self::ZeroDuration => "RECURRING_ZERO_DURATION",
            Self::EmptyItems => "RECURRING_EMPTY_ITEMS",
            Self::AmountCountMismatch { .. } => "RECURRING_AMOUNT_COUNT_MISMATCH",
            Self::DateOverflow => "RECURRING_DATE_OVERFLOW",
            Self::Budget(err) => err.error_code(),
        }
    }
}

impl From<RecurringError> for AppError {
    fn from(err: RecurringError) -> Self {
        match err {
            RecurringError::Budget(inner) => inner.into(),
            RecurringError::DateOverflow => AppError::Referential(err.to_string()),
            _ => AppError::Validation(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(RecurringError::ZeroOccurrences.status_code(), 400);
        assert_eq!(
            RecurringError::TooManyOccurrences { max: 60 }.status_code(),
            400
        );
        assert_eq!(RecurringError::DateOverflow.status_code(), 422);
    }

    #[test]
    fn test_budget_errors_pass_through() {
        let err = RecurringError::Budget(BudgetError::EmptyItems);
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "EMPTY_ITEMS");
    }
}
