//! Occurrence date arithmetic.
//!
//! Weekly cadences advance by exact 7-day steps; monthly cadences advance
//! by calendar months, clamping to the last day of shorter months the way
//! `chrono` does (Jan 31 + 1 month = Feb 28/29).

use chrono::{Days, Months, NaiveDate};

use super::error::RecurringError;
use super::types::RecurrenceType;
use crate::budget::DateRange;

/// Returns the start date of occurrence `index` (0-indexed).
pub fn occurrence_start(
    start: NaiveDate,
    recurrence: RecurrenceType,
    index: u32,
) -> Result<NaiveDate, RecurringError> {
    let advanced = match recurrence {
        RecurrenceType::Weekly => start.checked_add_days(Days::new(7 * u64::from(index))),
        RecurrenceType::Monthly => start.checked_add_months(Months::new(index)),
    };
    advanced.ok_or(RecurringError::DateOverflow)
}

/// Returns the period of occurrence `index`, spanning `duration_days`
/// days inclusive of its start date.
pub fn occurrence_range(
    start: NaiveDate,
    recurrence: RecurrenceType,
    index: u32,
    duration_days: u32,
) -> Result<DateRange, RecurringError> {
    let from = occurrence_start(start, recurrence, index)?;
    let to = from
        .checked_add_days(Days::new(u64::from(duration_days) - 1))
        .ok_or(RecurringError::DateOverflow)?;
    Ok(DateRange::new(from, to)?)
}
