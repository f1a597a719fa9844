//! Recurring budget generation.
//!
//! A [`RecurringTemplate`] describes a weekly or monthly series of
//! budgets; the [`RecurringGenerator`] expands it into individual draft
//! budgets in one atomic batch.

pub mod error;
pub mod generator;
pub mod schedule;
pub mod types;


pub use error::RecurringError;
pub use generator::RecurringGenerator;
pub use types::{RecurrenceType, RecurringTemplate, TemplateAmounts, TemplateItem};
