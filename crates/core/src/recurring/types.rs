//! Recurring budget template types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use mandira_shared::types::{FundId, LedgerId};

/// Recurrence cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceType {
    /// One occurrence every 7 days.
    Weekly,
    /// One occurrence every calendar month.
    Monthly,
}

impl RecurrenceType {
    /// Returns the string representation of the cadence.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Parses a cadence from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }
}

impl fmt::Display for RecurrenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-occurrence amounts for a template item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateAmounts {
    /// The same amount, reused for every occurrence.
    Fixed(Decimal),
    /// One amount per occurrence; the list length must equal the
    /// occurrence count.
    PerOccurrence(Vec<Decimal>),
}

impl TemplateAmounts {
    /// Returns the amount for occurrence `index`, if defined.
    #[must_use]
    pub fn amount_for(&self, index: usize) -> Option<Decimal> {
        match self {
            Self::Fixed(amount) => Some(*amount),
            Self::PerOccurrence(amounts) => amounts.get(index).copied(),
        }
    }
}

/// A line item within a recurring template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateItem {
    /// Ledger the generated items allocate against.
    pub ledger_id: LedgerId,
    /// Optional description copied onto every generated item.
    pub description: Option<String>,
    /// Amounts per occurrence.
    pub amounts: TemplateAmounts,
}

/// A recurring budget template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringTemplate {
    /// Fund the generated budgets belong to.
    pub fund_id: FundId,
    /// Base name; each occurrence is suffixed with its start date.
    pub base_name: String,
    /// Recurrence cadence.
    pub recurrence: RecurrenceType,
    /// Number of occurrences to generate.
    pub occurrences: u32,
    /// Start date of the first occurrence.
    pub start: NaiveDate,
    /// Length in days of each occurrence's period.
    pub duration_days: u32,
    /// Template line items.
    pub items: Vec<TemplateItem>,
}
