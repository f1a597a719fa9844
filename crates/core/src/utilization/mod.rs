//! Utilization aggregation and classification.

pub mod service;
pub mod types;

#[cfg(test)]
mod props;

pub use service::{display_width, utilization_percent, UtilizationService};
pub use types::{BudgetUtilization, ItemUtilization, UtilizationCategory};
