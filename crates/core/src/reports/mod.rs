//! Read-only reporting projections over the store and aggregator.

pub mod service;
pub mod types;


pub use service::ReportService;
pub use types::{
    BudgetReportRow, CategoryBuckets, ComparisonReport, ComparisonRow, GroupBy, LedgerWiseRow,
    SummaryReport, SummaryTotals, UtilizationReport, VarianceStatus,
};
