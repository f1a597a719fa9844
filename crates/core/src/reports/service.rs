//! Report assembly.
//!
//! Pure projections over the budget store and utilization aggregator;
//! nothing here writes. Grouped outputs use ordered maps so report rows
//! come back in a stable order regardless of store iteration order.

use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::budget::{Budget, BudgetFilter, BudgetStore};
use crate::directory::{FundDirectory, LedgerDirectory};
use crate::utilization::{utilization_percent, UtilizationService};
use mandira_shared::config::AppConfig;
use mandira_shared::types::LedgerId;

use super::types::{
    BudgetReportRow, CategoryBuckets, ComparisonReport, ComparisonRow, GroupBy, LedgerWiseRow,
    SummaryReport, SummaryTotals, UtilizationReport, VarianceStatus,
};

/// Builds summary, comparison, and utilization reports.
pub struct ReportService {
    store: Arc<BudgetStore>,
    utilization: UtilizationService,
    funds: Arc<dyn FundDirectory>,
    ledgers: Arc<dyn LedgerDirectory>,
    config: AppConfig,
}

impl ReportService {
    /// Creates a report service over the given store and aggregator.
    #[must_use]
    pub fn new(
        store: Arc<BudgetStore>,
        utilization: UtilizationService,
        funds: Arc<dyn FundDirectory>,
        ledgers: Arc<dyn LedgerDirectory>,
        config: AppConfig,
    ) -> Self {
        Self {
            store,
            utilization,
            funds,
            ledgers,
            config,
        }
    }

    /// Summary report: one row per matching budget plus totals over
    /// exactly those rows.
    #[must_use]
    pub fn summary(&self, filter: &BudgetFilter) -> SummaryReport {
        let budgets = self.rows(filter);

        let summary = SummaryTotals {
            total_budget_amount: budgets.iter().map(|r| r.budget_amount).sum(),
            total_utilized: budgets.iter().map(|r| r.utilized).sum(),
            total_remaining: budgets.iter().map(|r| r.remaining).sum(),
            total_budgets: budgets.len() as u64,
        };

        tracing::debug!(rows = budgets.len(), "summary report assembled");
        SummaryReport {
            currency: self.config.currency.clone(),
            budgets,
            summary,
        }
    }

    /// Comparison report: budgets aggregated along one grouping axis.
    #[must_use]
    pub fn comparison(&self, group_by: GroupBy, filter: &BudgetFilter) -> ComparisonReport {
        let mut groups: BTreeMap<String, (Decimal, Decimal, u64)> = BTreeMap::new();
        for row in self.rows(filter) {
            let key = match group_by {
                GroupBy::Fund => row.fund_name.clone(),
                GroupBy::Status => row.status.as_str().to_string(),
                GroupBy::Month => row.period.from.format("%Y-%m").to_string(),
            };
            let entry = groups.entry(key).or_default();
            entry.0 += row.budget_amount;
            entry.1 += row.utilized;
            entry.2 += 1;
        }

        let comparisons = groups
            .into_iter()
            .map(|(key, (total_budget, total_utilized, budget_count))| ComparisonRow {
                key,
                total_budget,
                total_utilized,
                total_remaining: total_budget - total_utilized,
                utilization_rate: utilization_percent(total_utilized, total_budget),
                budget_count,
            })
            .collect();

        ComparisonReport {
            currency: self.config.currency.clone(),
            group_by,
            comparisons,
        }
    }

    /// Utilization report: bucket counts, per-budget rows, and a
    /// ledger-wise breakdown across all matching budgets.
    #[must_use]
    pub fn utilization(&self, filter: &BudgetFilter) -> UtilizationReport {
        let matching = self.store.find(filter);

        let mut summary = CategoryBuckets::default();
        let mut ledger_totals: BTreeMap<LedgerId, (Decimal, Decimal)> = BTreeMap::new();
        let mut budgets = Vec::with_capacity(matching.len());

        for budget in &matching {
            let figures = self.utilization.utilization_for(budget);
            summary.record(figures.category);
            for item in &figures.per_item {
                let entry = ledger_totals.entry(item.ledger_id).or_default();
                entry.0 += item.budgeted;
                entry.1 += item.utilized;
            }
            budgets.push(self.row(budget));
        }

        let mut ledger_wise: Vec<LedgerWiseRow> = ledger_totals
            .into_iter()
            .map(|(ledger_id, (budgeted, utilized))| LedgerWiseRow {
                ledger_id,
                ledger_name: self
                    .ledgers
                    .get(ledger_id)
                    .map_or_else(|| ledger_id.to_string(), |l| l.name),
                budgeted,
                utilized,
                remaining: budgeted - utilized,
                percent: utilization_percent(utilized, budgeted),
            })
            .collect();
        ledger_wise.sort_by(|a, b| a.ledger_name.cmp(&b.ledger_name));

        UtilizationReport {
            currency: self.config.currency.clone(),
            summary,
            budgets,
            ledger_wise,
        }
    }

    fn rows(&self, filter: &BudgetFilter) -> Vec<BudgetReportRow> {
        self.store
            .find(filter)
            .iter()
            .map(|budget| self.row(budget))
            .collect()
    }

    fn row(&self, budget: &Budget) -> BudgetReportRow {
        let figures = self.utilization.utilization_for(budget);
        let variance = budget.amount - figures.total_utilized;
        BudgetReportRow {
            budget_id: budget.id,
            name: budget.name.clone(),
            fund_id: budget.fund_id,
            fund_name: self
                .funds
                .get(budget.fund_id)
                .map_or_else(|| budget.fund_id.to_string(), |f| f.name),
            status: budget.status,
            period: budget.period,
            budget_amount: budget.amount,
            utilized: figures.total_utilized,
            remaining: budget.amount - figures.total_utilized,
            utilization_percent: figures.utilization_percent,
            category: figures.category,
            variance,
            variance_status: VarianceStatus::classify(variance),
        }
    }
}
