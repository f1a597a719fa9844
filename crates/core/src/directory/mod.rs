//! External collaborator interfaces.
//!
//! Funds, ledgers, ledger postings, authorization, and time are owned by
//! other systems. The core consumes them through these trait seams; the
//! in-memory implementations in [`memory`] serve in-process wiring and tests.

pub mod memory;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mandira_shared::types::{FundId, LedgerId, UserId};

use crate::budget::DateRange;

/// A fund as known to the fund directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundInfo {
    /// Fund ID.
    pub id: FundId,
    /// Fund name.
    pub name: String,
}

/// A ledger (expense category) as known to the ledger directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerInfo {
    /// Ledger ID.
    pub id: LedgerId,
    /// Ledger name.
    pub name: String,
    /// Ledger group (e.g., "Expenses", "Maintenance").
    pub group: String,
}

/// A single ledger posting, the raw material of utilization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Posting {
    /// Posted amount.
    pub amount: Decimal,
    /// Posting date.
    pub date: NaiveDate,
}

/// Directory of funds that may own budgets.
pub trait FundDirectory: Send + Sync {
    /// Returns true if the fund exists.
    fn exists(&self, fund_id: FundId) -> bool;

    /// Looks up a fund by ID.
    fn get(&self, fund_id: FundId) -> Option<FundInfo>;
}

/// Directory of ledgers referenced by budget items.
pub trait LedgerDirectory: Send + Sync {
    /// Returns true if the ledger exists.
    fn exists(&self, ledger_id: LedgerId) -> bool;

    /// Looks up a ledger by ID.
    fn get(&self, ledger_id: LedgerId) -> Option<LedgerInfo>;
}

/// Feed of ledger postings, the source of utilization figures.
pub trait PostingFeed: Send + Sync {
    /// Returns the postings against a ledger within a date range.
    fn postings_for(&self, ledger_id: LedgerId, range: DateRange) -> Vec<Posting>;
}

/// Authorization check for approval operations.
pub trait Authorizer: Send + Sync {
    /// Returns true if the actor holds a role that may approve budgets.
    fn can_approve(&self, actor: UserId) -> bool;
}

/// Source of the current date and time.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current date.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}
