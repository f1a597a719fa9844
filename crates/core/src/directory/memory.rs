//! In-memory implementations of the external collaborator interfaces.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;

use mandira_shared::types::{FundId, LedgerId, UserId};

use super::{Authorizer, Clock, FundDirectory, FundInfo, LedgerDirectory, LedgerInfo, Posting, PostingFeed};
use crate::budget::DateRange;

/// In-memory fund directory.
#[derive(Debug, Default)]
pub struct MemoryFundDirectory {
    funds: RwLock<HashMap<FundId, FundInfo>>,
}

impl MemoryFundDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a fund and returns its ID.
    pub fn insert(&self, name: &str) -> FundId {
        let id = FundId::new();
        let info = FundInfo {
            id,
            name: name.to_string(),
        };
        if let Ok(mut funds) = self.funds.write() {
            funds.insert(id, info);
        }
        id
    }
}

impl FundDirectory for MemoryFundDirectory {
    fn exists(&self, fund_id: FundId) -> bool {
        self.funds
            .read()
            .map(|funds| funds.contains_key(&fund_id))
            .unwrap_or(false)
    }

    fn get(&self, fund_id: FundId) -> Option<FundInfo> {
        self.funds
            .read()
            .ok()
            .and_then(|funds| funds.get(&fund_id).cloned())
    }
}

/// In-memory ledger directory.
#[derive(Debug, Default)]
pub struct MemoryLedgerDirectory {
    ledgers: RwLock<HashMap<LedgerId, LedgerInfo>>,
}

impl MemoryLedgerDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a ledger and returns its ID.
    pub fn insert(&self, name: &str, group: &str) -> LedgerId {
        let id = LedgerId::new();
        let info = LedgerInfo {
            id,
            name: name.to_string(),
            group: group.to_string(),
        };
        if let Ok(mut ledgers) = self.ledgers.write() {
            ledgers.insert(id, info);
        }
        id
    }
}

impl LedgerDirectory for MemoryLedgerDirectory {
    fn exists(&self, ledger_id: LedgerId) -> bool {
        self.ledgers
            .read()
            .map(|ledgers| ledgers.contains_key(&ledger_id))
            .unwrap_or(false)
    }

    fn get(&self, ledger_id: LedgerId) -> Option<LedgerInfo> {
        self.ledgers
            .read()
            .ok()
            .and_then(|ledgers| ledgers.get(&ledger_id).cloned())
    }
}

/// In-memory posting feed.
#[derive(Debug, Default)]
pub struct MemoryPostingFeed {
    postings: RwLock<HashMap<LedgerId, Vec<Posting>>>,
}

impl MemoryPostingFeed {
    /// Creates an empty feed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a posting against a ledger.
    pub fn record(&self, ledger_id: LedgerId, amount: Decimal, date: NaiveDate) {
        if let Ok(mut postings) = self.postings.write() {
            postings
                .entry(ledger_id)
                .or_default()
                .push(Posting { amount, date });
        }
    }
}

impl PostingFeed for MemoryPostingFeed {
    fn postings_for(&self, ledger_id: LedgerId, range: DateRange) -> Vec<Posting> {
        self.postings
            .read()
            .map(|postings| {
                postings
                    .get(&ledger_id)
                    .map(|entries| {
                        entries
                            .iter()
                            .filter(|p| range.contains(p.date))
                            .copied()
                            .collect()
                    })
                    .unwrap_or_default()
            })
            .unwrap_or_default()
    }
}

/// Authorizer backed by an explicit set of approver user IDs.
#[derive(Debug, Default)]
pub struct RoleAuthorizer {
    approvers: RwLock<HashSet<UserId>>,
}

impl RoleAuthorizer {
    /// Creates an authorizer with no approvers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants the approver role to a user.
    pub fn grant(&self, user: UserId) {
        if let Ok(mut approvers) = self.approvers.write() {
            approvers.insert(user);
        }
    }
}

impl Authorizer for RoleAuthorizer {
    fn can_approve(&self, actor: UserId) -> bool {
        self.approvers
            .read()
            .map(|approvers| approvers.contains(&actor))
            .unwrap_or(false)
    }
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a fixed instant, for tests and replay.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    /// Creates a clock pinned to the given instant.
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Creates a clock pinned to midnight UTC on the given date.
    #[must_use]
    pub fn at(date: NaiveDate) -> Self {
        Self {
            now: date.and_time(NaiveTime::MIN).and_utc(),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_fund_directory_lookup() {
        let funds = MemoryFundDirectory::new();
        let id = funds.insert("Temple Renovation");

        assert!(funds.exists(id));
        assert_eq!(funds.get(id).map(|f| f.name), Some("Temple Renovation".into()));
        assert!(!funds.exists(FundId::new()));
    }

    #[test]
    fn test_posting_feed_filters_by_range() {
        let feed = MemoryPostingFeed::new();
        let ledger = LedgerId::new();
        feed.record(ledger, dec!(100), date(2025, 1, 5));
        feed.record(ledger, dec!(50), date(2025, 2, 5));

        let range = DateRange::new(date(2025, 1, 1), date(2025, 1, 31)).expect("valid range");
        let postings = feed.postings_for(ledger, range);
        assert_eq!(postings.len(), 1);
        assert_eq!(postings[0].amount, dec!(100));
    }

    #[test]
    fn test_role_authorizer() {
        let authorizer = RoleAuthorizer::new();
        let approver = UserId::new();
        let clerk = UserId::new();
        authorizer.grant(approver);

        assert!(authorizer.can_approve(approver));
        assert!(!authorizer.can_approve(clerk));
    }

    #[test]
    fn test_fixed_clock_today() {
        let clock = FixedClock::at(date(2025, 3, 15));
        assert_eq!(clock.today(), date(2025, 3, 15));
    }
}
