//! Test utilities for fintrack-core
//!
//! An in-memory `TransactionStore` so the analytics engine can be exercised
//! without a database.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::Result;
use crate::models::{CategoryTotal, TransactionKind};
use crate::period::Period;
use crate::store::TransactionStore;

/// A single fixture row
#[derive(Debug, Clone)]
pub struct Entry {
    pub owner: String,
    pub category: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub date: NaiveDate,
}

/// Vec-backed store with the same ordering rules as the SQLite store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Vec<Entry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry (builder style)
    pub fn with(
        mut self,
        owner: &str,
        category: &str,
        kind: TransactionKind,
        amount: Decimal,
        date: NaiveDate,
    ) -> Self {
        self.entries.push(Entry {
            owner: owner.to_string(),
            category: category.to_string(),
            kind,
            amount,
            date,
        });
        self
    }

    fn matching<'a>(
        &'a self,
        owner: &'a str,
        period: Period,
        kind: TransactionKind,
    ) -> impl Iterator<Item = &'a Entry> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.owner == owner && e.kind == kind && period.contains(e.date))
    }
}

impl TransactionStore for MemoryStore {
    fn sum_by_kind(&self, owner: &str, period: Period, kind: TransactionKind) -> Result<Decimal> {
        Ok(self.matching(owner, period, kind).map(|e| e.amount).sum())
    }

    fn group_sum_by_category(
        &self,
        owner: &str,
        period: Period,
        kind: TransactionKind,
    ) -> Result<Vec<CategoryTotal>> {
        let mut totals: Vec<CategoryTotal> = Vec::new();
        for entry in self.matching(owner, period, kind) {
            match totals.iter_mut().find(|t| t.category == entry.category) {
                Some(total) => total.total += entry.amount,
                None => totals.push(CategoryTotal {
                    category: entry.category.clone(),
                    total: entry.amount,
                }),
            }
        }
        totals.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.category.cmp(&b.category))
        });
        Ok(totals)
    }
}

/// Shorthand for building fixture dates
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
