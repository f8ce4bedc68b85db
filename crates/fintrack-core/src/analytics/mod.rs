//! Reporting engine
//!
//! Three stateless, read-only reports computed from a `TransactionStore`:
//!
//! - **Monthly summary** - income/expense totals, burn rate, month-end projection
//! - **Category analysis** - expense breakdown, savings ratio, budget health score
//! - **Spending anomalies** - categories whose expense grew more than 30% over last month
//!
//! Each report covers the calendar month containing a reference date and is
//! scoped to a single owner. Running a report twice without intervening writes
//! yields identical output.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fintrack_core::analytics::ReportEngine;
//!
//! let engine = ReportEngine::new(&db);
//! let summary = engine.monthly_summary("alice@example.com", today)?;
//! ```

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::error::Result;
use crate::models::{AnomalyReport, CategoryAnalysis, MonthlySummary, TransactionKind};
use crate::period::Period;
use crate::store::TransactionStore;

pub mod anomalies;
pub mod categories;
pub mod summary;

pub use anomalies::{detect_spikes, SPIKE_THRESHOLD};
pub use categories::{analyze_categories, health_score, savings_ratio};
pub use summary::summarize_month;

/// Round a display value to 2 decimals (half to even)
pub(crate) fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// Runs the reports against a store
pub struct ReportEngine<'a, S: TransactionStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: TransactionStore + ?Sized> ReportEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Income, expense and projected spend for the month containing `as_of`
    pub fn monthly_summary(&self, owner: &str, as_of: NaiveDate) -> Result<MonthlySummary> {
        let period = Period::containing(as_of);
        let income = self
            .store
            .sum_by_kind(owner, period, TransactionKind::Income)?;
        let expense = self
            .store
            .sum_by_kind(owner, period, TransactionKind::Expense)?;

        let summary = summarize_month(as_of, income, expense);
        debug!(
            owner,
            period = %period,
            income = %summary.total_income,
            expense = %summary.total_expense,
            overspending = summary.overspending_risk,
            "Monthly summary computed"
        );
        Ok(summary)
    }

    /// Expense breakdown and health score for the month containing `as_of`
    pub fn category_analysis(&self, owner: &str, as_of: NaiveDate) -> Result<CategoryAnalysis> {
        let period = Period::containing(as_of);
        let income = self
            .store
            .sum_by_kind(owner, period, TransactionKind::Income)?;
        let expense = self
            .store
            .sum_by_kind(owner, period, TransactionKind::Expense)?;
        let breakdown =
            self.store
                .group_sum_by_category(owner, period, TransactionKind::Expense)?;

        let analysis = analyze_categories(period, income, expense, breakdown);
        debug!(
            owner,
            period = %period,
            categories = analysis.category_breakdown.len(),
            score = analysis.budget_health_score,
            "Category analysis computed"
        );
        Ok(analysis)
    }

    /// Categories whose expense spiked versus the month before `as_of`'s month
    pub fn spending_anomalies(&self, owner: &str, as_of: NaiveDate) -> Result<AnomalyReport> {
        let current_period = Period::containing(as_of);
        let previous_period = current_period.previous();

        let current =
            self.store
                .group_sum_by_category(owner, current_period, TransactionKind::Expense)?;
        let previous =
            self.store
                .group_sum_by_category(owner, previous_period, TransactionKind::Expense)?;

        let anomalies_detected = detect_spikes(&current, &previous);
        debug!(
            owner,
            current = %current_period,
            previous = %previous_period,
            anomalies = anomalies_detected.len(),
            "Spending anomalies computed"
        );
        Ok(AnomalyReport { anomalies_detected })
    }
}
