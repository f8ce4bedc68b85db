//! Domain models for fintrack

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether money flows in or out
///
/// Attached independently to both categories and transactions. The two are
/// never cross-checked, so an EXPENSE transaction may sit under an INCOME
/// category (a refund, for example).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown kind: {} (valid: income, expense)", s)),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user-defined category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    /// Owning user
    pub owner: String,
    pub name: String,
    pub kind: TransactionKind,
    pub created_at: DateTime<Utc>,
}

/// A new category (before DB insertion)
#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub kind: TransactionKind,
}

/// A recorded income or expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    /// Owning user
    pub owner: String,
    pub category_id: i64,
    /// Name of the referenced category (joined for display)
    pub category_name: String,
    pub kind: TransactionKind,
    /// Signed amount with two fraction digits
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A new transaction (before DB insertion)
#[derive(Debug, Clone, Deserialize)]
pub struct NewTransaction {
    pub category_id: i64,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
}

/// Sort order for transaction listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionOrdering {
    DateAsc,
    #[default]
    DateDesc,
    AmountAsc,
    AmountDesc,
}

impl TransactionOrdering {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DateAsc => "date",
            Self::DateDesc => "-date",
            Self::AmountAsc => "amount",
            Self::AmountDesc => "-amount",
        }
    }

    /// ORDER BY clause (id breaks ties so listings are stable)
    pub(crate) fn order_clause(&self) -> &'static str {
        match self {
            Self::DateAsc => "ORDER BY t.date ASC, t.id ASC",
            Self::DateDesc => "ORDER BY t.date DESC, t.id DESC",
            Self::AmountAsc => "ORDER BY t.amount_cents ASC, t.id ASC",
            Self::AmountDesc => "ORDER BY t.amount_cents DESC, t.id DESC",
        }
    }
}

impl std::str::FromStr for TransactionOrdering {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "date" => Ok(Self::DateAsc),
            "-date" => Ok(Self::DateDesc),
            "amount" => Ok(Self::AmountAsc),
            "-amount" => Ok(Self::AmountDesc),
            _ => Err(format!(
                "Unknown ordering: {} (valid: date, -date, amount, -amount)",
                s
            )),
        }
    }
}

/// Filters for listing transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionQuery {
    /// Only applied when `end_date` is also set
    pub start_date: Option<NaiveDate>,
    /// Only applied when `start_date` is also set
    pub end_date: Option<NaiveDate>,
    pub ordering: TransactionOrdering,
}

impl TransactionQuery {
    /// Inclusive date range, if both ends were given
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start_date, self.end_date) {
            (Some(from), Some(to)) => Some((from, to)),
            _ => None,
        }
    }
}

// ========== Report Models ==========

/// Summed amount for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

/// Income, expense and burn-rate projection for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub month: u32,
    pub year: i32,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_savings: Decimal,
    pub days_passed: u32,
    pub total_days_in_month: u32,
    /// Rounded to 2 decimals
    pub daily_burn_rate: Decimal,
    /// Rounded to 2 decimals
    pub predicted_month_end_expense: Decimal,
    pub overspending_risk: bool,
}

/// Expense breakdown and budget health score for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAnalysis {
    pub month: u32,
    pub year: i32,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    /// Rounded to 2 decimals
    pub savings_ratio: Decimal,
    pub top_spending_category: Option<String>,
    /// 0-100
    pub budget_health_score: u8,
    /// Sum descending, then category name ascending
    pub category_breakdown: Vec<CategoryTotal>,
}

/// A category whose spending grew past the spike threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingAnomaly {
    pub category: String,
    pub previous_month: Decimal,
    pub current_month: Decimal,
    pub growth_percentage: Decimal,
}

/// Month-over-month spending spikes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnomalyReport {
    pub anomalies_detected: Vec<SpendingAnomaly>,
}
