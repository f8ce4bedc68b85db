//! Fintrack Core Library
//!
//! Shared functionality for the fintrack personal finance tracker:
//! - Domain models for categories, transactions and reports
//! - Database access and migrations (SQLCipher, pooled)
//! - Calendar-month periods
//! - Report engine: monthly summary, category analysis, spending anomalies

pub mod analytics;
pub mod db;
pub mod error;
pub mod models;
pub mod period;
pub mod store;

/// Test utilities including an in-memory transaction store
#[cfg(test)]
pub mod test_utils;

pub use analytics::ReportEngine;
pub use db::{AuditEntry, Database};
pub use error::{Error, Result};
pub use models::{
    AnomalyReport, Category, CategoryAnalysis, CategoryTotal, MonthlySummary, NewCategory,
    NewTransaction, SpendingAnomaly, Transaction, TransactionKind, TransactionOrdering,
    TransactionQuery,
};
pub use period::Period;
pub use store::TransactionStore;
