//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `audit` - Audit log listing
//! - `categories` - Category commands (list, add, delete)
//! - `core` - Core commands (init) and shared utilities (open_db, parse_date)
//! - `reports` - Report commands (summary, categories, anomalies)
//! - `serve` - Web server command
//! - `transactions` - Transaction commands (list, add, delete)

pub mod audit;
pub mod categories;
pub mod core;
pub mod reports;
pub mod serve;
pub mod transactions;

// Re-export command functions for main.rs
pub use self::core::*;
pub use audit::*;
pub use categories::*;
pub use reports::*;
pub use serve::*;
pub use transactions::*;

use fintrack_core::models::TransactionKind;
use rust_decimal::Decimal;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Colored, signed amount for terminal output
///
/// The sign shows money in or out: a negative expense (a refund) prints as `+`.
pub fn format_amount(kind: TransactionKind, amount: Decimal) -> String {
    let (color, outflow) = match kind {
        TransactionKind::Expense => ("31", !amount.is_sign_negative()),
        TransactionKind::Income => ("32", amount.is_sign_negative()),
    };
    let sign = if outflow { '-' } else { '+' };
    format!("\x1b[{}m{}${:.2}\x1b[0m", color, sign, amount.abs())
}
