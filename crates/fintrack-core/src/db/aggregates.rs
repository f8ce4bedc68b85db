//! Aggregate queries backing the report engine
//!
//! Sums run over integer cents in SQL and are converted to decimals at the
//! edge, so totals are exact.

use rusqlite::params;
use rust_decimal::Decimal;

use super::transactions::cents_to_decimal;
use super::Database;
use crate::error::Result;
use crate::models::{CategoryTotal, TransactionKind};
use crate::period::Period;
use crate::store::TransactionStore;

impl TransactionStore for Database {
    fn sum_by_kind(&self, owner: &str, period: Period, kind: TransactionKind) -> Result<Decimal> {
        let conn = self.conn()?;
        let (from, to) = period.date_range();

        let cents: i64 = conn.query_row(
            r#"
            SELECT COALESCE(SUM(amount_cents), 0)
            FROM transactions
            WHERE owner = ? AND kind = ? AND date BETWEEN ? AND ?
            "#,
            params![owner, kind.as_str(), from.to_string(), to.to_string()],
            |row| row.get(0),
        )?;

        Ok(cents_to_decimal(cents))
    }

    fn group_sum_by_category(
        &self,
        owner: &str,
        period: Period,
        kind: TransactionKind,
    ) -> Result<Vec<CategoryTotal>> {
        let conn = self.conn()?;
        let (from, to) = period.date_range();

        // Grouped by name: two categories sharing a name are reported together
        let mut stmt = conn.prepare(
            r#"
            SELECT c.name, SUM(t.amount_cents) AS total
            FROM transactions t
            JOIN categories c ON c.id = t.category_id
            WHERE t.owner = ? AND t.kind = ? AND t.date BETWEEN ? AND ?
            GROUP BY c.name
            ORDER BY total DESC, c.name ASC
            "#,
        )?;

        let totals = stmt
            .query_map(
                params![owner, kind.as_str(), from.to_string(), to.to_string()],
                |row| {
                    let cents: i64 = row.get(1)?;
                    Ok(CategoryTotal {
                        category: row.get(0)?,
                        total: cents_to_decimal(cents),
                    })
                },
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(totals)
    }
}
