//! Transaction operations

use rusqlite::{params, OptionalExtension, Row, ToSql};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::{parse_date, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{NewTransaction, Transaction, TransactionQuery};

/// Amounts hold at most 12 digits, 2 of them after the point
const MAX_ABS_CENTS: i64 = 1_000_000_000_000;

/// Convert a money amount into integer cents
///
/// Rejects more than two fraction digits (after dropping trailing zeros) and
/// anything beyond 12 significant digits.
pub fn decimal_to_cents(amount: Decimal) -> Result<i64> {
    let normalized = amount.normalize();
    if normalized.scale() > 2 {
        return Err(Error::InvalidData(format!(
            "Amount {} has more than 2 decimal places",
            amount
        )));
    }

    let cents = (normalized * Decimal::ONE_HUNDRED)
        .to_i64()
        .filter(|c| c.abs() < MAX_ABS_CENTS)
        .ok_or_else(|| Error::InvalidData(format!("Amount {} is out of range", amount)))?;

    Ok(cents)
}

/// Convert stored cents back into a 2-decimal amount
pub fn cents_to_decimal(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

const SELECT_TRANSACTION: &str = r#"
    SELECT t.id, t.owner, t.category_id, c.name, t.kind, t.amount_cents, t.date,
           t.description, t.created_at
    FROM transactions t
    JOIN categories c ON c.id = t.category_id
"#;

fn row_to_transaction(row: &Row) -> rusqlite::Result<Transaction> {
    let kind_str: String = row.get(4)?;
    let date_str: String = row.get(6)?;
    let created_at_str: String = row.get(8)?;

    Ok(Transaction {
        id: row.get(0)?,
        owner: row.get(1)?,
        category_id: row.get(2)?,
        category_name: row.get(3)?,
        kind: kind_str.parse().map_err(|e: String| {
            rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, e.into())
        })?,
        amount: cents_to_decimal(row.get(5)?),
        date: parse_date(6, &date_str)?,
        description: row.get(7)?,
        created_at: parse_datetime(&created_at_str),
    })
}

impl Database {
    /// Record a transaction for `owner`
    ///
    /// The category must belong to the same owner. Its kind is not compared
    /// with the transaction's kind.
    pub fn create_transaction(&self, owner: &str, new: &NewTransaction) -> Result<Transaction> {
        let amount_cents = decimal_to_cents(new.amount)?;

        if self.get_category(owner, new.category_id)?.is_none() {
            return Err(Error::InvalidData(format!(
                "Category {} does not exist",
                new.category_id
            )));
        }

        let description = new
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO transactions (owner, category_id, kind, amount_cents, date, description)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                owner,
                new.category_id,
                new.kind.as_str(),
                amount_cents,
                new.date.to_string(),
                description,
            ],
        )?;
        let id = conn.last_insert_rowid();

        self.get_transaction(owner, id)?
            .ok_or_else(|| Error::NotFound(format!("transaction {}", id)))
    }

    /// List the owner's transactions
    ///
    /// The date range is inclusive and only applied when both ends are set.
    pub fn list_transactions(
        &self,
        owner: &str,
        query: &TransactionQuery,
    ) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;

        let mut sql = format!("{} WHERE t.owner = ?", SELECT_TRANSACTION);
        let mut params_vec: Vec<Box<dyn ToSql>> = vec![Box::new(owner.to_string())];

        if let Some((from, to)) = query.date_range() {
            sql.push_str(" AND t.date BETWEEN ? AND ?");
            params_vec.push(Box::new(from.to_string()));
            params_vec.push(Box::new(to.to_string()));
        }

        sql.push(' ');
        sql.push_str(query.ordering.order_clause());

        let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
        let mut stmt = conn.prepare(&sql)?;
        let transactions = stmt
            .query_map(params_refs.as_slice(), row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Get one of the owner's transactions
    pub fn get_transaction(&self, owner: &str, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let sql = format!("{} WHERE t.id = ? AND t.owner = ?", SELECT_TRANSACTION);
        let transaction = conn
            .query_row(&sql, params![id, owner], row_to_transaction)
            .optional()?;

        Ok(transaction)
    }

    /// Delete one of the owner's transactions; false when there was none
    pub fn delete_transaction(&self, owner: &str, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM transactions WHERE id = ? AND owner = ?",
            params![id, owner],
        )?;
        Ok(deleted > 0)
    }
}
