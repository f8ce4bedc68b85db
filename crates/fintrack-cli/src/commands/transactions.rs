//! Transaction command implementations

use std::str::FromStr;

use anyhow::{Context, Result};
use fintrack_core::db::Database;
use fintrack_core::models::{NewTransaction, TransactionKind, TransactionOrdering, TransactionQuery};
use rust_decimal::Decimal;

use super::{format_amount, parse_date, truncate};

pub fn cmd_transactions_list(
    db: &Database,
    user: &str,
    from: Option<&str>,
    to: Option<&str>,
    ordering: &str,
) -> Result<()> {
    let query = TransactionQuery {
        start_date: from.map(|d| parse_date(Some(d), "--from")).transpose()?,
        end_date: to.map(|d| parse_date(Some(d), "--to")).transpose()?,
        ordering: ordering
            .parse::<TransactionOrdering>()
            .map_err(|e| anyhow::anyhow!(e))?,
    };

    if query.start_date.is_some() != query.end_date.is_some() {
        println!("   ⚠️  Date range ignored: pass both --from and --to");
    }

    let transactions = db.list_transactions(user, &query)?;

    if transactions.is_empty() {
        println!("No transactions found. Record one with:");
        println!("  fintrack transactions add -c <category-id> -k expense -a 12.50");
        return Ok(());
    }

    println!();
    println!("📝 Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions {
        println!(
            "   [{:>4}] {} │ {:>12} │ {:<15} │ {}",
            tx.id,
            tx.date,
            format_amount(tx.kind, tx.amount),
            truncate(&tx.category_name, 15),
            truncate(tx.description.as_deref().unwrap_or(""), 30)
        );
    }

    Ok(())
}

pub fn cmd_transactions_add(
    db: &Database,
    user: &str,
    category_id: i64,
    kind: &str,
    amount: &str,
    date: Option<&str>,
    description: Option<String>,
) -> Result<()> {
    let kind: TransactionKind = kind.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let amount = Decimal::from_str(amount.trim())
        .with_context(|| format!("Invalid amount: {}", amount))?;
    let date = parse_date(date, "--date")?;

    let tx = db.create_transaction(
        user,
        &NewTransaction {
            category_id,
            kind,
            amount,
            date,
            description,
        },
    )?;

    db.log_audit(
        user,
        "create",
        Some("transaction"),
        Some(tx.id),
        Some("source=cli"),
    )?;

    println!(
        "✅ Recorded {} {} in '{}' on {} (ID {})",
        tx.kind,
        format_amount(tx.kind, tx.amount),
        tx.category_name,
        tx.date,
        tx.id
    );
    Ok(())
}

pub fn cmd_transactions_delete(db: &Database, user: &str, id: i64) -> Result<()> {
    if !db.delete_transaction(user, id)? {
        anyhow::bail!("Transaction {} not found", id);
    }

    db.log_audit(
        user,
        "delete",
        Some("transaction"),
        Some(id),
        Some("source=cli"),
    )?;

    println!("🗑️  Deleted transaction {}", id);
    Ok(())
}
