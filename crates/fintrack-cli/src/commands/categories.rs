//! Category command implementations

use anyhow::Result;
use fintrack_core::db::Database;
use fintrack_core::models::{NewCategory, TransactionKind};

use super::truncate;

pub fn cmd_categories_list(db: &Database, user: &str) -> Result<()> {
    let categories = db.list_categories(user)?;

    if categories.is_empty() {
        println!("No categories yet. Add one with:");
        println!("  fintrack categories add Groceries --kind expense");
        return Ok(());
    }

    println!();
    println!("🏷️  Categories");
    println!("   ─────────────────────────────────────────────");

    for category in categories {
        println!(
            "   [{:>4}] {:<8} │ {}",
            category.id,
            category.kind,
            truncate(&category.name, 40)
        );
    }

    Ok(())
}

pub fn cmd_categories_add(db: &Database, user: &str, name: &str, kind: &str) -> Result<()> {
    let kind: TransactionKind = kind.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let category = db.create_category(
        user,
        &NewCategory {
            name: name.to_string(),
            kind,
        },
    )?;

    db.log_audit(
        user,
        "create",
        Some("category"),
        Some(category.id),
        Some("source=cli"),
    )?;

    println!(
        "✅ Created category '{}' ({}) with ID {}",
        category.name, category.kind, category.id
    );
    Ok(())
}

pub fn cmd_categories_delete(db: &Database, user: &str, id: i64) -> Result<()> {
    if !db.delete_category(user, id)? {
        anyhow::bail!("Category {} not found", id);
    }

    db.log_audit(
        user,
        "delete",
        Some("category"),
        Some(id),
        Some("source=cli"),
    )?;

    println!("🗑️  Deleted category {} and its transactions", id);
    Ok(())
}
