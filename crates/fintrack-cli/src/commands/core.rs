//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `parse_date` - Date argument parsing
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use fintrack_core::db::Database;

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path must be valid UTF-8")?;
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

/// Parse a YYYY-MM-DD argument, falling back to today (UTC)
pub fn parse_date(value: Option<&str>, flag: &str) -> Result<NaiveDate> {
    match value {
        Some(v) => NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d")
            .with_context(|| format!("Invalid {} date format (use YYYY-MM-DD)", flag)),
        None => Ok(Utc::now().date_naive()),
    }
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path, no_encrypt)?;

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else if db.is_encrypted()? {
        println!("   🔒 Encryption: ENABLED");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Add a category: fintrack categories add Groceries --kind expense");
    println!("  2. Record spending: fintrack transactions add -c 1 -k expense -a 42.50");
    println!("  3. See the month:   fintrack report summary");

    Ok(())
}
