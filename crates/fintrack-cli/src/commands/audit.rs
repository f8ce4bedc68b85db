//! Audit log command

use anyhow::Result;
use fintrack_core::db::Database;

use super::truncate;

pub fn cmd_audit(db: &Database, user: &str, limit: i64) -> Result<()> {
    let entries = db.list_audit_log(user, limit.clamp(1, 1000))?;

    if entries.is_empty() {
        println!("No audit entries for {}.", user);
        return Ok(());
    }

    println!();
    println!("📜 Audit Log ({})", user);
    println!("   ─────────────────────────────────────────────────────────────");

    for entry in entries {
        let target = match (&entry.entity_type, entry.entity_id) {
            (Some(kind), Some(id)) => format!("{} {}", kind, id),
            (Some(kind), None) => kind.clone(),
            _ => String::new(),
        };
        println!(
            "   {} │ {:<7} │ {:<22} │ {}",
            entry.timestamp,
            entry.action,
            truncate(&target, 22),
            truncate(entry.details.as_deref().unwrap_or(""), 30)
        );
    }

    Ok(())
}
