//! Category operations

use rusqlite::{params, OptionalExtension, Row};

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Category, NewCategory};

/// Longest accepted category name, in characters
pub const MAX_CATEGORY_NAME: usize = 100;

fn row_to_category(row: &Row) -> rusqlite::Result<Category> {
    let kind_str: String = row.get(3)?;
    let created_at_str: String = row.get(4)?;

    Ok(Category {
        id: row.get(0)?,
        owner: row.get(1)?,
        name: row.get(2)?,
        kind: kind_str.parse().map_err(|e: String| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, e.into())
        })?,
        created_at: parse_datetime(&created_at_str),
    })
}

impl Database {
    /// Create a category for `owner`
    pub fn create_category(&self, owner: &str, new: &NewCategory) -> Result<Category> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(Error::InvalidData(
                "Category name cannot be empty".to_string(),
            ));
        }
        if name.chars().count() > MAX_CATEGORY_NAME {
            return Err(Error::InvalidData(format!(
                "Category name must be at most {} characters",
                MAX_CATEGORY_NAME
            )));
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO categories (owner, name, kind) VALUES (?, ?, ?)",
            params![owner, name, new.kind.as_str()],
        )?;
        let id = conn.last_insert_rowid();

        self.get_category(owner, id)?
            .ok_or_else(|| Error::NotFound(format!("category {}", id)))
    }

    /// List the owner's categories, by name
    pub fn list_categories(&self, owner: &str) -> Result<Vec<Category>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, owner, name, kind, created_at FROM categories WHERE owner = ? ORDER BY name, id",
        )?;

        let categories = stmt
            .query_map(params![owner], row_to_category)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    /// Get one of the owner's categories
    pub fn get_category(&self, owner: &str, id: i64) -> Result<Option<Category>> {
        let conn = self.conn()?;
        let category = conn
            .query_row(
                "SELECT id, owner, name, kind, created_at FROM categories WHERE id = ? AND owner = ?",
                params![id, owner],
                row_to_category,
            )
            .optional()?;

        Ok(category)
    }

    /// Delete a category and, through the foreign key cascade, its transactions
    ///
    /// Returns false when the owner has no such category.
    pub fn delete_category(&self, owner: &str, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM categories WHERE id = ? AND owner = ?",
            params![id, owner],
        )?;
        Ok(deleted > 0)
    }
}
