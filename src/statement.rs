//! Parameterized SQL generation for tables whose schema is unknown until
//! runtime.
//!
//! Values never appear in the SQL text; every cell becomes a `?` placeholder
//! with its value appended to the bind list in mapping order. Column and
//! table names are interpolated as bare identifiers: they are trusted to
//! originate from the browser's own prior enumeration, not from external
//! input.

use crate::error::{Error, Result};
use crate::row::Row;
use crate::value::Value;

/// A built statement: SQL text plus the values to bind, in placeholder
/// order (1..N, left to right). Built fresh per operation, never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQuery {
    /// SQL text with `?` placeholders.
    pub sql: String,
    /// Bind values, one per placeholder.
    pub params: Vec<Value>,
}

impl SqlQuery {
    /// Builds `INSERT INTO <table> (<cols>) VALUES (?, …)` from `row`.
    pub fn insert(table: &str, row: &Row) -> Result<Self> {
        if row.is_empty() {
            return Err(Error::EmptyRow);
        }
        let columns: Vec<&str> = row.names().collect();
        let placeholders = vec!["?"; columns.len()].join(", ");
        Ok(Self {
            sql: format!(
                "INSERT INTO {table} ({}) VALUES ({placeholders})",
                columns.join(", ")
            ),
            params: row.values().cloned().collect(),
        })
    }

    /// Builds `UPDATE <table> SET <col>=?, … WHERE <col>=? AND …`.
    ///
    /// The WHERE clause matches `old_row` across every column, so the bind
    /// list is all of `new_row`'s values followed by all of `old_row`'s:
    /// the first WHERE placeholder sits at position `new_row.len() + 1`.
    pub fn update(table: &str, new_row: &Row, old_row: &Row) -> Result<Self> {
        if new_row.is_empty() || old_row.is_empty() {
            return Err(Error::EmptyRow);
        }
        let mut params: Vec<Value> = new_row.values().cloned().collect();
        params.extend(old_row.values().cloned());
        Ok(Self {
            sql: format!(
                "UPDATE {table} SET {} WHERE {}",
                assignments(new_row, ", "),
                assignments(old_row, " AND ")
            ),
            params,
        })
    }

    /// Builds `DELETE FROM <table> WHERE <col>=? AND …` from the old row.
    pub fn delete(table: &str, old_row: &Row) -> Result<Self> {
        if old_row.is_empty() {
            return Err(Error::EmptyRow);
        }
        Ok(Self {
            sql: format!("DELETE FROM {table} WHERE {}", assignments(old_row, " AND ")),
            params: old_row.values().cloned().collect(),
        })
    }
}

/// Joins `<name>=?` terms with `sep`. No trailing separator by
/// construction.
fn assignments(row: &Row, sep: &str) -> String {
    row.names()
        .map(|name| format!("{name}=?"))
        .collect::<Vec<_>>()
        .join(sep)
}
