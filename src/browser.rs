//! Table enumeration and row-level CRUD against a SQLite database file.
//!
//! Every operation opens its own connection and closes it before
//! returning; rusqlite's RAII handles release the statement and the
//! connection on both success and error paths. There is no pooling, no
//! statement cache, and no explicit transaction: each statement commits as
//! its own implicit unit, and lock contention surfaces as an engine error
//! rather than triggering a retry.

use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{params_from_iter, Connection, OpenFlags};
use tracing::debug;

use crate::error::{Error, Result};
use crate::row::Row;
use crate::statement::SqlQuery;
use crate::value::Value;

/// Lists user tables in the database at `path`, in catalog order.
/// Internal `sqlite_`-prefixed tables are excluded.
pub fn list_tables(path: &Path) -> Result<Vec<String>> {
    let conn = open(path)?;
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'")
        .map_err(Error::Query)?;
    let names = stmt
        .query_map([], |row| row.get(0))
        .map_err(Error::Query)?
        .collect::<rusqlite::Result<Vec<String>>>()
        .map_err(Error::Query)?;
    debug!(tables = names.len(), "listed user tables");
    Ok(names)
}

/// Reads every row of `table` into the generic [`Row`] model.
///
/// Returns an empty vector (not an error) for a table with zero rows.
///
/// Each cell is decoded according to the column's *declared* type, not the
/// stored value's dynamic type, matching the original browser's behavior:
/// a cell whose storage class disagrees with the declaration reads back as
/// [`Value::Null`], as does any column with an unrecognized or missing
/// declared type.
pub fn select_all(path: &Path, table: &str) -> Result<Vec<Row>> {
    let conn = open(path)?;
    // Table names cannot be bound as parameters; `table` is trusted to come
    // from a prior list_tables enumeration.
    let mut stmt = conn
        .prepare(&format!("SELECT * FROM {table}"))
        .map_err(Error::Query)?;
    let columns: Vec<(String, Option<String>)> = stmt
        .columns()
        .iter()
        .map(|c| {
            (
                c.name().to_string(),
                c.decl_type().map(str::to_ascii_uppercase),
            )
        })
        .collect();
    let mut rows = stmt.query([]).map_err(Error::Query)?;
    let mut out = Vec::new();
    while let Some(src) = rows.next().map_err(Error::Query)? {
        let mut row = Row::new();
        for (idx, (name, decl_type)) in columns.iter().enumerate() {
            let cell = src.get_ref(idx).map_err(Error::Query)?;
            row.insert(name.clone(), decode(cell, decl_type.as_deref()));
        }
        out.push(row);
    }
    debug!(table, rows = out.len(), "loaded table");
    Ok(out)
}

/// Returns the column names of a previously-loaded row set, taken from its
/// first row; empty when the set is empty.
///
/// All rows are assumed to share the same columns; only the first is
/// inspected.
pub fn infer_columns(rows: &[Row]) -> Vec<String> {
    rows.first()
        .map(|row| row.names().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Inserts `row` into `table`.
pub fn insert(path: &Path, table: &str, row: &Row) -> Result<()> {
    let query = SqlQuery::insert(table, row)?;
    let conn = open(path)?;
    execute(&conn, &query)?;
    debug!(table, "inserted row");
    Ok(())
}

/// Rewrites the row matching `old_row` to `new_row`.
///
/// The row to change is located by conjunctive equality across *every*
/// column of `old_row` as captured at load time, not by a primary key. A
/// `Null` in `old_row` binds into a `col = ?` predicate, which never
/// matches under SQL NULL semantics: such rows are silently left untouched,
/// and no rows-affected check distinguishes that from a successful update.
pub fn update(path: &Path, table: &str, new_row: &Row, old_row: &Row) -> Result<()> {
    let query = SqlQuery::update(table, new_row, old_row)?;
    let conn = open(path)?;
    execute(&conn, &query)?;
    debug!(table, "updated row");
    Ok(())
}

/// Deletes the row matching `old_row`, under the same whole-row match
/// convention (and NULL caveat) as [`update`].
pub fn delete(path: &Path, table: &str, old_row: &Row) -> Result<()> {
    let query = SqlQuery::delete(table, old_row)?;
    let conn = open(path)?;
    execute(&conn, &query)?;
    debug!(table, "deleted row");
    Ok(())
}

/// Opens the database read-write. The create flag is deliberately absent:
/// browsing a path that does not exist is an open failure, not an implicit
/// empty database.
fn open(path: &Path) -> Result<Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    Connection::open_with_flags(path, flags).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Prepares, binds, and steps a write statement to completion. Statement
/// and connection handles are released by drop on every exit path.
fn execute(conn: &Connection, query: &SqlQuery) -> Result<()> {
    let mut stmt = conn.prepare(&query.sql).map_err(Error::Prepare)?;
    stmt.execute(params_from_iter(query.params.iter()))
        .map_err(Error::Exec)?;
    Ok(())
}

fn decode(cell: ValueRef<'_>, decl_type: Option<&str>) -> Value {
    match (decl_type, cell) {
        (Some("INTEGER"), ValueRef::Integer(v)) => Value::Integer(v),
        (Some("REAL"), ValueRef::Real(v)) => Value::Real(v),
        (Some("TEXT"), ValueRef::Text(v)) => Value::Text(String::from_utf8_lossy(v).into_owned()),
        (Some("BLOB"), ValueRef::Blob(v)) => Value::Blob(v.to_vec()),
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row;

    #[test]
    fn infer_columns_uses_first_row() {
        let rows = vec![row! { "id" => 1, "name" => "a" }, row! { "id" => 2 }];
        assert_eq!(infer_columns(&rows), ["id", "name"]);
    }

    #[test]
    fn infer_columns_of_empty_set() {
        assert!(infer_columns(&[]).is_empty());
    }

    #[test]
    fn decode_follows_declared_type() {
        assert_eq!(
            decode(ValueRef::Integer(7), Some("INTEGER")),
            Value::Integer(7)
        );
        assert_eq!(decode(ValueRef::Real(1.5), Some("REAL")), Value::Real(1.5));
        assert_eq!(
            decode(ValueRef::Text(b"hi"), Some("TEXT")),
            Value::Text("hi".to_string())
        );
        assert_eq!(
            decode(ValueRef::Blob(&[1, 2]), Some("BLOB")),
            Value::Blob(vec![1, 2])
        );
        assert_eq!(decode(ValueRef::Null, Some("INTEGER")), Value::Null);
    }

    #[test]
    fn decode_mismatch_or_unknown_decl_is_null() {
        // Declared TEXT holding an integer: the declared-type dispatch does
        // not coerce, the cell reads back as NULL.
        assert_eq!(decode(ValueRef::Integer(7), Some("TEXT")), Value::Null);
        assert_eq!(decode(ValueRef::Integer(7), Some("FANCY")), Value::Null);
        assert_eq!(decode(ValueRef::Integer(7), None), Value::Null);
    }
}
