//! Schema-agnostic CRUD core for browsing SQLite database files.
//!
//! # Intention
//!
//! - Enumerate the user tables of an existing database file.
//! - Read whole tables into a generic typed row model without any
//!   compile-time schema.
//! - Insert, update, and delete rows of arbitrary tables through
//!   parameterized SQL built at runtime, locating existing rows by
//!   whole-row equality rather than a primary key.
//!
//! # Architectural Boundaries
//!
//! - Only database code belongs here. Presentation (table lists, grids,
//!   edit forms, confirmation dialogs) lives with the caller and drives
//!   these operations synchronously.
//! - This core neither creates nor migrates schema; it operates against
//!   whatever tables already exist.
//!
//! Each operation takes the database path and opens its own short-lived
//! connection, so callers hold no handle between calls. Mutation callers
//! supply two row mappings: the edited values and the row as originally
//! loaded, the latter serving as the match predicate.

mod browser;
pub mod error;
mod row;
mod statement;
mod value;

pub use browser::{delete, infer_columns, insert, list_tables, select_all, update};
pub use error::{Error, Result};
pub use row::Row;
pub use statement::SqlQuery;
pub use value::Value;
