//! Error types for browser operations.
//!
//! Every variant that wraps a [`rusqlite::Error`] keeps the engine's own
//! diagnostic message reachable through `Display` and `source()`. Callers
//! surface it verbatim; this is a developer tool.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for browser operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error returned by browser operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The database file could not be opened (missing, corrupt, or locked).
    #[error("could not open database {}: {source}", .path.display())]
    Open {
        /// Path that was being opened.
        path: PathBuf,
        /// Engine diagnostic from the open attempt.
        source: rusqlite::Error,
    },

    /// A read query could not be prepared or executed.
    #[error("query failed: {0}")]
    Query(#[source] rusqlite::Error),

    /// A write statement could not be prepared (malformed SQL, e.g. a
    /// reserved-word column name).
    #[error("failed to prepare statement: {0}")]
    Prepare(#[source] rusqlite::Error),

    /// A write statement failed during execution (constraint violation,
    /// type mismatch, lock contention).
    #[error("failed to execute statement: {0}")]
    Exec(#[source] rusqlite::Error),

    /// A mutation was requested with a row mapping that has no columns.
    #[error("row has no columns")]
    EmptyRow,
}
