//! Error types for the cantrip-library crate.

use std::{io, path::PathBuf};

use cantrip_ql::ParseError;
use thiserror::Error;

/// Errors that can occur when working with the library database.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// Failed to open or create the database.
    #[error("failed to open library database at {path}: {source}")]
    Open {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying SQLite error.
        source: rusqlite::Error,
    },

    /// The database was written by an incompatible version.
    #[error("library schema version {found} is not supported (expected {expected})")]
    SchemaVersion {
        /// Version stored in the database.
        found: i64,
        /// Version this build understands.
        expected: i64,
    },

    /// A statement failed.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The query did not parse.
    #[error("{0}")]
    Query(#[from] ParseError),
}
