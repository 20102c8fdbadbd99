//! Storage file backing the key/value mirror.
//!
//! The notes snapshot is one row of `kv_entries`. This module only guarantees
//! that table exists at a schema version this build understands; it knows
//! nothing about notes.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure opening or upgrading the storage file.
#[derive(Debug)]
pub enum DbError {
    /// SQLite driver failure.
    Sqlite(rusqlite::Error),
    /// File was written by a newer build; it is left untouched.
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "storage error: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "notes storage has schema {found}, this build reads up to {supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
