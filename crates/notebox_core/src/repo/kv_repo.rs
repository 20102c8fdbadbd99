//! Key/value repository contracts with SQLite and in-memory implementations.
//!
//! # Invariants
//! - `set_value` replaces any previous value for the key.
//! - An absent key is distinct from a key holding the empty string.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage access or snapshot encoding failure.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode notes: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// String key/value store standing in for local persisted storage.
pub trait KeyValueRepository {
    fn get_value(&self, key: &str) -> RepoResult<Option<String>>;
    fn set_value(&mut self, key: &str, value: &str) -> RepoResult<()>;
}

/// SQLite-backed store over the `kv_entries` table.
pub struct SqliteKeyValueRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueRepository for SqliteKeyValueRepository<'_> {
    fn get_value(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_value(&mut self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Process-local store; used by tests and `--memory` sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueRepository {
    entries: BTreeMap<String, String>,
}

impl MemoryKeyValueRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(key.into(), value.into());
        Self { entries }
    }
}

impl KeyValueRepository for MemoryKeyValueRepository {
    fn get_value(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_value(&mut self, key: &str, value: &str) -> RepoResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<R: KeyValueRepository + ?Sized> KeyValueRepository for &mut R {
    fn get_value(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).get_value(key)
    }

    fn set_value(&mut self, key: &str, value: &str) -> RepoResult<()> {
        (**self).set_value(key, value)
    }
}
