//! Ordered schema steps for the storage file.
//!
//! Step `n` (1-based) moves the file to `PRAGMA user_version = n`. Steps are
//! append-only; an applied step is never edited.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

const STEPS: &[&str] = &[include_str!("0001_kv_entries.sql")];

/// Schema version produced by running every step.
pub fn latest_version() -> u32 {
    STEPS.len() as u32
}

/// Reads the schema version recorded in `conn`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version)
}

/// Brings `conn` up to `latest_version` and returns how many steps ran.
///
/// Pending steps run in one transaction, so a failure leaves the file at its
/// previous version.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<usize> {
    let found = schema_version(conn)?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }

    let pending = &STEPS[found as usize..];
    if pending.is_empty() {
        return Ok(0);
    }

    let tx = conn.transaction()?;
    for (version, sql) in (found + 1..).zip(pending) {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from={found} to={supported}");
    Ok(pending.len())
}
