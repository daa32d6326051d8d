//! `parcels` table provisioning.
//!
//! # Responsibility
//! - Create the single `parcels` table on a fresh database.
//! - Refuse databases stamped by a newer schema.
//!
//! # Invariants
//! - Provisioned schema version is mirrored to `PRAGMA user_version`.
//! - Provisioning an already current database is a no-op.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// Schema version written by this build.
pub const SCHEMA_VERSION: u32 = 1;

const PARCELS_SQL: &str = include_str!("0001_parcels.sql");

/// Creates the `parcels` table unless the database already has it.
pub fn provision_schema(conn: &mut Connection) -> DbResult<()> {
    let current = schema_version(conn)?;

    if current > SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: SCHEMA_VERSION,
        });
    }
    if current == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(PARCELS_SQL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    tx.commit()?;

    info!(
        "event=schema_provision module=db status=ok from_version={} to_version={}",
        current, SCHEMA_VERSION
    );
    Ok(())
}

/// Reads `PRAGMA user_version`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
