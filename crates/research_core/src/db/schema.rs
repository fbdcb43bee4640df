//! Layout of the `kv_entries` table and its version stamp.
//!
//! `PRAGMA user_version` records which `kv_entries` layout a storage file
//! carries. Values inside the table are opaque JSON and are never rewritten
//! here.

use super::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// `kv_entries` layout written by this build.
pub const KV_SCHEMA_VERSION: u32 = 1;

const CREATE_KV_ENTRIES: &str = include_str!("kv_entries.sql");

/// Creates `kv_entries` on a fresh file and stamps its version.
///
/// Files already at `KV_SCHEMA_VERSION` are left alone; files stamped by a
/// newer build are refused.
pub fn ensure_kv_schema(conn: &mut Connection) -> DbResult<()> {
    let found = stored_schema_version(conn)?;
    if found > KV_SCHEMA_VERSION {
        return Err(DbError::NewerSchema {
            found,
            supported: KV_SCHEMA_VERSION,
        });
    }
    if found == KV_SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(CREATE_KV_ENTRIES)?;
    tx.pragma_update(None, "user_version", KV_SCHEMA_VERSION)?;
    tx.commit()?;
    info!(
        "event=storage_schema module=db status=created from_version={found} version={KV_SCHEMA_VERSION}"
    );
    Ok(())
}

/// Version stamp of the open file; `0` for a file never touched by this crate.
pub fn stored_schema_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
