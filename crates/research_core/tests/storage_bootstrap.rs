use research_core::db::schema::{stored_schema_version, KV_SCHEMA_VERSION};
use research_core::db::{open_db, open_db_in_memory, DbError};
use research_core::{KeyValueStore, SqliteKeyValueStore};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_kv_entries() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(stored_schema_version(&conn).unwrap(), KV_SCHEMA_VERSION);
    assert_table_exists(&conn, "kv_entries");
}

#[test]
fn reopening_file_keeps_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("research.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let mut store = SqliteKeyValueStore::new(&conn);
        store.set_item("researchManager_userName", "ada").unwrap();
    }

    let conn = open_db(&path).unwrap();
    assert_eq!(stored_schema_version(&conn).unwrap(), KV_SCHEMA_VERSION);
    let store = SqliteKeyValueStore::new(&conn);
    assert_eq!(
        store.get_item("researchManager_userName").unwrap().as_deref(),
        Some("ada")
    );
}

#[test]
fn unstamped_file_with_existing_table_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("unstamped.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE kv_entries (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            updated_at INTEGER NOT NULL DEFAULT 0
        );
        INSERT INTO kv_entries (key, value) VALUES ('researchManager_userName', 'grace');",
    )
    .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(stored_schema_version(&conn).unwrap(), KV_SCHEMA_VERSION);
    let store = SqliteKeyValueStore::new(&conn);
    assert_eq!(
        store.get_item("researchManager_userName").unwrap().as_deref(),
        Some("grace")
    );
}

#[test]
fn opening_file_from_newer_build_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::NewerSchema { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, KV_SCHEMA_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
