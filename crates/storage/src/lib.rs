#![forbid(unsafe_code)]

mod error;
mod requests;
mod tabs;

pub use error::StoreError;
pub use requests::*;

use rusqlite::{Connection, OptionalExtension, Transaction, params};
use std::path::{Path, PathBuf};
use std::time::Duration;
use td_core::chain::ChainEntry;
use td_core::ids::OwnerId;

const DB_FILE: &str = "tabdeck.db";

/// One stored tab. `payload_json` is an opaque blob the registry never
/// inspects; callers that need the decoded value go through [`TabRow::payload`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabRow {
    pub owner: String,
    pub id: String,
    pub title: String,
    pub kind: String,
    pub payload_json: Option<String>,
    pub predecessor_id: Option<String>,
    pub is_active: bool,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

impl TabRow {
    pub fn payload(&self) -> Result<Option<serde_json::Value>, serde_json::Error> {
        self.payload_json
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
    }
}

/// The tab registry: item store, ordering engine, and query facade behind
/// one SQLite handle. Every mutating operation runs as a single transaction,
/// so a failure midway leaves no visible state change; conflicting writers
/// on the same database serialize on the SQLite lock.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    storage_dir: PathBuf,
}

impl SqliteStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)?;

        let db_path = storage_dir.join(DB_FILE);
        let conn = Connection::open(db_path)?;
        conn.busy_timeout(Duration::from_secs(5))?;

        install_schema(&conn)?;

        Ok(Self { conn, storage_dir })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }
}

fn install_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode=WAL;
        PRAGMA synchronous=NORMAL;

        CREATE TABLE IF NOT EXISTS meta (
          key TEXT PRIMARY KEY,
          value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS owners (
          owner TEXT PRIMARY KEY,
          created_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS counters (
          owner TEXT NOT NULL,
          name TEXT NOT NULL,
          value INTEGER NOT NULL,
          PRIMARY KEY (owner, name)
        );

        CREATE TABLE IF NOT EXISTS tabs (
          owner TEXT NOT NULL,
          id TEXT NOT NULL,
          title TEXT NOT NULL,
          kind TEXT NOT NULL,
          payload_json TEXT,
          predecessor_id TEXT,
          is_active INTEGER NOT NULL DEFAULT 0,
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL,
          PRIMARY KEY (owner, id)
        );

        CREATE INDEX IF NOT EXISTS idx_tabs_owner_predecessor
          ON tabs(owner, predecessor_id);
        "#,
    )?;
    conn.execute(
        "INSERT OR IGNORE INTO meta(key, value) VALUES (?1, ?2)",
        params!["schema_version", "v1"],
    )?;
    Ok(())
}

fn now_ms() -> i64 {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    now.as_millis() as i64
}

fn ensure_owner_tx(tx: &Transaction<'_>, owner: &OwnerId, now_ms: i64) -> Result<(), StoreError> {
    tx.execute(
        "INSERT OR IGNORE INTO owners(owner, created_at_ms) VALUES (?1, ?2)",
        params![owner.as_str(), now_ms],
    )?;
    Ok(())
}

fn next_counter_tx(tx: &Transaction<'_>, owner: &str, name: &str) -> Result<i64, StoreError> {
    let current: i64 = tx
        .query_row(
            "SELECT value FROM counters WHERE owner=?1 AND name=?2",
            params![owner, name],
            |row| row.get(0),
        )
        .optional()?
        .unwrap_or(0);
    let next = current + 1;
    tx.execute(
        r#"
        INSERT INTO counters(owner, name, value) VALUES (?1, ?2, ?3)
        ON CONFLICT(owner, name) DO UPDATE SET value=excluded.value
        "#,
        params![owner, name, next],
    )?;
    Ok(next)
}

const TAB_COLUMNS: &str =
    "owner, id, title, kind, payload_json, predecessor_id, is_active, created_at_ms, updated_at_ms";

fn tab_from_sql_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TabRow> {
    Ok(TabRow {
        owner: row.get(0)?,
        id: row.get(1)?,
        title: row.get(2)?,
        kind: row.get(3)?,
        payload_json: row.get(4)?,
        predecessor_id: row.get(5)?,
        is_active: row.get::<_, i64>(6)? != 0,
        created_at_ms: row.get(7)?,
        updated_at_ms: row.get(8)?,
    })
}

fn read_tab(conn: &Connection, owner: &str, id: &str) -> Result<Option<TabRow>, StoreError> {
    let sql = format!("SELECT {TAB_COLUMNS} FROM tabs WHERE owner=?1 AND id=?2");
    Ok(conn
        .query_row(&sql, params![owner, id], |row| tab_from_sql_row(row))
        .optional()?)
}

fn read_owner_tabs(conn: &Connection, owner: &str) -> Result<Vec<TabRow>, StoreError> {
    let sql = format!("SELECT {TAB_COLUMNS} FROM tabs WHERE owner=?1 ORDER BY created_at_ms, id");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![owner], |row| tab_from_sql_row(row))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn chain_entries(rows: &[TabRow]) -> Vec<ChainEntry> {
    rows.iter()
        .map(|row| ChainEntry::new(row.id.clone(), row.predecessor_id.clone()))
        .collect()
}
