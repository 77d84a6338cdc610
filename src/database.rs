use std::path::Path;

use log::debug;
use rusqlite::{params, Connection};

use crate::{
    config::{DbWriteMode, TableName},
    schema::BookmarkRecord,
};

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Failed to open the database at {path:?}: {source}")]
    Open {
        path: std::path::PathBuf,
        source: rusqlite::Error,
    },
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub fn create_table(conn: &Connection, table: &TableName) -> rusqlite::Result<()> {
    conn.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS {table} (
            id              INTEGER PRIMARY KEY,
            title           TEXT,
            link            TEXT,
            description     TEXT,
            new_chapters    TEXT,
            opened_chapters TEXT,
            type_label      TEXT,
            image_path      TEXT
        )"
    ))
}

/// Stores `records` under ids `1..=records.len()` in one transaction.
///
/// With [`DbWriteMode::Upsert`], rows whose id exceeds `records.len()`
/// are left as they were.
pub fn save_to_db(
    records: &[BookmarkRecord],
    path: &Path,
    table: &TableName,
    mode: DbWriteMode,
) -> Result<usize, DatabaseError> {
    let mut conn = Connection::open(path).map_err(|source| DatabaseError::Open {
        path: path.to_owned(),
        source,
    })?;
    create_table(&conn, table)?;

    let tx = conn.transaction()?;
    if mode == DbWriteMode::Replace {
        let deleted = tx.execute(&format!("DELETE FROM {table}"), [])?;
        debug!("Deleted {deleted} rows from {table}");
    }
    {
        let mut stmt = tx.prepare(&format!(
            "INSERT OR REPLACE INTO {table} (
                id, title, link, description, new_chapters, opened_chapters, type_label, image_path
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
        ))?;
        for (id, record) in (1i64..).zip(records) {
            stmt.execute(params![
                id,
                record.title,
                record.link,
                record.description,
                record.new_chapters,
                record.opened_chapters,
                record.type_label,
                record.image_path,
            ])?;
        }
    }
    tx.commit()?;
    Ok(records.len())
}
