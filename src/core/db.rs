use crate::core::error;
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Open a connection with the pragmas every store connection relies on.
/// `foreign_keys` is per-connection in SQLite, so it must be set on each open.
pub fn db_connect_pooled(
    db_path: &Path,
    busy_timeout_secs: u32,
) -> Result<Connection, error::StoreError> {
    let conn = Connection::open(db_path)?;
    conn.busy_timeout(Duration::from_secs(u64::from(busy_timeout_secs)))
        .map_err(error::StoreError::RusqliteError)?;
    conn.query_row("PRAGMA journal_mode=WAL;", [], |_| Ok(()))
        .map_err(error::StoreError::RusqliteError)?;
    conn.execute("PRAGMA foreign_keys=ON;", [])
        .map_err(error::StoreError::RusqliteError)?;
    Ok(conn)
}

pub fn ensure_parent_dir(db_path: &Path) -> Result<(), error::StoreError> {
    let parent = db_path.parent().ok_or_else(|| {
        error::StoreError::DatabaseInitializationError(format!(
            "database path has no parent: {}",
            db_path.display()
        ))
    })?;
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent).map_err(error::StoreError::IoError)?;
    }
    Ok(())
}
