use crate::core::error::StoreError;
use crate::core::store::Store;
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub status_id: i64,
    pub status_name: String,
}

pub fn get_statuses(store: &Store) -> Result<Vec<Status>, StoreError> {
    store.pool().with_read(|conn| {
        let mut stmt =
            conn.prepare("SELECT status_id, status_name FROM status ORDER BY status_id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Status {
                status_id: row.get(0)?,
                status_name: row.get(1)?,
            })
        })?;

        let mut results = Vec::new();
        for r in rows {
            results.push(r?);
        }
        Ok(results)
    })
}

/// `Ok(None)` when no status has this name; only storage failures are errors.
pub fn get_status_id(store: &Store, status_name: &str) -> Result<Option<i64>, StoreError> {
    store
        .pool()
        .with_read(|conn| lookup_status_id(conn, status_name))
}

pub(crate) fn lookup_status_id(
    conn: &Connection,
    status_name: &str,
) -> Result<Option<i64>, StoreError> {
    conn.query_row(
        "SELECT status_id FROM status WHERE status_name = ?1",
        params![status_name],
        |row| row.get(0),
    )
    .optional()
    .map_err(StoreError::RusqliteError)
}

pub(crate) fn status_exists(conn: &Connection, status_id: i64) -> Result<bool, StoreError> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM status WHERE status_id = ?1",
            params![status_id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}
