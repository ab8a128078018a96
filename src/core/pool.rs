//! SQLite connection pool with read/write separation.
//!
//! - Writes are serialized per database file through a process-wide mutex and run
//!   inside a single `IMMEDIATE` transaction. `Ok` commits, `Err` (or a panic)
//!   drops the transaction, which rolls it back.
//! - Reads open a fresh connection with no mutex; WAL lets them run alongside
//!   the writer.
//!
//! Connections are opened per operation and dropped when the closure returns, so
//! no caller can hold one across an external wait.

use crate::core::db;
use crate::core::error::StoreError;
use rusqlite::{Connection, TransactionBehavior};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

/// Two pools opened on the same file must share one write lock.
fn write_lock_for(db_path: &Path) -> Arc<Mutex<()>> {
    static LOCKS: OnceLock<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> = OnceLock::new();
    let locks = LOCKS.get_or_init(|| Mutex::new(HashMap::new()));
    let mut locks = locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    locks
        .entry(db_path.to_path_buf())
        .or_insert_with(|| Arc::new(Mutex::new(())))
        .clone()
}

#[derive(Debug, Clone)]
pub struct SqlitePool {
    db_path: PathBuf,
    busy_timeout_secs: u32,
    write_lock: Arc<Mutex<()>>,
}

impl SqlitePool {
    pub fn new(db_path: &Path, busy_timeout_secs: u32) -> Self {
        Self {
            db_path: db_path.to_path_buf(),
            busy_timeout_secs,
            write_lock: write_lock_for(db_path),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        // A writer that panicked already had its transaction rolled back on drop.
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Execute a closure inside one write transaction.
    pub fn with_write<F, R>(&self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&Connection) -> Result<R, StoreError>,
    {
        let _guard = self.lock_writes();
        let mut conn = db::db_connect_pooled(&self.db_path, self.busy_timeout_secs)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let out = f(&tx)?;
        tx.commit()?;
        Ok(out)
    }

    /// Execute a closure with a read connection (no mutex serialization).
    pub fn with_read<F, R>(&self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&Connection) -> Result<R, StoreError>,
    {
        let conn = db::db_connect_pooled(&self.db_path, self.busy_timeout_secs)?;
        f(&conn)
    }
}
