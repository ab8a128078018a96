//! Store handle for the project database.
//!
//! A `Store` ties a root directory to its database file and connection pool.
//! Opening a store initializes the schema and seeds the reference vocabularies,
//! both idempotently, so it is safe to open on every process start.

use crate::catalog::seed::{self, SeedReport};
use crate::core::config::{StoreConfig, Vocabulary};
use crate::core::db;
use crate::core::error::StoreError;
use crate::core::migration;
use crate::core::pool::SqlitePool;
use std::path::{Path, PathBuf};

/// Cheap to clone; clones share the same write lock.
#[derive(Debug, Clone)]
pub struct Store {
    /// Directory holding the database and optional `projectbook.toml`.
    pub root: PathBuf,
    pool: SqlitePool,
    vocabulary: Vocabulary,
    seed_report: SeedReport,
}

impl Store {
    /// Open (creating if needed) the store described by `config`.
    pub fn open(root: &Path, config: &StoreConfig) -> Result<Self, StoreError> {
        let mut store = Self::open_unseeded(root, config)?;
        let report = seed::seed_vocabulary(&store, &store.vocabulary)?;
        store.seed_report = report;
        if report.statuses_added > 0 || report.skills_added > 0 {
            tracing::info!(
                statuses = report.statuses_added,
                skills = report.skills_added,
                "seeded reference vocabulary"
            );
        }
        Ok(store)
    }

    /// Open with the schema ensured but without touching reference data.
    pub fn open_unseeded(root: &Path, config: &StoreConfig) -> Result<Self, StoreError> {
        let db_path = config.db_path(root);
        db::ensure_parent_dir(&db_path)?;
        let pool = SqlitePool::new(&db_path, config.storage.busy_timeout_secs);
        pool.with_write(|conn| migration::ensure_schema(conn).map(|_| ()))?;
        tracing::debug!(db = %db_path.display(), "store opened");
        Ok(Self {
            root: root.to_path_buf(),
            pool,
            vocabulary: config.vocabulary.clone(),
            seed_report: SeedReport::default(),
        })
    }

    /// Re-run the seeder with the vocabulary this store was opened with.
    pub fn reseed(&self) -> Result<SeedReport, StoreError> {
        seed::seed_vocabulary(self, &self.vocabulary)
    }

    /// Rows the seeder added when this store was opened.
    pub fn seed_report(&self) -> SeedReport {
        self.seed_report
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn db_path(&self) -> &Path {
        self.pool.db_path()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }
}
