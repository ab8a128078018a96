//! Reference data seeder for the `status` and `skills` tables.
//!
//! Inserts are keyed by name and skip names already present, so the seeder can
//! run on every open. The check does not rely on the UNIQUE constraint, which
//! databases created by older releases may lack.

use crate::core::config::Vocabulary;
use crate::core::error::StoreError;
use crate::core::store::Store;
use rusqlite::{Connection, params};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub statuses_added: usize,
    pub skills_added: usize,
}

pub fn seed_vocabulary(store: &Store, vocabulary: &Vocabulary) -> Result<SeedReport, StoreError> {
    validate_names("status", &vocabulary.statuses)?;
    validate_names("skill", &vocabulary.skills)?;

    store.pool().with_write(|conn| {
        let statuses_added = insert_missing(
            conn,
            "INSERT INTO status (status_name)
             SELECT ?1 WHERE NOT EXISTS (SELECT 1 FROM status WHERE status_name = ?1)",
            &vocabulary.statuses,
        )?;
        let skills_added = insert_missing(
            conn,
            "INSERT INTO skills (skill_name)
             SELECT ?1 WHERE NOT EXISTS (SELECT 1 FROM skills WHERE skill_name = ?1)",
            &vocabulary.skills,
        )?;
        Ok(SeedReport {
            statuses_added,
            skills_added,
        })
    })
}

fn insert_missing(conn: &Connection, sql: &str, names: &[String]) -> Result<usize, StoreError> {
    let mut stmt = conn.prepare(sql)?;
    let mut added = 0;
    for name in names {
        added += stmt.execute(params![name.trim()])?;
    }
    Ok(added)
}

fn validate_names(kind: &str, names: &[String]) -> Result<(), StoreError> {
    if let Some(pos) = names.iter().position(|n| n.trim().is_empty()) {
        return Err(StoreError::ValidationError(format!(
            "{} vocabulary entry {} is empty",
            kind, pos
        )));
    }
    Ok(())
}
