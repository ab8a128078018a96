//! Schema initialization and additive evolution.
//!
//! `ensure_schema` runs on every store open. It is idempotent: tables are created
//! with `IF NOT EXISTS`, new columns are added only when `PRAGMA table_info` says
//! they are missing, and the applied version is recorded in `meta` so later opens
//! return early.

use crate::core::error;
use crate::core::schemas;
use rusqlite::{Connection, ErrorCode, OptionalExtension};

pub fn stored_schema_version(conn: &Connection) -> Result<u32, error::StoreError> {
    conn.execute(schemas::DB_SCHEMA_META, [])?;
    let current: Option<String> = conn
        .query_row(
            "SELECT value FROM meta WHERE key = 'schema_version'",
            [],
            |row| row.get(0),
        )
        .optional()
        .map_err(error::StoreError::RusqliteError)?;

    Ok(current
        .as_deref()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(0))
}

/// Create or upgrade the schema. Returns the version found before upgrading.
pub fn ensure_schema(conn: &Connection) -> Result<u32, error::StoreError> {
    let current_version = stored_schema_version(conn)?;
    if current_version >= schemas::SCHEMA_VERSION {
        return Ok(current_version);
    }

    // Reference tables first so the projects FK has a target.
    conn.execute(schemas::DB_SCHEMA_STATUS, [])?;
    conn.execute(schemas::DB_SCHEMA_SKILLS, [])?;
    conn.execute(schemas::DB_SCHEMA_PROJECTS, [])?;
    conn.execute(schemas::DB_SCHEMA_PROJECT_SKILLS, [])?;

    for (table, column, decl) in schemas::ADDITIVE_COLUMNS {
        add_column_if_missing(conn, table, column, decl)?;
    }

    conn.execute(schemas::DB_SCHEMA_INDEX_PROJECTS_OWNER, [])?;
    conn.execute(schemas::DB_SCHEMA_INDEX_PROJECT_SKILLS_PROJECT, [])?;

    if current_version < 2 {
        match conn.execute(schemas::DB_SCHEMA_INDEX_PROJECTS_OWNER_NAME, []) {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(code, _))
                if code.code == ErrorCode::ConstraintViolation =>
            {
                tracing::warn!(
                    "existing projects share a name under one owner; \
                     name lookups fall back to the lowest project_id"
                );
            }
            Err(e) => return Err(e.into()),
        }
    }

    conn.execute(
        "INSERT INTO meta(key, value) VALUES('schema_version', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        [schemas::SCHEMA_VERSION.to_string()],
    )?;

    tracing::info!(
        from = current_version,
        to = schemas::SCHEMA_VERSION,
        "schema upgraded"
    );
    Ok(current_version)
}

pub fn table_columns(conn: &Connection, table: &str) -> Result<Vec<String>, error::StoreError> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(names)
}

fn add_column_if_missing(
    conn: &Connection,
    table: &str,
    column: &str,
    decl: &str,
) -> Result<bool, error::StoreError> {
    if table_columns(conn, table)?.iter().any(|c| c == column) {
        return Ok(false);
    }
    conn.execute(
        &format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, decl),
        [],
    )?;
    tracing::info!(table, column, "added column");
    Ok(true)
}
