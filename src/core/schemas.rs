//! Schema definitions for the project store database.
//!
//! Table and column names are the durable contract with databases written by
//! earlier runs; only additive changes are allowed.

pub const SCHEMA_VERSION: u32 = 2;

pub const DB_SCHEMA_META: &str = "
    CREATE TABLE IF NOT EXISTS meta (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    )
";

pub const DB_SCHEMA_STATUS: &str = "
    CREATE TABLE IF NOT EXISTS status (
        status_id INTEGER PRIMARY KEY,
        status_name TEXT UNIQUE
    )
";

pub const DB_SCHEMA_SKILLS: &str = "
    CREATE TABLE IF NOT EXISTS skills (
        skill_id INTEGER PRIMARY KEY,
        skill_name TEXT UNIQUE
    )
";

pub const DB_SCHEMA_PROJECTS: &str = "
    CREATE TABLE IF NOT EXISTS projects (
        project_id INTEGER PRIMARY KEY,
        owner_id TEXT,
        project_name TEXT NOT NULL,
        description TEXT,
        url TEXT,
        status_id INTEGER,
        screenshot TEXT,
        FOREIGN KEY(status_id) REFERENCES status(status_id)
    )
";

pub const DB_SCHEMA_PROJECT_SKILLS: &str = "
    CREATE TABLE IF NOT EXISTS project_skills (
        project_id INTEGER,
        skill_id INTEGER,
        UNIQUE(project_id, skill_id),
        FOREIGN KEY(project_id) REFERENCES projects(project_id),
        FOREIGN KEY(skill_id) REFERENCES skills(skill_id)
    )
";

pub const DB_SCHEMA_INDEX_PROJECTS_OWNER: &str =
    "CREATE INDEX IF NOT EXISTS idx_projects_owner ON projects(owner_id)";

/// Fails on legacy databases that already hold a duplicate name for one owner.
pub const DB_SCHEMA_INDEX_PROJECTS_OWNER_NAME: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_projects_owner_name ON projects(owner_id, project_name)";

pub const DB_SCHEMA_INDEX_PROJECT_SKILLS_PROJECT: &str =
    "CREATE INDEX IF NOT EXISTS idx_project_skills_project ON project_skills(project_id)";

/// Columns added after the first release, as `(table, column, declaration)`.
pub const ADDITIVE_COLUMNS: &[(&str, &str, &str)] = &[("projects", "screenshot", "TEXT")];
