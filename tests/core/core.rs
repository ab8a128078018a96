use projectbook::catalog::projects::{
    NewProject, create_project, get_project_id, get_project_info,
};
use projectbook::catalog::skills::{attach_skill, get_project_skills};
use projectbook::core::config::{self, StoreConfig};
use projectbook::core::db;
use projectbook::core::error::StoreError;
use projectbook::core::migration;
use projectbook::core::schemas;
use projectbook::core::store::Store;
use rusqlite::{Connection, params};
use std::fs;
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::tempdir;

fn project(owner: &str, name: &str) -> NewProject {
    NewProject {
        owner_id: owner.to_string(),
        project_name: name.to_string(),
        description: None,
        url: None,
        status_name: "prototype".to_string(),
        screenshot: None,
    }
}

fn scalar(conn: &Connection, sql: &str) -> i64 {
    conn.query_row(sql, [], |row| row.get(0)).expect("scalar query")
}

/// Tables as an earlier release wrote them: no `screenshot`, no `meta`,
/// no uniqueness on project names.
fn write_legacy_db(path: &std::path::Path) -> Connection {
    let conn = Connection::open(path).expect("open legacy");
    conn.execute_batch(
        "CREATE TABLE status (status_id INTEGER PRIMARY KEY, status_name TEXT);
         CREATE TABLE skills (skill_id INTEGER PRIMARY KEY, skill_name TEXT);
         CREATE TABLE projects (
             project_id INTEGER PRIMARY KEY,
             owner_id TEXT,
             project_name TEXT NOT NULL,
             description TEXT,
             url TEXT,
             status_id INTEGER,
             FOREIGN KEY(status_id) REFERENCES status(status_id)
         );
         CREATE TABLE project_skills (
             project_id INTEGER,
             skill_id INTEGER,
             FOREIGN KEY(project_id) REFERENCES projects(project_id),
             FOREIGN KEY(skill_id) REFERENCES skills(skill_id)
         );
         INSERT INTO status (status_name) VALUES ('prototype');
         INSERT INTO skills (skill_name) VALUES ('Python');",
    )
    .expect("legacy schema");
    conn
}

#[test]
fn connections_enforce_foreign_keys_and_wal() {
    let tmp = tempdir().expect("tempdir");
    let store = Store::open(tmp.path(), &StoreConfig::default()).expect("open");
    let conn = db::db_connect_pooled(store.db_path(), 5).expect("connect");

    assert_eq!(scalar(&conn, "PRAGMA foreign_keys;"), 1);
    let mode: String = conn
        .query_row("PRAGMA journal_mode;", [], |row| row.get(0))
        .expect("journal_mode");
    assert_eq!(mode.to_lowercase(), "wal");

    let dangling = conn.execute(
        "INSERT INTO project_skills (project_id, skill_id) VALUES (?1, ?2)",
        params![404, 1],
    );
    assert!(dangling.is_err(), "dangling association must be rejected");
}

#[test]
fn ensure_schema_is_idempotent_and_records_version() {
    let tmp = tempdir().expect("tempdir");
    let conn = Connection::open(tmp.path().join("p.db")).expect("open");

    assert_eq!(migration::ensure_schema(&conn).expect("first"), 0);
    assert_eq!(
        migration::ensure_schema(&conn).expect("second"),
        schemas::SCHEMA_VERSION
    );
    assert_eq!(
        migration::stored_schema_version(&conn).expect("version"),
        schemas::SCHEMA_VERSION
    );

    let columns = migration::table_columns(&conn, "projects").expect("columns");
    for expected in [
        "project_id",
        "owner_id",
        "project_name",
        "description",
        "url",
        "status_id",
        "screenshot",
    ] {
        assert!(columns.iter().any(|c| c == expected), "missing {expected}");
    }
}

#[test]
fn legacy_projects_table_gains_screenshot_without_losing_rows() {
    let tmp = tempdir().expect("tempdir");
    let db_path = tmp.path().join(config::DEFAULT_DB_NAME);
    let legacy = write_legacy_db(&db_path);
    legacy
        .execute(
            "INSERT INTO projects (owner_id, project_name, description, url, status_id)
             VALUES ('u1', 'Old', 'kept', 'http://old', 1)",
            [],
        )
        .expect("legacy row");
    drop(legacy);

    let store = Store::open(tmp.path(), &StoreConfig::default()).expect("open legacy");
    let info = get_project_info(&store, "u1", "Old")
        .expect("query")
        .expect("legacy row survives");
    assert_eq!(info.description.as_deref(), Some("kept"));
    assert_eq!(info.status_name, "prototype");
    assert_eq!(info.screenshot, None);

    // Seeding skipped names the legacy tables already held.
    let conn = Connection::open(store.db_path()).expect("verify");
    assert_eq!(
        scalar(&conn, "SELECT COUNT(*) FROM status WHERE status_name = 'prototype'"),
        1
    );
    assert_eq!(
        scalar(&conn, "SELECT COUNT(*) FROM skills WHERE skill_name = 'Python'"),
        1
    );

    // Reopening must not try to add the column again.
    Store::open(tmp.path(), &StoreConfig::default()).expect("reopen");
}

#[test]
fn legacy_duplicate_names_resolve_to_first_project() {
    let tmp = tempdir().expect("tempdir");
    let db_path = tmp.path().join(config::DEFAULT_DB_NAME);
    let legacy = write_legacy_db(&db_path);
    legacy
        .execute_batch(
            "INSERT INTO projects (owner_id, project_name, status_id) VALUES ('u1', 'Dup', 1);
             INSERT INTO projects (owner_id, project_name, status_id) VALUES ('u1', 'Dup', 1);",
        )
        .expect("duplicates");
    let first = scalar(&legacy, "SELECT MIN(project_id) FROM projects");
    drop(legacy);

    let store = Store::open(tmp.path(), &StoreConfig::default()).expect("open despite duplicates");
    assert_eq!(get_project_id(&store, "Dup", "u1").expect("resolve"), first);

    attach_skill(&store, "u1", "Dup", "Python").expect("attach");
    let conn = Connection::open(store.db_path()).expect("verify");
    assert_eq!(
        scalar(&conn, "SELECT project_id FROM project_skills"),
        first
    );
}

#[test]
fn failed_write_rolls_back_every_statement() {
    let tmp = tempdir().expect("tempdir");
    let store = Store::open(tmp.path(), &StoreConfig::default()).expect("open");
    create_project(&store, &project("u1", "Tracker")).expect("create");
    attach_skill(&store, "u1", "Tracker", "Python").expect("attach");

    let result: Result<(), StoreError> = store.pool().with_write(|conn| {
        conn.execute("DELETE FROM project_skills", [])?;
        conn.execute("DELETE FROM projects", [])?;
        Err(StoreError::ValidationError("abort".to_string()))
    });
    assert!(result.is_err());

    assert_eq!(get_project_skills(&store, "Tracker").expect("skills"), "Python");
    assert!(get_project_info(&store, "u1", "Tracker").expect("info").is_some());
}

#[test]
fn concurrent_writers_share_reference_tables_safely() {
    let tmp = tempdir().expect("tempdir");
    let store = Store::open(tmp.path(), &StoreConfig::default()).expect("open");
    let workers = 8;
    let barrier = Arc::new(Barrier::new(workers));

    let handles: Vec<_> = (0..workers)
        .map(|i| {
            let store = store.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let owner = format!("u{}", i % 2);
                let name = format!("P{}", i);
                store.reseed().expect("reseed");
                create_project(&store, &project(&owner, &name)).expect("create");
                attach_skill(&store, &owner, &name, "Python").expect("attach");
                attach_skill(&store, &owner, &name, "Python").expect("attach again");
            })
        })
        .collect();
    for h in handles {
        h.join().expect("worker panicked");
    }

    let conn = Connection::open(store.db_path()).expect("verify");
    assert_eq!(scalar(&conn, "SELECT COUNT(*) FROM status"), 5);
    assert_eq!(scalar(&conn, "SELECT COUNT(*) FROM skills"), 4);
    assert_eq!(scalar(&conn, "SELECT COUNT(*) FROM projects"), workers as i64);
    assert_eq!(scalar(&conn, "SELECT COUNT(*) FROM project_skills"), workers as i64);
}

#[test]
fn config_file_in_root_sets_db_path_and_vocabulary() {
    let tmp = tempdir().expect("tempdir");
    fs::write(
        tmp.path().join(config::CONFIG_FILE_NAME),
        r#"
        [storage]
        path = "nested/book.db"

        [vocabulary]
        statuses = ["idea", "live"]
        skills = ["Rust"]
        "#,
    )
    .expect("write config");

    let cfg = config::load_config(tmp.path(), None).expect("load");
    let store = Store::open(tmp.path(), &cfg).expect("open");
    assert_eq!(store.db_path(), tmp.path().join("nested/book.db"));
    assert!(store.db_path().exists());
    assert_eq!(store.vocabulary().statuses, vec!["idea", "live"]);

    let err = create_project(&store, &project("u1", "X")).expect_err("prototype is not seeded");
    assert!(err.is_validation());
}

#[test]
fn missing_explicit_config_is_an_error() {
    let tmp = tempdir().expect("tempdir");
    let err = config::load_config(tmp.path(), Some(&tmp.path().join("absent.toml")))
        .expect_err("explicit path must exist");
    assert!(matches!(err, StoreError::ConfigError(_)));

    let cfg = config::load_config(tmp.path(), None).expect("implicit path is optional");
    assert_eq!(cfg.vocabulary, config::Vocabulary::default());
}
