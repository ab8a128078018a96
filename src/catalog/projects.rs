//! Project records: create, read, update, and delete.
//!
//! Every lookup by name is scoped to an owner. Updates address a project by id
//! and go through [`ProjectUpdate`], a closed set of updatable fields where each
//! variant maps to exactly one column at compile time.

use crate::catalog::statuses;
use crate::core::error::StoreError;
use crate::core::store::Store;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub project_id: i64,
    pub owner_id: String,
    pub project_name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub status_id: i64,
    pub screenshot: Option<String>,
}

/// Descriptive fields of one project with its status resolved to a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub project_name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub status_name: String,
    pub screenshot: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub owner_id: String,
    pub project_name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub status_name: String,
    pub screenshot: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectColumn {
    ProjectName,
    Description,
    Url,
    StatusId,
    Screenshot,
}

impl ProjectColumn {
    pub const ALL: [ProjectColumn; 5] = [
        ProjectColumn::ProjectName,
        ProjectColumn::Description,
        ProjectColumn::Url,
        ProjectColumn::StatusId,
        ProjectColumn::Screenshot,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectColumn::ProjectName => "project_name",
            ProjectColumn::Description => "description",
            ProjectColumn::Url => "url",
            ProjectColumn::StatusId => "status_id",
            ProjectColumn::Screenshot => "screenshot",
        }
    }

    fn update_sql(self) -> &'static str {
        match self {
            ProjectColumn::ProjectName => {
                "UPDATE projects SET project_name = ?1 WHERE project_id = ?2"
            }
            ProjectColumn::Description => {
                "UPDATE projects SET description = ?1 WHERE project_id = ?2"
            }
            ProjectColumn::Url => "UPDATE projects SET url = ?1 WHERE project_id = ?2",
            ProjectColumn::StatusId => "UPDATE projects SET status_id = ?1 WHERE project_id = ?2",
            ProjectColumn::Screenshot => {
                "UPDATE projects SET screenshot = ?1 WHERE project_id = ?2"
            }
        }
    }
}

impl fmt::Display for ProjectColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectColumn {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectColumn::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                let allowed = ProjectColumn::ALL
                    .iter()
                    .map(|c| c.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                StoreError::ValidationError(format!(
                    "field '{}' cannot be updated (allowed: {})",
                    s, allowed
                ))
            })
    }
}

/// A single-field change to a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectUpdate {
    Name(String),
    Description(Option<String>),
    Url(Option<String>),
    Status(i64),
    Screenshot(Option<String>),
}

impl ProjectUpdate {
    pub fn column(&self) -> ProjectColumn {
        match self {
            ProjectUpdate::Name(_) => ProjectColumn::ProjectName,
            ProjectUpdate::Description(_) => ProjectColumn::Description,
            ProjectUpdate::Url(_) => ProjectColumn::Url,
            ProjectUpdate::Status(_) => ProjectColumn::StatusId,
            ProjectUpdate::Screenshot(_) => ProjectColumn::Screenshot,
        }
    }

    /// Build an update from a column and its raw text value.
    /// `status_id` values must parse as an integer id.
    pub fn from_column(column: ProjectColumn, value: &str) -> Result<Self, StoreError> {
        Ok(match column {
            ProjectColumn::ProjectName => ProjectUpdate::Name(value.to_string()),
            ProjectColumn::Description => ProjectUpdate::Description(Some(value.to_string())),
            ProjectColumn::Url => ProjectUpdate::Url(Some(value.to_string())),
            ProjectColumn::StatusId => {
                let id = value.trim().parse::<i64>().map_err(|_| {
                    StoreError::ValidationError(format!(
                        "status_id must be an integer, got '{}'",
                        value
                    ))
                })?;
                ProjectUpdate::Status(id)
            }
            ProjectColumn::Screenshot => ProjectUpdate::Screenshot(Some(value.to_string())),
        })
    }

    fn value(&self) -> Value {
        fn opt_text(v: &Option<String>) -> Value {
            v.clone().map(Value::Text).unwrap_or(Value::Null)
        }
        match self {
            ProjectUpdate::Name(name) => Value::Text(name.clone()),
            ProjectUpdate::Description(v) | ProjectUpdate::Url(v) | ProjectUpdate::Screenshot(v) => {
                opt_text(v)
            }
            ProjectUpdate::Status(id) => Value::Integer(*id),
        }
    }
}

fn require_name(name: &str) -> Result<(), StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::ValidationError(
            "project_name must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Lowest matching id wins when legacy data holds duplicate names.
pub(crate) fn find_project_id(
    conn: &Connection,
    owner_id: &str,
    project_name: &str,
) -> Result<Option<i64>, StoreError> {
    conn.query_row(
        "SELECT project_id FROM projects
         WHERE project_name = ?1 AND owner_id = ?2
         ORDER BY project_id LIMIT 1",
        params![project_name, owner_id],
        |row| row.get(0),
    )
    .optional()
    .map_err(StoreError::RusqliteError)
}

/// Insert a project and return its id.
pub fn create_project(store: &Store, project: &NewProject) -> Result<i64, StoreError> {
    require_name(&project.project_name)?;

    let project_id = store.pool().with_write(|conn| {
        let status_id = statuses::lookup_status_id(conn, &project.status_name)?.ok_or_else(
            || StoreError::ValidationError(format!("unknown status '{}'", project.status_name)),
        )?;

        if find_project_id(conn, &project.owner_id, &project.project_name)?.is_some() {
            return Err(StoreError::ValidationError(format!(
                "project '{}' already exists",
                project.project_name
            )));
        }

        conn.execute(
            "INSERT INTO projects (owner_id, project_name, description, url, status_id, screenshot)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                project.owner_id,
                project.project_name,
                project.description,
                project.url,
                status_id,
                project.screenshot
            ],
        )?;
        Ok(conn.last_insert_rowid())
    })?;

    tracing::info!(
        project_id,
        owner = %project.owner_id,
        name = %project.project_name,
        "project created"
    );
    Ok(project_id)
}

pub fn get_projects(store: &Store, owner_id: &str) -> Result<Vec<Project>, StoreError> {
    store.pool().with_read(|conn| {
        let mut stmt = conn.prepare(
            "SELECT project_id, owner_id, project_name, description, url, status_id, screenshot
             FROM projects WHERE owner_id = ?1 ORDER BY project_id",
        )?;
        let rows = stmt.query_map(params![owner_id], |row| {
            Ok(Project {
                project_id: row.get(0)?,
                owner_id: row.get(1)?,
                project_name: row.get(2)?,
                description: row.get(3)?,
                url: row.get(4)?,
                status_id: row.get(5)?,
                screenshot: row.get(6)?,
            })
        })?;

        let mut results = Vec::new();
        for r in rows {
            results.push(r?);
        }
        tracing::debug!(owner = %owner_id, count = results.len(), "projects listed");
        Ok(results)
    })
}

pub fn get_project_info(
    store: &Store,
    owner_id: &str,
    project_name: &str,
) -> Result<Option<ProjectInfo>, StoreError> {
    store.pool().with_read(|conn| {
        conn.query_row(
            "SELECT p.project_name, p.description, p.url, COALESCE(s.status_name, ''), p.screenshot
             FROM projects p
             LEFT JOIN status s ON s.status_id = p.status_id
             WHERE p.project_name = ?1 AND p.owner_id = ?2
             ORDER BY p.project_id LIMIT 1",
            params![project_name, owner_id],
            |row| {
                Ok(ProjectInfo {
                    project_name: row.get(0)?,
                    description: row.get(1)?,
                    url: row.get(2)?,
                    status_name: row.get(3)?,
                    screenshot: row.get(4)?,
                })
            },
        )
        .optional()
        .map_err(StoreError::RusqliteError)
    })
}

pub fn get_project_id(
    store: &Store,
    project_name: &str,
    owner_id: &str,
) -> Result<i64, StoreError> {
    store
        .pool()
        .with_read(|conn| find_project_id(conn, owner_id, project_name))?
        .ok_or_else(|| StoreError::NotFound(format!("project '{}'", project_name)))
}

pub fn update_project(
    store: &Store,
    project_id: i64,
    update: &ProjectUpdate,
) -> Result<(), StoreError> {
    if let ProjectUpdate::Name(name) = update {
        require_name(name)?;
    }

    store.pool().with_write(|conn| {
        let owner_id: Option<String> = conn
            .query_row(
                "SELECT owner_id FROM projects WHERE project_id = ?1",
                params![project_id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| StoreError::NotFound(format!("project id {}", project_id)))?;

        match update {
            ProjectUpdate::Status(status_id) => {
                if !statuses::status_exists(conn, *status_id)? {
                    return Err(StoreError::NotFound(format!("status id {}", status_id)));
                }
            }
            ProjectUpdate::Name(name) => {
                let owner = owner_id.unwrap_or_default();
                if let Some(existing) = find_project_id(conn, &owner, name)? {
                    if existing != project_id {
                        return Err(StoreError::ValidationError(format!(
                            "project '{}' already exists",
                            name
                        )));
                    }
                }
            }
            _ => {}
        }

        conn.execute(
            update.column().update_sql(),
            params![update.value(), project_id],
        )?;
        Ok(())
    })?;

    tracing::info!(project_id, column = %update.column(), "project updated");
    Ok(())
}

/// Parse a runtime field name and apply it. Disallowed names fail before any
/// database access.
pub fn update_project_column(
    store: &Store,
    column: &str,
    value: &str,
    project_id: i64,
) -> Result<(), StoreError> {
    let column: ProjectColumn = column.parse()?;
    let update = ProjectUpdate::from_column(column, value)?;
    update_project(store, project_id, &update)
}

/// Remove a project and its skill links in one transaction. Returns `false`
/// when `project_id` is not owned by `owner_id`; nothing is touched then.
pub fn delete_project(store: &Store, owner_id: &str, project_id: i64) -> Result<bool, StoreError> {
    let removed = store.pool().with_write(|conn| {
        let owned: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM projects WHERE project_id = ?1 AND owner_id = ?2",
                params![project_id, owner_id],
                |row| row.get(0),
            )
            .optional()?;
        if owned.is_none() {
            return Ok(None);
        }

        let links = conn.execute(
            "DELETE FROM project_skills WHERE project_id = ?1",
            params![project_id],
        )?;
        conn.execute(
            "DELETE FROM projects WHERE project_id = ?1 AND owner_id = ?2",
            params![project_id, owner_id],
        )?;
        Ok(Some(links))
    })?;

    match removed {
        Some(links) => {
            tracing::info!(project_id, owner = %owner_id, links, "project deleted");
            Ok(true)
        }
        None => {
            tracing::debug!(project_id, owner = %owner_id, "delete matched no project");
            Ok(false)
        }
    }
}
