use crate::catalog::projects::find_project_id;
use crate::core::error::StoreError;
use crate::core::store::Store;
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub skill_id: i64,
    pub skill_name: String,
}

pub fn get_skills(store: &Store) -> Result<Vec<Skill>, StoreError> {
    store.pool().with_read(|conn| {
        let mut stmt = conn.prepare("SELECT skill_id, skill_name FROM skills ORDER BY skill_id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Skill {
                skill_id: row.get(0)?,
                skill_name: row.get(1)?,
            })
        })?;

        let mut results = Vec::new();
        for r in rows {
            results.push(r?);
        }
        Ok(results)
    })
}

fn lookup_skill_id(conn: &Connection, skill_name: &str) -> Result<Option<i64>, StoreError> {
    conn.query_row(
        "SELECT skill_id FROM skills WHERE skill_name = ?1",
        params![skill_name],
        |row| row.get(0),
    )
    .optional()
    .map_err(StoreError::RusqliteError)
}

/// Resolve the owner's project and the skill, or fail with `NotFound` naming
/// whichever is missing.
fn resolve_link(
    conn: &Connection,
    owner_id: &str,
    project_name: &str,
    skill_name: &str,
) -> Result<(i64, i64), StoreError> {
    let project_id = find_project_id(conn, owner_id, project_name)?
        .ok_or_else(|| StoreError::NotFound(format!("project '{}'", project_name)))?;
    let skill_id = lookup_skill_id(conn, skill_name)?
        .ok_or_else(|| StoreError::NotFound(format!("skill '{}'", skill_name)))?;
    Ok((project_id, skill_id))
}

/// Link a skill to one of the owner's projects. Returns `false` if the link
/// already existed.
pub fn attach_skill(
    store: &Store,
    owner_id: &str,
    project_name: &str,
    skill_name: &str,
) -> Result<bool, StoreError> {
    let inserted = store.pool().with_write(|conn| {
        let (project_id, skill_id) = resolve_link(conn, owner_id, project_name, skill_name)?;
        let n = conn.execute(
            "INSERT INTO project_skills (project_id, skill_id)
             SELECT ?1, ?2 WHERE NOT EXISTS (
                 SELECT 1 FROM project_skills WHERE project_id = ?1 AND skill_id = ?2
             )",
            params![project_id, skill_id],
        )?;
        Ok(n > 0)
    })?;

    tracing::info!(owner = %owner_id, project = %project_name, skill = %skill_name, inserted, "skill attached");
    Ok(inserted)
}

/// Unlink a skill from one of the owner's projects. Returns `false` if it was
/// not linked.
pub fn detach_skill(
    store: &Store,
    owner_id: &str,
    project_name: &str,
    skill_name: &str,
) -> Result<bool, StoreError> {
    let removed = store.pool().with_write(|conn| {
        let (project_id, skill_id) = resolve_link(conn, owner_id, project_name, skill_name)?;
        let n = conn.execute(
            "DELETE FROM project_skills WHERE project_id = ?1 AND skill_id = ?2",
            params![project_id, skill_id],
        )?;
        Ok(n > 0)
    })?;

    tracing::info!(owner = %owner_id, project = %project_name, skill = %skill_name, removed, "skill detached");
    Ok(removed)
}

/// Skill names attached to every project called `project_name`, in attachment
/// order, joined with ", ". Empty when there are none.
pub fn get_project_skills(store: &Store, project_name: &str) -> Result<String, StoreError> {
    let names = store.pool().with_read(|conn| {
        let mut stmt = conn.prepare(
            "SELECT s.skill_name FROM projects p
             JOIN project_skills ps ON p.project_id = ps.project_id
             JOIN skills s ON s.skill_id = ps.skill_id
             WHERE p.project_name = ?1
             ORDER BY ps.rowid",
        )?;
        let names = stmt
            .query_map(params![project_name], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    })?;
    Ok(names.join(", "))
}

/// Skill names attached to the owner's project `project_name`, in attachment
/// order, joined with ", ". Fails with `NotFound` when the owner has no such
/// project.
pub fn get_owner_project_skills(
    store: &Store,
    owner_id: &str,
    project_name: &str,
) -> Result<String, StoreError> {
    let names = store.pool().with_read(|conn| {
        let project_id = find_project_id(conn, owner_id, project_name)?
            .ok_or_else(|| StoreError::NotFound(format!("project '{}'", project_name)))?;
        let mut stmt = conn.prepare(
            "SELECT s.skill_name FROM project_skills ps
             JOIN skills s ON s.skill_id = ps.skill_id
             WHERE ps.project_id = ?1
             ORDER BY ps.rowid",
        )?;
        let names = stmt
            .query_map(params![project_id], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    })?;
    tracing::debug!(owner = %owner_id, project = %project_name, count = names.len(), "project skills listed");
    Ok(names.join(", "))
}
