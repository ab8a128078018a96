//! Projectbook: a local-first store for personal software projects.
//!
//! Each owner (an opaque identifier supplied by the caller, such as a chat user
//! id) registers projects, tags them with skills from a shared vocabulary, moves
//! them through lifecycle statuses, and deletes them. All state lives in one
//! SQLite database.
//!
//! # Architecture
//!
//! - [`core`]: configuration, connection pool, schema initialization, errors.
//! - [`catalog`]: the operations on projects, skills, and statuses.
//!
//! Every operation takes a [`Store`](core::store::Store), acquires a connection
//! for its own duration, and returns. Writes run in a single transaction, so a
//! project delete never leaves orphaned skill links behind.
//!
//! # Examples
//!
//! ```bash
//! projectbook init
//! projectbook project add --owner u1 Tracker --url http://x --status prototype
//! projectbook skill attach --owner u1 --project Tracker --skill Python
//! projectbook project show --owner u1 Tracker
//! ```

pub mod catalog;
mod cli;
pub mod core;

use crate::catalog::{projects, skills, statuses};
use crate::cli::{Cli, Command, OutputFormat, ProjectCommand, SkillCommand, StatusCommand};
use crate::core::{config, error, output, store::Store, time};

use clap::Parser;
use colored::Colorize;
use serde_json::{Value as JsonValue, json};
use std::path::PathBuf;

/// Print a command result as text or as a JSON envelope.
fn emit(format: OutputFormat, cmd: &str, status: &str, extra: JsonValue, text: &str) {
    match format {
        OutputFormat::Json => println!("{:#}", time::command_envelope(cmd, status, extra)),
        OutputFormat::Text => {
            if !text.is_empty() {
                println!("{}", text);
            }
        }
    }
}

fn open_store(cli: &Cli) -> Result<Store, error::StoreError> {
    let root = match &cli.root {
        Some(root) => root.clone(),
        None => default_root()?,
    };
    let mut cfg = config::load_config(&root, cli.config.as_deref())?;
    if let Some(db) = &cli.db {
        cfg.storage.path = Some(db.clone());
    }
    Store::open(&root, &cfg)
}

pub fn run() -> Result<(), error::StoreError> {
    let cli = Cli::parse();
    let store = open_store(&cli)?;
    let format = cli.format;

    match cli.command {
        Command::Init => {
            let report = store.seed_report();
            let statuses = statuses::get_statuses(&store)?;
            let skills = skills::get_skills(&store)?;
            emit(
                format,
                "init",
                "ok",
                json!({
                    "db": store.db_path().to_string_lossy(),
                    "seed": report,
                    "statuses": statuses.len(),
                    "skills": skills.len(),
                }),
                &format!(
                    "{} {} ({} statuses, {} skills)",
                    "ready".green().bold(),
                    store.db_path().display(),
                    statuses.len(),
                    skills.len()
                ),
            );
        }
        Command::Project(project_cli) => run_project(&store, format, project_cli.command)?,
        Command::Skill(skill_cli) => run_skill(&store, format, skill_cli.command)?,
        Command::Status(status_cli) => run_status(&store, format, status_cli.command)?,
    }
    Ok(())
}

fn run_project(
    store: &Store,
    format: OutputFormat,
    command: ProjectCommand,
) -> Result<(), error::StoreError> {
    match command {
        ProjectCommand::Add {
            owner,
            name,
            description,
            url,
            status,
            screenshot,
        } => {
            let project_id = projects::create_project(
                store,
                &projects::NewProject {
                    owner_id: owner.owner,
                    project_name: name.clone(),
                    description,
                    url,
                    status_name: status,
                    screenshot,
                },
            )?;
            emit(
                format,
                "project.add",
                "ok",
                json!({ "project_id": project_id, "project_name": name }),
                &format!("{} {} (id {})", "saved".green(), name.bold(), project_id),
            );
        }
        ProjectCommand::List { owner } => {
            let items = projects::get_projects(store, &owner.owner)?;
            let text = if items.is_empty() {
                format!("no projects for {}", owner.owner)
            } else {
                items
                    .iter()
                    .map(output::render_project_row)
                    .collect::<Vec<_>>()
                    .join("\n")
            };
            emit(format, "project.list", "ok", json!({ "items": items }), &text);
        }
        ProjectCommand::Show { owner, name } => {
            match projects::get_project_info(store, &owner.owner, &name)? {
                Some(info) => {
                    let skill_names =
                        skills::get_owner_project_skills(store, &owner.owner, &name)?;
                    let text = output::render_project_info(&info, &skill_names);
                    emit(
                        format,
                        "project.show",
                        "ok",
                        json!({ "item": info, "skills": skill_names }),
                        &text,
                    );
                }
                None => emit(
                    format,
                    "project.show",
                    "not_found",
                    json!({ "project_name": name }),
                    &format!("{} no project named '{}'", "not found:".yellow(), name),
                ),
            }
        }
        ProjectCommand::Update {
            owner,
            name,
            field,
            value,
        } => {
            let project_id = projects::get_project_id(store, &name, &owner.owner)?;
            let column: projects::ProjectColumn = field.parse()?;
            let update = match column {
                // Accept a status name where an id is expected.
                projects::ProjectColumn::StatusId if value.trim().parse::<i64>().is_err() => {
                    let status_id = statuses::get_status_id(store, &value)?.ok_or_else(|| {
                        error::StoreError::ValidationError(format!("unknown status '{}'", value))
                    })?;
                    projects::ProjectUpdate::Status(status_id)
                }
                _ => projects::ProjectUpdate::from_column(column, &value)?,
            };
            projects::update_project(store, project_id, &update)?;
            emit(
                format,
                "project.update",
                "ok",
                json!({ "project_id": project_id, "field": column.as_str() }),
                &format!("{} {} {}", "updated".green(), name.bold(), column),
            );
        }
        ProjectCommand::Delete { owner, name } => {
            let project_id = projects::get_project_id(store, &name, &owner.owner)?;
            let removed = projects::delete_project(store, &owner.owner, project_id)?;
            let (status, text) = if removed {
                ("ok", format!("{} {}", "deleted".red(), name.bold()))
            } else {
                ("not_found", format!("{} {} was already gone", "not found:".yellow(), name))
            };
            emit(
                format,
                "project.delete",
                status,
                json!({ "project_id": project_id, "removed": removed }),
                &text,
            );
        }
        ProjectCommand::Skills { owner, name } => {
            let skill_names = skills::get_owner_project_skills(store, &owner.owner, &name)?;
            emit(
                format,
                "project.skills",
                "ok",
                json!({ "project_name": name, "skills": skill_names }),
                &skill_names,
            );
        }
    }
    Ok(())
}

fn run_skill(
    store: &Store,
    format: OutputFormat,
    command: SkillCommand,
) -> Result<(), error::StoreError> {
    match command {
        SkillCommand::List => {
            let items = skills::get_skills(store)?;
            let text =
                output::render_vocabulary(items.iter().map(|s| (s.skill_id, s.skill_name.as_str())));
            emit(format, "skill.list", "ok", json!({ "items": items }), &text);
        }
        SkillCommand::Attach {
            owner,
            project,
            skill,
        } => {
            let inserted = skills::attach_skill(store, &owner.owner, &project, &skill)?;
            let text = if inserted {
                format!("{} {} -> {}", "attached".green(), skill, project.bold())
            } else {
                format!("{} already on {}", skill, project.bold())
            };
            emit(
                format,
                "skill.attach",
                "ok",
                json!({ "project_name": project, "skill_name": skill, "inserted": inserted }),
                &text,
            );
        }
        SkillCommand::Detach {
            owner,
            project,
            skill,
        } => {
            let removed = skills::detach_skill(store, &owner.owner, &project, &skill)?;
            let text = if removed {
                format!("{} {} from {}", "detached".red(), skill, project.bold())
            } else {
                format!("{} was not on {}", skill, project.bold())
            };
            emit(
                format,
                "skill.detach",
                "ok",
                json!({ "project_name": project, "skill_name": skill, "removed": removed }),
                &text,
            );
        }
    }
    Ok(())
}

fn run_status(
    store: &Store,
    format: OutputFormat,
    command: StatusCommand,
) -> Result<(), error::StoreError> {
    match command {
        StatusCommand::List => {
            let items = statuses::get_statuses(store)?;
            let text = output::render_vocabulary(
                items.iter().map(|s| (s.status_id, s.status_name.as_str())),
            );
            emit(format, "status.list", "ok", json!({ "items": items }), &text);
        }
        StatusCommand::Resolve { name } => {
            let status_id = statuses::get_status_id(store, &name)?;
            let (status, text) = match status_id {
                Some(id) => ("ok", id.to_string()),
                None => ("not_found", format!("{} no status named '{}'", "not found:".yellow(), name)),
            };
            emit(
                format,
                "status.resolve",
                status,
                json!({ "status_name": name, "status_id": status_id }),
                &text,
            );
        }
    }
    Ok(())
}

/// Default store directory when neither `--root` nor `PROJECTBOOK_HOME` is set.
pub fn default_root() -> Result<PathBuf, error::StoreError> {
    Ok(std::env::current_dir()?)
}
