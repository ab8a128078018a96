//! CLI struct definitions for the projectbook command-line interface.
//!
//! All clap-derived types live here. Dispatch logic lives in `lib.rs`.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[clap(
    name = "projectbook",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track personal software projects, their skills, and lifecycle status."
)]
pub(crate) struct Cli {
    /// Store directory (holds the database and optional projectbook.toml).
    #[clap(long, global = true, env = "PROJECTBOOK_HOME")]
    pub root: Option<PathBuf>,
    /// Explicit config file; defaults to <root>/projectbook.toml when present.
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,
    /// Database file; overrides config and PROJECTBOOK_DB.
    #[clap(long, global = true)]
    pub db: Option<PathBuf>,
    /// Output format.
    #[clap(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Create the database if needed and seed reference vocabularies.
    Init,
    /// Manage projects.
    Project(ProjectCli),
    /// Inspect skills and link them to projects.
    Skill(SkillCli),
    /// Inspect project statuses.
    Status(StatusCli),
}

#[derive(clap::Args, Debug)]
pub(crate) struct OwnerArg {
    /// Owner identifier scoping every project lookup.
    #[clap(long, env = "PROJECTBOOK_OWNER")]
    pub owner: String,
}

#[derive(clap::Args, Debug)]
pub(crate) struct ProjectCli {
    #[clap(subcommand)]
    pub command: ProjectCommand,
}

#[derive(Subcommand, Debug)]
pub(crate) enum ProjectCommand {
    /// Register a new project.
    Add {
        #[clap(flatten)]
        owner: OwnerArg,
        /// Project name (positional argument)
        #[clap(value_name = "NAME")]
        name: String,
        #[clap(long)]
        description: Option<String>,
        #[clap(long)]
        url: Option<String>,
        /// Status name, e.g. "prototype". See `projectbook status list`.
        #[clap(long, default_value = "prototype")]
        status: String,
        #[clap(long)]
        screenshot: Option<String>,
    },
    /// List the owner's projects.
    List {
        #[clap(flatten)]
        owner: OwnerArg,
    },
    /// Show one project with its status and skills.
    Show {
        #[clap(flatten)]
        owner: OwnerArg,
        #[clap(value_name = "NAME")]
        name: String,
    },
    /// Change one field of a project.
    Update {
        #[clap(flatten)]
        owner: OwnerArg,
        #[clap(value_name = "NAME")]
        name: String,
        /// One of: project_name, description, url, status_id, screenshot.
        #[clap(long)]
        field: String,
        /// New value. For status_id a status name is accepted as well as an id.
        #[clap(long)]
        value: String,
    },
    /// Delete a project and its skill links.
    Delete {
        #[clap(flatten)]
        owner: OwnerArg,
        #[clap(value_name = "NAME")]
        name: String,
    },
    /// Print the skills attached to one of the owner's projects.
    Skills {
        #[clap(flatten)]
        owner: OwnerArg,
        #[clap(value_name = "NAME")]
        name: String,
    },
}

#[derive(clap::Args, Debug)]
pub(crate) struct SkillCli {
    #[clap(subcommand)]
    pub command: SkillCommand,
}

#[derive(Subcommand, Debug)]
pub(crate) enum SkillCommand {
    /// List the skill vocabulary.
    List,
    /// Attach a skill to a project.
    Attach {
        #[clap(flatten)]
        owner: OwnerArg,
        #[clap(long)]
        project: String,
        #[clap(long)]
        skill: String,
    },
    /// Detach a skill from a project.
    Detach {
        #[clap(flatten)]
        owner: OwnerArg,
        #[clap(long)]
        project: String,
        #[clap(long)]
        skill: String,
    },
}

#[derive(clap::Args, Debug)]
pub(crate) struct StatusCli {
    #[clap(subcommand)]
    pub command: StatusCommand,
}

#[derive(Subcommand, Debug)]
pub(crate) enum StatusCommand {
    /// List the status vocabulary.
    List,
    /// Print the id for a status name.
    Resolve {
        #[clap(value_name = "NAME")]
        name: String,
    },
}
