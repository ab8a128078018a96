//! Store configuration loaded from `projectbook.toml`.
//!
//! The file is optional. Missing keys fall back to defaults, and a missing file
//! means "all defaults". Environment variables override the file, and CLI flags
//! override both (applied by the caller).

use crate::core::error::StoreError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "projectbook.toml";
pub const DEFAULT_DB_NAME: &str = "projects.db";

/// Overrides the database file location.
pub const ENV_DB_PATH: &str = "PROJECTBOOK_DB";

const DEFAULT_BUSY_TIMEOUT_SECS: u32 = 5;

/// Names seeded into the `status` and `skills` reference tables.
///
/// Order matters: statuses are inserted in list order, so the default
/// vocabulary always yields ids 1..=5 on a fresh database.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Vocabulary {
    #[serde(default = "default_statuses")]
    pub statuses: Vec<String>,
    #[serde(default = "default_skills")]
    pub skills: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            statuses: default_statuses(),
            skills: default_skills(),
        }
    }
}

fn default_statuses() -> Vec<String> {
    [
        "prototype",
        "in development",
        "complete, ready for use",
        "updated",
        "complete, unmaintained",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_skills() -> Vec<String> {
    ["Python", "SQL", "API", "Discord"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Database file. Relative paths resolve against the store root.
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_secs: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            busy_timeout_secs: DEFAULT_BUSY_TIMEOUT_SECS,
        }
    }
}

fn default_busy_timeout() -> u32 {
    DEFAULT_BUSY_TIMEOUT_SECS
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub vocabulary: Vocabulary,
}

impl StoreConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, StoreError> {
        toml::from_str(content).map_err(|e| StoreError::ConfigError(e.to_string()))
    }

    /// Resolve the database path for a store rooted at `root`.
    pub fn db_path(&self, root: &Path) -> PathBuf {
        match &self.storage.path {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => root.join(p),
            None => root.join(DEFAULT_DB_NAME),
        }
    }

    fn apply_env(&mut self) {
        if let Ok(path) = env::var(ENV_DB_PATH) {
            if !path.trim().is_empty() {
                self.storage.path = Some(PathBuf::from(path));
            }
        }
    }
}

/// Load config from an explicit file, or from `<root>/projectbook.toml`.
/// An explicit path that does not exist is an error; an implicit one is not.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<StoreConfig, StoreError> {
    let mut config = match explicit {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|e| {
                StoreError::ConfigError(format!("cannot read {}: {}", path.display(), e))
            })?;
            StoreConfig::from_toml_str(&content)?
        }
        None => {
            let path = root.join(CONFIG_FILE_NAME);
            if path.exists() {
                let content = fs::read_to_string(&path).map_err(StoreError::IoError)?;
                StoreConfig::from_toml_str(&content)?
            } else {
                StoreConfig::default()
            }
        }
    };
    config.apply_env();
    Ok(config)
}
