use rusqlite;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    RusqliteError(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("Failed to initialize database: {0}")]
    DatabaseInitializationError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl StoreError {
    /// The referenced project, skill, or status does not exist in scope.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }

    /// User-correctable input problem (bad field, empty name, unknown status).
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::ValidationError(_))
    }

    /// Anything that is neither not-found nor validation.
    pub fn is_storage(&self) -> bool {
        !self.is_not_found() && !self.is_validation()
    }
}
