//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent menu tree invariant violations.
/// These are independent of rendering and I/O concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("menu key exists: {0}")]
    DuplicateKey(String),

    #[error("empty link anchor for menu key: {0}")]
    EmptyAnchor(String),

    #[error("parent key not found for {key}: {parent}")]
    ParentNotFound { key: String, parent: String },

    #[error("menu key not found: {0}")]
    KeyNotFound(String),

    #[error("invalid import record {menu}/{key}, field '{field}': {reason}")]
    InvalidImportRecord {
        menu: String,
        key: String,
        field: String,
        reason: String,
    },

    #[error("menu id not found while importing: {0}")]
    MenuIdNotFound(String),
}

impl DomainError {
    pub(crate) fn invalid_record(
        menu: &str,
        key: &str,
        field: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidImportRecord {
            menu: menu.to_string(),
            key: key.to_string(),
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
