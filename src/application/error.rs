//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Renderer option and serialization failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("invalid rendering option for {renderer}: {option}")]
    UnknownOption { renderer: String, option: String },

    #[error("invalid type for rendering option {option}: expected {expected}, got {actual}")]
    OptionTypeMismatch {
        option: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("serialize menu: {0}")]
    Serialize(String),
}

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("menu renderer not configured")]
    NoRendererConfigured,

    #[error("config error: {message}")]
    Config { message: String },

    #[error("invalid menu source {path}: {message}")]
    InvalidSource { path: String, message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Result type for renderers.
pub type RenderResult<T> = Result<T, RenderError>;
