//! Infrastructure-level errors

use thiserror::Error;

use crate::application::ApplicationError;

/// Failures surfaced through the service container.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),
}
