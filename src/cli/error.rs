//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::{ApplicationError, RenderError};
use crate::domain::DomainError;
use crate::exitcode;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        ApplicationError::Domain(e).into()
    }
}

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => exitcode::USAGE,
            CliError::Infra(InfraError::Application(e)) => match e {
                ApplicationError::Domain(_) | ApplicationError::InvalidSource { .. } => {
                    exitcode::DATAERR
                }
                ApplicationError::Render(RenderError::Serialize(_)) => exitcode::SOFTWARE,
                ApplicationError::Render(_) => exitcode::USAGE,
                ApplicationError::NoRendererConfigured => exitcode::SOFTWARE,
                ApplicationError::Config { .. } => exitcode::CONFIG,
                ApplicationError::OperationFailed { source, .. } => {
                    match source.downcast_ref::<std::io::Error>() {
                        Some(io) if io.kind() == std::io::ErrorKind::NotFound => exitcode::NOINPUT,
                        _ => exitcode::IOERR,
                    }
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_domain_error_when_exit_code_then_dataerr() {
        let err: CliError = DomainError::KeyNotFound("x".into()).into();
        assert_eq!(err.exit_code(), exitcode::DATAERR);
    }

    #[test]
    fn given_unknown_option_when_exit_code_then_usage() {
        let err: CliError = ApplicationError::Render(RenderError::UnknownOption {
            renderer: "html".into(),
            option: "x".into(),
        })
        .into();
        assert_eq!(err.exit_code(), exitcode::USAGE);
    }

    #[test]
    fn given_missing_file_when_exit_code_then_noinput() {
        let err: CliError = ApplicationError::OperationFailed {
            context: "read menu source: x.json".into(),
            source: Box::new(std::io::Error::from(std::io::ErrorKind::NotFound)),
        }
        .into();
        assert_eq!(err.exit_code(), exitcode::NOINPUT);
    }

    #[test]
    fn given_config_error_when_exit_code_then_config() {
        let err: CliError = ApplicationError::Config {
            message: "bad".into(),
        }
        .into();
        assert_eq!(err.exit_code(), exitcode::CONFIG);
    }
}
