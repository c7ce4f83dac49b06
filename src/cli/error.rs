//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Serialize(_) => crate::exitcode::SOFTWARE,
                InfraError::Application(app) => match app {
                    ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                    ApplicationError::Parse { .. }
                    | ApplicationError::UnsupportedFormat(_)
                    | ApplicationError::Domain(_) => crate::exitcode::DATAERR,
                    ApplicationError::BaseTreeMissing => crate::exitcode::USAGE,
                    ApplicationError::OperationFailed { .. } => crate::exitcode::NOINPUT,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn given_layered_errors_when_mapping_exit_codes_then_uses_sysexits() {
        let missing: CliError = ApplicationError::BaseTreeMissing.into();
        assert_eq!(missing.exit_code(), crate::exitcode::USAGE);

        let invalid: CliError =
            ApplicationError::from(DomainError::InvalidSelectionId("y:/a".into())).into();
        assert_eq!(invalid.exit_code(), crate::exitcode::DATAERR);
        assert_eq!(invalid.to_string(), "invalid selection id: y:/a");

        let config: CliError = ApplicationError::Config {
            message: "bad".into(),
        }
        .into();
        assert_eq!(config.exit_code(), crate::exitcode::CONFIG);
    }
}
