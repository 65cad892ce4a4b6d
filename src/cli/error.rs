//! CLI-level errors (wraps domain, parse and config errors)

use thiserror::Error;

use crate::cli::parse::ParseError;
use crate::config::SettingsError;
use crate::domain::ExpressionError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Expression(#[from] ExpressionError),

    #[error("invalid expression: {0}")]
    Parse(#[from] ParseError),

    #[error("config: {0}")]
    Settings(#[from] SettingsError),

    #[error("encode json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Parse(_) => crate::exitcode::DATAERR,
            CliError::Expression(e) => match e {
                ExpressionError::InvalidArgument(_) => crate::exitcode::CONFIG,
                ExpressionError::EmptyInput { .. } | ExpressionError::NullValue { .. } => {
                    crate::exitcode::DATAERR
                }
            },
            CliError::Settings(_) => crate::exitcode::CONFIG,
            CliError::Json(_) => crate::exitcode::SOFTWARE,
            CliError::Io(_) => crate::exitcode::IOERR,
        }
    }
}
