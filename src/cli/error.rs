// SPDX-License-Identifier: MIT OR Apache-2.0

//! CLI-level errors (wraps configuration errors)

use thiserror::Error;

use crate::cli::exitcode;
use crate::domain::ConfigError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    /// Loading or reading configuration failed.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// A value could not be rendered for output.
    #[error("failed to render output: {0}")]
    Output(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(ConfigError::IoError(_))
            | CliError::Config(ConfigError::SourceError { .. }) => exitcode::IOERR,
            CliError::Config(_) => exitcode::CONFIG,
            CliError::Output(_) => exitcode::SOFTWARE,
        }
    }
}
