//! CLI error types and result alias.

use miette::Diagnostic;
use thiserror::Error;

use octopus_codec::CodecError;

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// IO error
    #[error("IO error: {0}")]
    #[diagnostic(code(octopus::io))]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    #[diagnostic(code(octopus::config))]
    Config(String),

    /// Decode, encode or dispatch failure
    #[error(transparent)]
    #[diagnostic(transparent)]
    Codec(#[from] CodecError),

    /// Command error
    #[error("Command error: {0}")]
    #[diagnostic(code(octopus::command))]
    Command(String),
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::Config(format!("Failed to parse TOML: {}", err))
    }
}
