//! CLI error type.

use std::fmt;

use desktop_cdn::config::ConfigFileError;
use desktop_cdn::ResolveError;

/// Errors surfaced to the CLI user.
#[derive(Debug)]
pub enum CliError {
    /// Invalid CLI or configuration input.
    Config(String),
    /// Configuration file could not be read, written or applied.
    ConfigFile(ConfigFileError),
    /// Resolution failed.
    Resolve(ResolveError),
    /// Output could not be produced.
    Output(String),
}

impl CliError {
    /// Process exit code: 2 for request errors, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Resolve(e) if e.is_client_error() => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "{}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Resolve(e) => write!(f, "{} (status {})", e, e.status_code()),
            CliError::Output(msg) => write!(f, "Failed to write output: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Resolve(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<ResolveError> for CliError {
    fn from(e: ResolveError) -> Self {
        CliError::Resolve(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output(e.to_string())
    }
}
