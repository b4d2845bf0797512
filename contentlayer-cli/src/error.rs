//! CLI error types.

use contentlayer::config::ConfigError;
use contentlayer::{ContentError, TransportError};
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid or unreadable configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Bad command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The content request failed.
    #[error(transparent)]
    Content(#[from] ContentError),

    /// The transport could not be created.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Logging could not be initialized.
    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    /// A response could not be printed.
    #[error("Failed to format output: {0}")]
    Output(#[from] serde_json::Error),
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_conversion() {
        let err: CliError = ConfigError::UnknownKey("content.colour".to_string()).into();
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("content.colour"));
    }

    #[test]
    fn test_content_error_is_transparent() {
        let err: CliError =
            ContentError::Transport(TransportError::Request("timed out".into())).into();
        assert_eq!(err.to_string(), "Request failed: timed out");
    }
}
