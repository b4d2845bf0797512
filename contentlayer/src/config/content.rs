//! Runtime configuration for content access.

use std::time::Duration;

use super::file::ConfigFile;
use crate::transport::DEFAULT_TIMEOUT_SECS;

/// Configuration for a [`ContentAccessor`](crate::content::ContentAccessor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentConfig {
    /// Base URL of the content service, e.g. `https://cms.example.com/api`.
    pub base_url: String,

    /// Request preview (unpublished) content variants.
    ///
    /// Sent as `$preview` with every single-entity request.
    pub preview_content: bool,

    /// HTTP request timeout.
    pub timeout: Duration,
}

impl ContentConfig {
    /// Create a new configuration for the given service URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            preview_content: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create a configuration from the persisted configuration file.
    pub fn from_config_file(config: &ConfigFile) -> Self {
        Self {
            base_url: config.content.base_url.clone(),
            preview_content: config.content.preview,
            timeout: Duration::from_secs(config.transport.timeout_secs),
        }
    }

    /// Enable or disable preview content.
    pub fn with_preview_content(mut self, preview: bool) -> Self {
        self.preview_content = preview;
        self
    }

    /// Set the HTTP timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
