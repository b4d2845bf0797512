//! Addressable configuration settings.
//!
//! Each [`ConfigKey`] names one setting as `section.key` and knows how to read
//! and write it on a [`ConfigFile`]. Used by the CLI `config` commands.

use std::path::PathBuf;
use std::str::FromStr;

use super::file::{parse_bool, parse_u64, ConfigError, ConfigFile};

/// A single configuration setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    ContentBaseUrl,
    ContentPreview,
    TransportTimeoutSecs,
    LoggingFile,
}

impl ConfigKey {
    /// All settings, grouped by section.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::ContentBaseUrl,
            ConfigKey::ContentPreview,
            ConfigKey::TransportTimeoutSecs,
            ConfigKey::LoggingFile,
        ]
    }

    /// Full name in `section.key` form.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::ContentBaseUrl => "content.base_url",
            ConfigKey::ContentPreview => "content.preview",
            ConfigKey::TransportTimeoutSecs => "transport.timeout_secs",
            ConfigKey::LoggingFile => "logging.file",
        }
    }

    /// Section part of the name.
    pub fn section(&self) -> &'static str {
        self.name().split_once('.').map_or("", |(section, _)| section)
    }

    /// Key part of the name.
    pub fn key_name(&self) -> &'static str {
        self.name().split_once('.').map_or("", |(_, key)| key)
    }

    /// Current value as text; empty when unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::ContentBaseUrl => config.content.base_url.clone(),
            ConfigKey::ContentPreview => config.content.preview.to_string(),
            ConfigKey::TransportTimeoutSecs => config.transport.timeout_secs.to_string(),
            ConfigKey::LoggingFile => config
                .logging
                .file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        }
    }

    /// Parse `value` and store it.
    ///
    /// An empty value clears optional settings.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        match self {
            ConfigKey::ContentBaseUrl => {
                if value.trim().is_empty() {
                    return Err(ConfigError::InvalidValue {
                        key: self.name().to_string(),
                        value: value.to_string(),
                        reason: "base URL must not be empty".to_string(),
                    });
                }
                config.content.base_url = value.trim().to_string();
            }
            ConfigKey::ContentPreview => {
                config.content.preview = parse_bool(self.name(), value)?;
            }
            ConfigKey::TransportTimeoutSecs => {
                config.transport.timeout_secs = parse_u64(self.name(), value)?;
            }
            ConfigKey::LoggingFile => {
                let value = value.trim();
                config.logging.file = (!value.is_empty()).then(|| PathBuf::from(value));
            }
        }
        Ok(())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == s)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}
