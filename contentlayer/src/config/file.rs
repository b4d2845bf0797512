//! INI configuration file.
//!
//! Located at `~/.config/contentlayer/config.ini` on Linux (platform config
//! directory elsewhere). A missing file yields defaults.
//!
//! ```ini
//! [content]
//! base_url = https://cms.example.com/api
//! preview = false
//!
//! [transport]
//! timeout_secs = 30
//!
//! [logging]
//! file = /var/log/contentlayer.log
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use crate::transport::DEFAULT_TIMEOUT_SECS;

/// Default content service URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

const SECTION_CONTENT: &str = "content";
const SECTION_TRANSPORT: &str = "transport";
const SECTION_LOGGING: &str = "logging";

/// Errors that can occur while reading or writing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid INI.
    #[error("Failed to parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    /// A setting has a value of the wrong type.
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// The key does not name a known setting.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),
}

/// `[content]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSettings {
    pub base_url: String,
    pub preview: bool,
}

/// `[transport]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportSettings {
    pub timeout_secs: u64,
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Log to this file instead of stderr.
    pub file: Option<PathBuf>,
}

/// Persisted configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub content: ContentSettings,
    pub transport: TransportSettings,
    pub logging: LoggingSettings,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            content: ContentSettings {
                base_url: DEFAULT_BASE_URL.to_string(),
                preview: false,
            },
            transport: TransportSettings {
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
            logging: LoggingSettings::default(),
        }
    }
}

/// Path of the user configuration file.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("contentlayer")
        .join("config.ini")
}

impl ConfigFile {
    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load from `path`, returning defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let ini = Ini::load_from_str(&text).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        self.to_ini().write_to_file(path).map_err(write_err)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(section) = ini.section(Some(SECTION_CONTENT)) {
            if let Some(url) = section.get("base_url") {
                config.content.base_url = url.to_string();
            }
            if let Some(preview) = section.get("preview") {
                config.content.preview = parse_bool("content.preview", preview)?;
            }
        }

        if let Some(section) = ini.section(Some(SECTION_TRANSPORT)) {
            if let Some(timeout) = section.get("timeout_secs") {
                config.transport.timeout_secs = parse_u64("transport.timeout_secs", timeout)?;
            }
        }

        if let Some(section) = ini.section(Some(SECTION_LOGGING)) {
            config.logging.file = section
                .get("file")
                .filter(|f| !f.trim().is_empty())
                .map(PathBuf::from);
        }

        Ok(config)
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        ini.with_section(Some(SECTION_CONTENT))
            .set("base_url", self.content.base_url.as_str())
            .set("preview", self.content.preview.to_string());
        ini.with_section(Some(SECTION_TRANSPORT))
            .set("timeout_secs", self.transport.timeout_secs.to_string());
        if let Some(file) = &self.logging.file {
            ini.with_section(Some(SECTION_LOGGING))
                .set("file", file.display().to_string());
        }
        ini
    }
}

/// Parse a boolean setting (`true/false`, `yes/no`, `1/0`, `on/off`).
pub(crate) fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

/// Parse a non-negative integer setting.
pub(crate) fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigFile::load_from(&dir.path().join("absent.ini")).unwrap();
        assert_eq!(config, ConfigFile::default());
        assert_eq!(config.content.base_url, DEFAULT_BASE_URL);
        assert!(!config.content.preview);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.content.base_url = "https://cms.example.com/api".to_string();
        config.content.preview = true;
        config.transport.timeout_secs = 5;
        config.logging.file = Some(PathBuf::from("/tmp/contentlayer.log"));
        config.save_to(&path).unwrap();

        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(&path, "[content]\npreview = yes\n").unwrap();

        let config = ConfigFile::load_from(&path).unwrap();
        assert!(config.content.preview);
        assert_eq!(config.content.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.transport.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.logging.file, None);
    }

    #[test]
    fn test_invalid_bool_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(&path, "[content]\npreview = maybe\n").unwrap();

        let err = ConfigFile::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "content.preview"));
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(&path, "[transport]\ntimeout_secs = -1\n").unwrap();

        assert!(matches!(
            ConfigFile::load_from(&path),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_parse_bool_forms() {
        assert!(parse_bool("k", "TRUE").unwrap());
        assert!(parse_bool("k", " on ").unwrap());
        assert!(!parse_bool("k", "0").unwrap());
        assert!(parse_bool("k", "").is_err());
    }

    #[test]
    fn test_config_file_path_name() {
        let path = config_file_path();
        assert!(path.ends_with("contentlayer/config.ini"));
    }
}
