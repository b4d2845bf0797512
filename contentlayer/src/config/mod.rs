//! Configuration.
//!
//! - [`ContentConfig`]: runtime settings handed to the accessor and transport
//! - [`ConfigFile`]: persisted INI settings, see [`config_file_path`]
//! - [`ConfigKey`]: `section.key` addressing for individual settings

mod content;
mod file;
mod keys;

pub use content::ContentConfig;
pub use file::{
    config_file_path, ConfigError, ConfigFile, ContentSettings, LoggingSettings,
    TransportSettings, DEFAULT_BASE_URL,
};
pub use keys::ConfigKey;
