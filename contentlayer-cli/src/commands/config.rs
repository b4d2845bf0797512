//! `contentlayer config` subcommands.
//!
//! These operate on the INI file directly and never touch the network. They
//! stay usable when the file holds an invalid value, since `config set` is
//! how such a value gets repaired.

use std::path::Path;

use clap::Subcommand;
use contentlayer::config::{config_file_path, ConfigError, ConfigFile, ConfigKey};
use tracing::warn;

use crate::error::CliError;

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print one setting, e.g. `content.base_url`
    Get { key: String },

    /// Change one setting and write the file
    Set { key: String, value: String },

    /// Print every setting with its current value
    List,

    /// Print where the config file lives
    Path,
}

pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    let path = config_file_path();
    match command {
        ConfigCommands::Get { key } => print_setting(&path, &key),
        ConfigCommands::Set { key, value } => {
            let key = parse_key(&key)?;
            update_setting(&path, key, &value)?;
            println!("{} = {}", key.name(), value);
            Ok(())
        }
        ConfigCommands::List => print_settings(&path),
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn parse_key(key: &str) -> Result<ConfigKey, CliError> {
    key.parse().map_err(|_| {
        let known: Vec<_> = ConfigKey::all().iter().map(ConfigKey::name).collect();
        CliError::Config(format!(
            "Unknown setting '{}' (expected one of: {})",
            key,
            known.join(", ")
        ))
    })
}

fn print_setting(path: &Path, key: &str) -> Result<(), CliError> {
    let key = parse_key(key)?;
    let config = ConfigFile::load_from(path)?;
    println!("{}", display_value(key, &config));
    Ok(())
}

/// Apply one setting to the file at `path`.
///
/// A file that fails to load is replaced by defaults plus this setting, so an
/// invalid value can always be overwritten.
fn update_setting(path: &Path, key: ConfigKey, value: &str) -> Result<(), CliError> {
    let mut config = ConfigFile::load_from(path).or_else(|e| match e {
        ConfigError::Parse { .. } | ConfigError::InvalidValue { .. } => {
            warn!(
                path = %path.display(),
                error = %e,
                "Config file unreadable, starting from defaults"
            );
            Ok(ConfigFile::default())
        }
        other => Err(other),
    })?;
    key.set(&mut config, value)?;
    config.save_to(path)?;
    Ok(())
}

fn print_settings(path: &Path) -> Result<(), CliError> {
    let config = ConfigFile::load_from(path)?;
    for line in settings_table(&config) {
        println!("{}", line);
    }
    Ok(())
}

/// One aligned `name = value` line per setting.
fn settings_table(config: &ConfigFile) -> Vec<String> {
    let width = ConfigKey::all()
        .iter()
        .map(|key| key.name().len())
        .max()
        .unwrap_or(0);

    ConfigKey::all()
        .iter()
        .map(|&key| format!("{:<width$} = {}", key.name(), display_value(key, config)))
        .collect()
}

fn display_value(key: ConfigKey, config: &ConfigFile) -> String {
    let value = key.get(config);
    if value.is_empty() {
        "(unset)".to_string()
    } else {
        value
    }
}
