//! Common types and utilities shared across CLI commands.

use contentlayer::config::{ConfigFile, ContentConfig};
use contentlayer::QueryParams;
use serde_json::Value;

use crate::error::CliError;

/// Parse one `key=value` query argument.
///
/// The value is read as JSON when it parses (`true`, `10`, `"x"`), otherwise
/// it is taken as a plain string.
pub fn parse_query_arg(arg: &str) -> Result<(String, Value), CliError> {
    let (key, raw) = arg.split_once('=').ok_or_else(|| {
        CliError::InvalidArgument(format!("Query '{}' must be in key=value form", arg))
    })?;
    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::InvalidArgument(format!(
            "Query '{}' has an empty key",
            arg
        )));
    }

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

/// Build query parameters from `key=value` arguments.
///
/// Returns `None` when no arguments were given. Later duplicates win.
pub fn parse_query_args(args: &[String]) -> Result<Option<QueryParams>, CliError> {
    if args.is_empty() {
        return Ok(None);
    }
    let mut params = QueryParams::new();
    for arg in args {
        let (key, value) = parse_query_arg(arg)?;
        params.insert(key, value);
    }
    Ok(Some(params))
}

/// Resolve content settings from CLI args and config.
///
/// CLI takes precedence, then config. `cli_preview` is `None` when neither
/// `--preview` nor `--no-preview` was given.
pub fn resolve_content_config(
    cli_base_url: Option<String>,
    cli_preview: Option<bool>,
    config: &ConfigFile,
) -> ContentConfig {
    let mut content = ContentConfig::from_config_file(config);
    if let Some(url) = cli_base_url {
        content.base_url = url;
    }
    if let Some(preview) = cli_preview {
        content.preview_content = preview;
    }
    content
}
