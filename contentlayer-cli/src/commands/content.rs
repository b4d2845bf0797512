//! Content retrieval CLI commands.

use contentlayer::config::ContentConfig;
use contentlayer::ContentAccessor;
use futures::future::join_all;
use serde_json::Value;
use tracing::{info, warn};

use super::common::parse_query_args;
use crate::error::CliError;

/// Fetch one or more entities of a type.
///
/// All ids are requested concurrently through one accessor, so repeated ids
/// share a single request.
pub async fn run_get(
    config: &ContentConfig,
    content_type: &str,
    ids: &[String],
    query_args: &[String],
) -> Result<(), CliError> {
    let query = parse_query_args(query_args)?;
    let accessor = ContentAccessor::from_config(config)?;

    let lookups = ids
        .iter()
        .map(|id| accessor.get(content_type, id, query.as_ref()));
    let results = join_all(lookups).await;

    let mut first_error = None;
    for (id, result) in ids.iter().zip(results) {
        match result {
            Ok(value) => print_value(&value)?,
            Err(e) => {
                warn!(content_type, id = %id, error = %e, "Get failed");
                eprintln!("{} {}: {}", content_type, id, e);
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    info!(stats = %accessor.cache_stats(), "Get finished");

    match first_error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

/// List entities of a type.
pub async fn run_list(
    config: &ContentConfig,
    content_type: &str,
    query_args: &[String],
) -> Result<(), CliError> {
    let query = parse_query_args(query_args)?;
    let accessor = ContentAccessor::from_config(config)?;

    let value = accessor.list(content_type, query.as_ref()).await?;
    print_value(&value)
}

fn print_value(value: &Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
