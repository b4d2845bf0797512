//! contentlayer CLI - Command-line interface
//!
//! Fetches content through the cached accessor and manages the configuration
//! file.
//!
//! ```text
//! contentlayer get article 42 43 42 -q status=draft
//! contentlayer list article -q limit=10
//! contentlayer config set content.preview true
//! ```

mod commands;
mod error;
mod logging;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use contentlayer::config::ConfigFile;

use commands::common::resolve_content_config;
use commands::config::ConfigCommands;
use error::CliError;

/// Cached content retrieval
#[derive(Parser)]
#[command(name = "contentlayer")]
#[command(version)]
#[command(about = "Fetch content entities with a cache-aside accessor")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Content service base URL (overrides content.base_url)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request preview content (overrides content.preview)
    #[arg(long, global = true)]
    preview: bool,

    /// Request published content only (overrides content.preview)
    #[arg(long, global = true, conflicts_with = "preview")]
    no_preview: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch entities by id (cached, duplicate ids share one request)
    Get {
        /// Content type, e.g. article
        content_type: String,

        /// Entity ids
        #[arg(required = true)]
        ids: Vec<String>,

        /// Query parameter in key=value form (repeatable)
        #[arg(short, long = "query")]
        query: Vec<String>,
    },

    /// List entities of a type (never cached)
    List {
        /// Content type, e.g. article
        content_type: String,

        /// Query parameter in key=value form (repeatable)
        #[arg(short, long = "query")]
        query: Vec<String>,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

impl Cli {
    /// Preview setting given on the command line, if any.
    fn preview_override(&self) -> Option<bool> {
        match (self.preview, self.no_preview) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    // Config commands must keep working when the file is invalid, so the
    // load error is only raised by commands that need the settings.
    let config = ConfigFile::load();
    let log_file = config.as_ref().ok().and_then(|c| c.logging.file.clone());
    let _log_guard = logging::init(cli.verbose, log_file.as_deref())?;
    let preview = cli.preview_override();

    match cli.command {
        Commands::Get {
            content_type,
            ids,
            query,
        } => {
            let content = resolve_content_config(cli.base_url, preview, &config?);
            commands::content::run_get(&content, &content_type, &ids, &query).await
        }
        Commands::List {
            content_type,
            query,
        } => {
            let content = resolve_content_config(cli.base_url, preview, &config?);
            commands::content::run_list(&content, &content_type, &query).await
        }
        Commands::Config { action } => commands::config::run(action),
    }
}
