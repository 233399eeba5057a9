// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Redline - syncs design-review comments into Markdown documents.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod files;
mod resolve;
mod sync;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use redline_config::RedlineConfig;
use redline_core::RedlineError;

/// Config file edited by `redline files` when `--config` is not given.
const DEFAULT_CONFIG_FILE: &str = "redline.toml";

/// Redline - syncs design-review comments into Markdown documents.
#[derive(Parser, Debug)]
#[command(name = "redline", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file (plus environment overrides) instead
    /// of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one sync pass over the enabled files.
    Sync {
        /// Discard cached document structures before syncing.
        #[arg(long)]
        manual: bool,
    },
    /// Sync on a fixed interval until interrupted.
    Watch,
    /// Resolve a comment anchor to the frame it was placed on.
    Resolve {
        /// Key of the design file.
        file_key: String,
        /// Node the comment is anchored to.
        #[arg(long)]
        node: Option<String>,
        /// Canvas x coordinate.
        #[arg(long, requires = "y", allow_negative_numbers = true)]
        x: Option<f64>,
        /// Canvas y coordinate.
        #[arg(long, requires = "x", allow_negative_numbers = true)]
        y: Option<f64>,
    },
    /// Manage the configured design files.
    Files {
        #[command(subcommand)]
        action: FilesCommand,
    },
}

#[derive(Subcommand, Debug)]
enum FilesCommand {
    /// List configured files.
    List,
    /// Add a file to sync.
    Add {
        /// Short identifier, unique across files.
        id: String,
        /// Display name, also used as the document title.
        name: String,
        /// Key of the design file.
        file_key: String,
        /// Add the file without enabling it.
        #[arg(long)]
        disabled: bool,
    },
    /// Remove a file.
    Remove { id: String },
    /// Enable syncing of a file.
    Enable { id: String },
    /// Disable syncing of a file.
    Disable { id: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            redline_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.logging.level);

    let config_file = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    let result = match cli.command {
        Commands::Sync { manual } => sync::run_once(config, manual).await,
        Commands::Watch => sync::run_watch(config).await,
        Commands::Resolve {
            file_key,
            node,
            x,
            y,
        } => resolve::run(&config, &file_key, node.as_deref(), x.zip(y)).await,
        Commands::Files { action } => files::run(&config, &config_file, action),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("redline: {e}");
            if e.is_auth() {
                eprintln!(
                    "hint: check remote.access_token or the REDLINE_REMOTE_ACCESS_TOKEN environment variable"
                );
            }
            ExitCode::FAILURE
        }
    }
}

fn load_config(
    path: Option<&std::path::Path>,
) -> Result<RedlineConfig, Vec<redline_config::ConfigError>> {
    match path {
        Some(path) => redline_config::load_and_validate_path(path),
        None => redline_config::load_and_validate(),
    }
}

/// Initialize the tracing subscriber with an env filter.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("redline={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

/// Result type of every subcommand.
type CommandResult = Result<ExitCode, RedlineError>;
