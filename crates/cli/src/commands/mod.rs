//! CLI command definitions and execution
//!
//! This module contains all CLI commands and their implementations. Each
//! command parses its path arguments, builds a store from the ambient
//! configuration, runs one core operation, and renders the result.

use clap::{Parser, Subcommand};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod completions;
mod get;
mod ls;
mod put;
mod rm;

/// bkt - bucket operations for S3-compatible object storage
///
/// One-shot list, upload, download, and delete with UNIX shell glob
/// filtering over object keys. Credentials come from the ambient AWS
/// environment (env vars, profiles); the endpoint can be overridden in
/// the config file for self-hosted backends.
#[derive(Parser, Debug)]
#[command(name = "bkt")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Disable progress bar
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List objects in a bucket
    Ls(ls::LsArgs),

    /// Upload local files matching a glob
    Put(put::PutArgs),

    /// Download one object
    Get(get::GetArgs),

    /// Remove objects matching a glob
    Rm(rm::RmArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        no_progress: cli.no_progress,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Ls(args) => ls::execute(args, output_config).await,
        Commands::Put(args) => put::execute(args, output_config).await,
        Commands::Get(args) => get::execute(args, output_config).await,
        Commands::Rm(args) => rm::execute(args, output_config).await,
        Commands::Completions(args) => completions::execute(args),
    }
}

/// Load config and open a store handle; shared preamble of every remote command
async fn open_store(formatter: &Formatter) -> Result<bkt_s3::S3Store, ExitCode> {
    let config = match bkt_core::ConfigManager::new().and_then(|m| m.load()) {
        Ok(config) => config,
        Err(e) => {
            formatter.error(&format!("Failed to load configuration: {e}"));
            return Err(ExitCode::from_error(&e));
        }
    };
    tracing::debug!(
        endpoint = config.remote.endpoint.as_deref().unwrap_or("default"),
        "configuration loaded"
    );

    match bkt_s3::S3Store::new(&config.remote).await {
        Ok(store) => Ok(store),
        Err(e) => {
            formatter.error(&format!("Failed to create store client: {e}"));
            Err(ExitCode::from_error(&e))
        }
    }
}
