//! Command-line interface for config-store
//!
//! Provides `get`, `dump` and `set` subcommands over a store built from files.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod dump;
mod get;
mod set;
mod utils;

/// Log filter override, e.g. `CONFIG_STORE_LOG=config_store=trace`.
const LOG_ENV: &str = "CONFIG_STORE_LOG";
const LOG_TARGET: &str = "config_store";

/// Merge configuration files and query them by dotted path
#[derive(Parser)]
#[command(name = "config-store")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log store activity at DEBUG level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value at a dotted path
    Get(get::GetArgs),

    /// Print the merged configuration
    Dump(dump::DumpArgs),

    /// Set a value and print the resulting configuration
    Set(set::SetArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("{LOG_TARGET}={level}")));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Get(args) => get::run(args),
        Commands::Dump(args) => dump::run(args),
        Commands::Set(args) => set::run(args),
    }
}
