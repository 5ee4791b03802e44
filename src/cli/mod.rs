//! Command-line interface definitions.

pub mod check;
pub mod run;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Ceres - cross-exchange spot arbitrage.
#[derive(Parser, Debug)]
#[command(name = "ceres")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run arbitrage cycles until interrupted
    Run(RunArgs),

    /// Validate configuration file
    Check(CheckArgs),
}

/// Arguments for the `check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Stop after this many cycles
    #[arg(long)]
    pub cycles: Option<u64>,

    /// Pause between cycles in milliseconds
    #[arg(long, default_value = "1000")]
    pub interval_ms: u64,

    /// Override log level (debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,

    /// Override minimum profit threshold
    #[arg(long)]
    pub min_profit: Option<Decimal>,
}
