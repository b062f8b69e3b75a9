//! Shiftwatch CLI — analyze vehicle pose logs into shift activity and stops.
//!
//! Usage:
//!   shiftwatch analyze <POSES> --shift day   Derive activity intervals and stops
//!   shiftwatch validate <POSES>              Check a pose log for malformed samples
//!   shiftwatch info <POSES>                  Show pose log statistics

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "shiftwatch",
    about = "Shift activity and stop analysis for tracked industrial vehicles",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one vehicle's pose log for one shift
    Analyze(commands::analyze::AnalyzeArgs),

    /// Check a pose log for malformed samples
    Validate {
        /// Path to the JSONL pose log
        path: PathBuf,

        /// Gap (seconds) above which tracking dropouts are reported
        #[arg(long, default_value = "2.0")]
        max_gap_secs: f64,
    },

    /// Show pose log statistics
    Info {
        /// Path to the JSONL pose log
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    shiftwatch_common::logging::init_logging(&shiftwatch_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: cli.log_json,
        file: None,
    });

    match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Validate { path, max_gap_secs } => commands::validate::run(path, max_gap_secs),
        Commands::Info { path } => commands::info::run(path),
    }
}
