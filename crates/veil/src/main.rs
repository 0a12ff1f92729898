//! Veil - session-scoped symmetric encryption service
//!
//! Main entry point for the Veil CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod logging;

use commands::{algorithms, config, start};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// Veil - session-scoped symmetric encryption service
#[derive(Parser)]
#[command(name = "veil")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true, env = "VEIL_JSON_LOGS")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the Veil server
    Start(start::StartArgs),

    /// List supported encryption algorithms
    Algorithms(algorithms::AlgorithmsArgs),

    /// Configuration management
    Config(config::ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let ctx = commands::Context {
        verbose: cli.verbose,
        json_logs: cli.json_logs,
    };

    match cli.command {
        Commands::Start(args) => start::run(args, &ctx).await,
        Commands::Algorithms(args) => algorithms::run(args, &ctx),
        Commands::Config(args) => config::run(args, &ctx),
    }
}
