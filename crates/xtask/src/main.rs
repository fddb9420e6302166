//! Development tasks for the tournament store
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod dirs;

use anyhow::Result;
use clap::Parser;
use commands::{Clean, ReadStore, Seed, Stats};

/// Development tasks for the tournament store
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for the tournament store", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// List stored keys or print one value
    ReadStore(ReadStore),

    /// Print home page counters and deltas
    Stats(Stats),

    /// Write tournaments from a JSON file into the store
    Seed(Seed),

    /// Delete the file store
    Clean(Clean),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for STORE_DIR and other env vars)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::ReadStore(cmd) => cmd.execute(),
        Command::Stats(cmd) => cmd.execute(),
        Command::Seed(cmd) => cmd.execute(),
        Command::Clean(cmd) => cmd.execute(),
    }
}
