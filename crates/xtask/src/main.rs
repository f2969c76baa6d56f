//! Development tasks for the skill tree workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod dirs;

use anyhow::Result;
use clap::Parser;
use commands::{Clean, ListSaves, ReadSave, Simulate, Validate};

/// Development tasks for the skill tree workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for skill trees", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Read and inspect a save file
    ReadSave(ReadSave),

    /// List save slots
    ListSaves(ListSaves),

    /// Validate config, stats and every graph in a content directory
    Validate(Validate),

    /// Run a scripted upgrade-and-cast simulation
    Simulate(Simulate),

    /// Clean save data
    Clean(Clean),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for SKILLTREE_DATA_DIR and RUST_LOG)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::ReadSave(cmd) => cmd.execute(),
        Command::ListSaves(cmd) => cmd.execute(),
        Command::Validate(cmd) => cmd.execute(),
        Command::Simulate(cmd) => cmd.execute(),
        Command::Clean(cmd) => cmd.execute(),
    }
}
