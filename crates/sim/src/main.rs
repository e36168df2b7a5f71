//! Developer CLI for the battler engine.
//!
//! Run with: `battler-sim <command>`

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Catalog, Replay};

/// Battler engine development tools
#[derive(Parser)]
#[command(name = "battler-sim")]
#[command(about = "Replay scenarios against the battler rules engine", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Replay a scenario file and print each outcome
    Replay(Replay),

    /// List the units and items of a content directory
    Catalog(Catalog),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Replay(cmd) => cmd.execute(),
        Command::Catalog(cmd) => cmd.execute(),
    }
}
