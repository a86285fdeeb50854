//! Docweaver CLI - versioned documentation publisher.
//!
//! Provides commands for:
//! - `publish`: Publish every version of a product from a git source
//! - `update`: Refresh one already-published product
//! - `update-all`: Refresh every product in the workspace

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{PublishArgs, UpdateAllArgs, UpdateArgs};
use output::Output;

/// Docweaver - weave git tags into browsable documentation versions.
#[derive(Parser)]
#[command(name = "docweaver", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish every version of a product from a git source.
    Publish(PublishArgs),
    /// Refresh one already-published product from its recorded remote.
    Update(UpdateArgs),
    /// Refresh every product in the workspace, best effort.
    UpdateAll(UpdateAllArgs),
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let output = Output::new();

    let result = match cli.command {
        Commands::Publish(args) => args.execute(),
        Commands::Update(args) => args.execute(),
        Commands::UpdateAll(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
