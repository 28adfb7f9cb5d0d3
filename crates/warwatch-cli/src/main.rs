//! warwatch CLI
//!
//! Command-line interface for polling war feeds and inspecting tracker state

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "warwatch")]
#[command(about = "warwatch - Galactic War feed change tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Poll every tracker in a tracker file
    Run(commands::run::RunArgs),
    /// Inspect or reset persisted tracker state
    State(commands::state::StateArgs),
    /// Diff two JSON arrays of records offline
    Diff(commands::diff::DiffArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::State(args) => commands::state::execute(args),
        Commands::Diff(args) => commands::diff::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
