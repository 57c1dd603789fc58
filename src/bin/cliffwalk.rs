//! cliffwalk CLI - Tabular TD control on the CliffWalking grid world
//!
//! This CLI provides:
//! - Training Q-learning and SARSA agents
//! - Evaluating saved Q-tables
//! - Exporting saved Q-tables as CSV or JSON

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cliffwalk")]
#[command(version, about = "Tabular Q-learning and SARSA on CliffWalking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a learner (Q-learning or SARSA)
    Train(cliffwalk::cli::commands::train::TrainArgs),

    /// Evaluate a saved Q-table
    Evaluate(cliffwalk::cli::commands::evaluate::EvaluateArgs),

    /// Export a saved Q-table
    Export(cliffwalk::cli::commands::export::ExportArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => cliffwalk::cli::commands::train::execute(args),
        Commands::Evaluate(args) => cliffwalk::cli::commands::evaluate::execute(args),
        Commands::Export(args) => cliffwalk::cli::commands::export::execute(args),
    }
}
