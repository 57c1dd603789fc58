//! Evaluate command - Roll out a saved Q-table on CliffWalking

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::to_writer_pretty;

use crate::{
    adapters::{CliffWalking, MsgPackRepository},
    cli::output::{print_section, print_stats_table},
    pipeline::{EvaluationConfig, evaluate},
    ports::QTableRepository,
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a trained Q-table")]
pub struct EvaluateArgs {
    /// Path to a saved Q-table
    pub table: PathBuf,

    /// Number of evaluation episodes
    #[arg(long, short = 'n', default_value_t = 10)]
    pub episodes: usize,

    /// Exploration probability while acting (0 = greedy)
    #[arg(long, default_value_t = 0.0)]
    pub epsilon: f64,

    /// Step limit per episode
    #[arg(long, default_value_t = 100)]
    pub max_steps: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print one line per episode
    #[arg(long, short = 'v', default_value_t = false)]
    pub verbose: bool,

    /// Export results to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    println!("Loading Q-table from: {}", args.table.display());
    let table = MsgPackRepository::new()
        .load(&args.table)
        .with_context(|| format!("Failed to load Q-table from {}", args.table.display()))?;

    let config = EvaluationConfig {
        episodes: args.episodes,
        explore: args.epsilon,
        max_steps: args.max_steps,
        seed: args.seed,
    };

    let mut env = CliffWalking::new();
    let result = evaluate(&table, &mut env, &config).context("Evaluation failed")?;

    if args.verbose {
        for stats in &result.episodes {
            println!(
                "Episode {}: {} steps, reward {}",
                stats.number(),
                stats.length,
                stats.total_reward
            );
        }
    }

    print_section("Evaluation Results");
    print_stats_table(&[
        ("Episodes", result.episodes.len().to_string().as_str()),
        (
            "Reached goal",
            format!("{}/{}", result.terminated, result.episodes.len()).as_str(),
        ),
        ("Mean reward", format!("{:.2}", result.mean_reward).as_str()),
        ("Mean length", format!("{:.2}", result.mean_length).as_str()),
    ]);

    if result.terminated < result.episodes.len() {
        eprintln!(
            "Warning: {} episode(s) hit the {}-step limit without reaching the goal.",
            result.episodes.len() - result.terminated,
            args.max_steps
        );
    }

    if let Some(path) = &args.export {
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        to_writer_pretty(file, &result)?;
        println!("\n✓ Results exported to: {}", path.display());
    }

    Ok(())
}
