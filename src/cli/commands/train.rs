//! Train command - Train a Q-learning or SARSA agent on CliffWalking

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    adapters::{CliffWalking, MsgPackRepository},
    cli::output::{format_number, print_section, print_stats_table},
    pipeline::{
        EpisodeLogObserver, MetricsObserver, MetricsSummary, ProgressObserver, TrainingConfig,
        TrainingPipeline, TrainingResult,
    },
    ports::{Environment, QTableRepository},
    q_learning::{AgentConfig, TdAlgorithm},
};

/// Learners available from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LearnerType {
    /// Off-policy TD control
    QLearning,
    /// On-policy TD control
    Sarsa,
}

impl From<LearnerType> for TdAlgorithm {
    fn from(value: LearnerType) -> Self {
        match value {
            LearnerType::QLearning => TdAlgorithm::QLearning,
            LearnerType::Sarsa => TdAlgorithm::Sarsa,
        }
    }
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile<'a> {
    training: &'a TrainingResult,
    hyperparameters: &'a AgentConfig,
    metrics: &'a MetricsSummary,
    table: String,
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

/// Episodes in the trailing reward window of the summary
const TRAILING_WINDOW: usize = 50;

#[derive(Parser, Debug)]
#[command(about = "Train a learner", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Type of learner to train
    #[arg(value_enum)]
    pub learner: LearnerType,

    /// Number of training episodes
    #[arg(long, short = 'n', default_value_t = TrainingConfig::DEFAULT_EPISODES)]
    pub episodes: usize,

    /// Exploration probability ε
    #[arg(long, default_value_t = AgentConfig::DEFAULT_EPSILON)]
    pub epsilon: f64,

    /// Learning rate α
    #[arg(long, default_value_t = AgentConfig::DEFAULT_ALPHA)]
    pub alpha: f64,

    /// Discount factor γ
    #[arg(long, default_value_t = AgentConfig::DEFAULT_GAMMA)]
    pub gamma: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Truncate episodes after this many steps
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Output file for the trained Q-table (defaults per algorithm)
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Show a progress bar instead of per-episode lines
    #[arg(long, default_value_t = false)]
    pub progress: bool,

    /// Suppress per-episode lines
    #[arg(long, short = 'q', default_value_t = false)]
    pub quiet: bool,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let algorithm = TdAlgorithm::from(args.learner);

    let agent_config = AgentConfig::new(args.epsilon, args.alpha, args.gamma);
    let agent_config = match args.seed {
        Some(seed) => agent_config.with_seed(seed),
        None => agent_config,
    };
    let config = TrainingConfig {
        num_episodes: args.episodes,
        seed: args.seed,
    };
    config.validate().context("Invalid training configuration")?;

    let mut env = CliffWalking::new();
    if let Some(max_steps) = args.max_steps {
        env = env.with_max_steps(max_steps);
    }

    let mut agent = algorithm
        .build(agent_config.clone(), env.num_states(), env.num_actions())
        .context("Invalid agent configuration")?;

    let metrics = MetricsObserver::new();
    let mut pipeline = TrainingPipeline::new(config).with_observer(Box::new(metrics.clone()));
    if args.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    } else if !args.quiet {
        pipeline = pipeline.with_observer(Box::new(EpisodeLogObserver::new(algorithm)));
    }

    let result = pipeline
        .run(agent.as_mut(), &mut env)
        .with_context(|| format!("{} training failed", agent.name()))?;

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(algorithm.default_table_file()));
    MsgPackRepository::new()
        .save(agent.q_table(), &output_path)
        .with_context(|| format!("Failed to save Q-table to {}", output_path.display()))?;

    let summary_metrics = metrics.summary(TRAILING_WINDOW);
    print_section(&format!("{} Training Complete", agent.name()));
    print_stats_table(&[
        ("Episodes", format_number(summary_metrics.episodes).as_str()),
        ("Total steps", format_number(result.total_steps).as_str()),
        (
            "Mean reward",
            format!("{:.2}", summary_metrics.mean_reward).as_str(),
        ),
        (
            "Mean length",
            format!("{:.2}", summary_metrics.mean_length).as_str(),
        ),
        ("Best reward", summary_metrics.best_reward.to_string().as_str()),
        (
            format!("Last {TRAILING_WINDOW} mean reward").as_str(),
            format!("{:.2}", summary_metrics.trailing_mean_reward).as_str(),
        ),
        ("Q-table", output_path.display().to_string().as_str()),
    ]);

    if algorithm == TdAlgorithm::Sarsa {
        println!("Training Complete. Q Table Saved");
    }

    if let Some(raw) = &args.summary {
        let summary_path = sanitize_summary_path(raw);
        if summary_path != *raw {
            println!(
                "\n⚠️  Normalizing summary path to {}",
                summary_path.display()
            );
        }

        if let Some(parent) = summary_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let summary = TrainingSummaryFile {
            training: &result,
            hyperparameters: &agent_config,
            metrics: &summary_metrics,
            table: output_path.display().to_string(),
        };

        let file = File::create(&summary_path)
            .with_context(|| format!("Failed to create {}", summary_path.display()))?;
        to_writer_pretty(file, &summary)?;
        println!("\nSummary written to {}", summary_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_summary_path() {
        assert_eq!(
            sanitize_summary_path(Path::new("out/run")),
            PathBuf::from("out/run.json")
        );
        assert_eq!(
            sanitize_summary_path(Path::new("out/run.JSON")),
            PathBuf::from("out/run.JSON")
        );
        let dir = format!("out{}", std::path::MAIN_SEPARATOR);
        assert_eq!(
            sanitize_summary_path(Path::new(&dir)),
            PathBuf::from("out").join("training_summary.json")
        );
    }

    #[test]
    fn test_defaults_match_classic_constants() {
        let args = TrainArgs::parse_from(["train", "q-learning"]);
        assert_eq!(args.learner, LearnerType::QLearning);
        assert_eq!(args.episodes, 500);
        assert_eq!(args.epsilon, 0.1);
        assert_eq!(args.alpha, 0.1);
        assert_eq!(args.gamma, 0.9);
        assert!(args.output.is_none());
    }
}
