//! Observers for training pipelines
//!
//! Observers report on training without the training loop knowing how the
//! report is rendered.

use std::{
    io::{self, Write},
    sync::{Arc, Mutex, MutexGuard},
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{Result, ports::Observer, q_learning::TdAlgorithm, types::EpisodeStats};

/// Human-readable summary line for one episode.
///
/// Each algorithm keeps its own historical wording.
pub fn format_episode_line(algorithm: TdAlgorithm, stats: &EpisodeStats) -> String {
    match algorithm {
        TdAlgorithm::QLearning => format!(
            "Episode: {}, Length: {}, Total Reward: {}",
            stats.number(),
            stats.length,
            stats.total_reward
        ),
        TdAlgorithm::Sarsa => format!(
            "Episode {} finished | Steps: {} | Total Reward: {}",
            stats.number(),
            stats.length,
            stats.total_reward
        ),
    }
}

/// Episode log observer - one line per finished episode
pub struct EpisodeLogObserver {
    algorithm: TdAlgorithm,
    writer: Box<dyn Write + Send>,
}

impl EpisodeLogObserver {
    /// Log to standard output
    pub fn new(algorithm: TdAlgorithm) -> Self {
        Self::with_writer(algorithm, Box::new(io::stdout()))
    }

    /// Log to an arbitrary writer
    pub fn with_writer(algorithm: TdAlgorithm, writer: Box<dyn Write + Send>) -> Self {
        Self { algorithm, writer }
    }
}

impl Observer for EpisodeLogObserver {
    fn on_episode_end(&mut self, stats: &EpisodeStats) -> Result<()> {
        writeln!(self.writer, "{}", format_episode_line(self.algorithm, stats))?;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    last_reward: f64,
    best_reward: f64,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            last_reward: 0.0,
            best_reward: f64::NEG_INFINITY,
        }
    }

    fn message(&self) -> String {
        format!("last:{} best:{}", self.last_reward, self.best_reward)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, stats: &EpisodeStats) -> Result<()> {
        self.last_reward = stats.total_reward;
        self.best_reward = self.best_reward.max(stats.total_reward);

        if let Some(pb) = &self.progress_bar {
            pb.set_position(stats.number() as u64);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct EpisodeMetrics {
    lengths: Vec<usize>,
    rewards: Vec<f64>,
}

/// Metrics observer - Tracks episode lengths and rewards
///
/// Clones share the same storage: attach one clone to a pipeline and read
/// the metrics from another once training is over.
#[derive(Debug, Clone, Default)]
pub struct MetricsObserver {
    metrics: Arc<Mutex<EpisodeMetrics>>,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    fn metrics(&self) -> MutexGuard<'_, EpisodeMetrics> {
        self.metrics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn episodes(&self) -> usize {
        self.metrics().rewards.len()
    }

    /// Get mean reward over all episodes
    pub fn mean_reward(&self) -> f64 {
        mean(&self.metrics().rewards)
    }

    /// Get mean episode length
    pub fn mean_length(&self) -> f64 {
        let metrics = self.metrics();
        if metrics.lengths.is_empty() {
            0.0
        } else {
            metrics.lengths.iter().sum::<usize>() as f64 / metrics.lengths.len() as f64
        }
    }

    /// Mean reward over the last `window` episodes
    pub fn trailing_mean_reward(&self, window: usize) -> f64 {
        let metrics = self.metrics();
        let start = metrics.rewards.len().saturating_sub(window);
        mean(&metrics.rewards[start..])
    }

    /// Get metrics summary, with the trailing mean taken over `window` episodes
    pub fn summary(&self, window: usize) -> MetricsSummary {
        let best_reward = {
            let metrics = self.metrics();
            if metrics.rewards.is_empty() {
                0.0
            } else {
                metrics
                    .rewards
                    .iter()
                    .copied()
                    .fold(f64::NEG_INFINITY, f64::max)
            }
        };

        MetricsSummary {
            episodes: self.episodes(),
            mean_reward: self.mean_reward(),
            mean_length: self.mean_length(),
            best_reward,
            trailing_window: window,
            trailing_mean_reward: self.trailing_mean_reward(window),
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub episodes: usize,
    pub mean_reward: f64,
    pub mean_length: f64,
    pub best_reward: f64,
    pub trailing_window: usize,
    pub trailing_mean_reward: f64,
}

impl Observer for MetricsObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let mut metrics = self.metrics();
        metrics.lengths = Vec::with_capacity(total_episodes);
        metrics.rewards = Vec::with_capacity(total_episodes);
        Ok(())
    }

    fn on_episode_end(&mut self, stats: &EpisodeStats) -> Result<()> {
        let mut metrics = self.metrics();
        metrics.lengths.push(stats.length);
        metrics.rewards.push(stats.total_reward);
        Ok(())
    }
}
