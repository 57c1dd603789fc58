//! Training and evaluation pipelines
//!
//! This module provides:
//! - The episode-driving training loop shared by Q-learning and SARSA
//! - Greedy (or lightly exploratory) evaluation of a learned table
//! - Observers that report progress while training runs

pub mod evaluation;
pub mod observers;
pub mod training;

pub use evaluation::{EvaluationConfig, EvaluationResult, evaluate};
pub use observers::{
    EpisodeLogObserver, MetricsObserver, MetricsSummary, ProgressObserver, format_episode_line,
};
pub use training::{TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::{Learner, Observer};
