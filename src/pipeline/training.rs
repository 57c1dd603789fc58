//! Training pipeline for tabular TD learners

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::{Environment, Learner, Observer},
    q_learning::TdAlgorithm,
    types::EpisodeStats,
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub num_episodes: usize,

    /// Random seed applied to the learner before the first episode
    pub seed: Option<u64>,
}

impl TrainingConfig {
    pub const DEFAULT_EPISODES: usize = 500;

    pub fn validate(&self) -> Result<()> {
        if self.num_episodes == 0 {
            return Err(Error::InvalidConfiguration {
                message: "episode count must be positive".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_episodes: Self::DEFAULT_EPISODES,
            seed: None,
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Algorithm that produced the run
    pub algorithm: TdAlgorithm,

    /// Total episodes played
    pub total_episodes: usize,

    /// Total environment steps over all episodes
    pub total_steps: usize,

    /// Mean total reward per episode
    pub mean_reward: f64,

    /// Mean episode length
    pub mean_length: f64,

    /// Highest total reward of any episode
    pub best_reward: f64,

    /// Per-episode statistics in order
    pub episodes: Vec<EpisodeStats>,
}

impl TrainingResult {
    /// Create a new training result from per-episode statistics
    pub fn new(algorithm: TdAlgorithm, episodes: Vec<EpisodeStats>) -> Self {
        let total_episodes = episodes.len();
        let total_steps = episodes.iter().map(|e| e.length).sum();
        let (mean_reward, mean_length) = if total_episodes > 0 {
            (
                episodes.iter().map(|e| e.total_reward).sum::<f64>() / total_episodes as f64,
                total_steps as f64 / total_episodes as f64,
            )
        } else {
            (0.0, 0.0)
        };
        let best_reward = episodes
            .iter()
            .map(|e| e.total_reward)
            .fold(f64::NEG_INFINITY, f64::max);

        Self {
            algorithm,
            total_episodes,
            total_steps,
            mean_reward,
            mean_length,
            best_reward: if total_episodes > 0 { best_reward } else { 0.0 },
            episodes,
        }
    }

    /// Mean total reward over the last `window` episodes
    pub fn trailing_mean_reward(&self, window: usize) -> f64 {
        let window = window.min(self.episodes.len());
        if window == 0 {
            return 0.0;
        }
        let tail = &self.episodes[self.episodes.len() - window..];
        tail.iter().map(|e| e.total_reward).sum::<f64>() / window as f64
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Training pipeline for a single learner in a single environment
///
/// The pipeline owns the episode budget and the observers. The learner owns
/// the Q-table and the update rule.
///
/// # Examples
///
/// ```
/// use cliffwalk::adapters::CliffWalking;
/// use cliffwalk::pipeline::{TrainingConfig, TrainingPipeline};
/// use cliffwalk::ports::{Environment, Learner};
/// use cliffwalk::q_learning::{AgentConfig, QLearningAgent};
///
/// let mut env = CliffWalking::new();
/// let mut agent = QLearningAgent::new(AgentConfig::default(), env.num_states(), env.num_actions())?;
///
/// let config = TrainingConfig { num_episodes: 20, seed: Some(7) };
/// let result = TrainingPipeline::new(config).run(&mut agent, &mut env)?;
///
/// assert_eq!(result.total_episodes, 20);
/// assert_eq!(agent.q_table().shape(), (48, 4));
/// # Ok::<(), cliffwalk::Error>(())
/// ```
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Run the configured number of episodes.
    ///
    /// The environment is closed exactly once when the loop finishes,
    /// including when an episode fails. The first error wins: an episode
    /// error is reported even if closing also fails.
    pub fn run(
        &mut self,
        agent: &mut dyn Learner,
        env: &mut dyn Environment,
    ) -> Result<TrainingResult> {
        let outcome = self.run_episodes(agent, env);
        let closed = env.close();
        let episodes = outcome?;
        closed?;

        // Notify observers of training end
        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::new(agent.algorithm(), episodes))
    }

    fn run_episodes(
        &mut self,
        agent: &mut dyn Learner,
        env: &mut dyn Environment,
    ) -> Result<Vec<EpisodeStats>> {
        self.config.validate()?;
        if let Some(seed) = self.config.seed {
            agent.set_rng_seed(seed)?;
        }

        for observer in &mut self.observers {
            observer.on_training_start(self.config.num_episodes)?;
        }

        let mut episodes = Vec::with_capacity(self.config.num_episodes);
        for episode in 0..self.config.num_episodes {
            for observer in &mut self.observers {
                observer.on_episode_start(episode)?;
            }

            let stats = agent.run_episode(env, episode, &mut self.observers)?;

            for observer in &mut self.observers {
                observer.on_episode_end(&stats)?;
            }
            episodes.push(stats);
        }

        Ok(episodes)
    }
}
