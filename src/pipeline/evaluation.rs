//! Evaluation of a learned Q-table without further learning

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::Environment,
    q_learning::{QTable, epsilon_greedy},
    types::EpisodeStats,
};

/// Evaluation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Number of roll-outs
    pub episodes: usize,

    /// Exploration probability used while acting (0 = greedy)
    pub explore: f64,

    /// Steps after which a roll-out is cut short
    pub max_steps: usize,

    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl EvaluationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.episodes == 0 {
            return Err(Error::InvalidConfiguration {
                message: "evaluation needs at least one episode".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.explore) {
            return Err(Error::InvalidConfiguration {
                message: format!("explore must be in [0, 1], got {}", self.explore),
            });
        }
        if self.max_steps == 0 {
            return Err(Error::InvalidConfiguration {
                message: "max_steps must be positive".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            episodes: 10,
            explore: 0.0,
            max_steps: 100,
            seed: None,
        }
    }
}

/// Result of evaluating a table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub episodes: Vec<EpisodeStats>,
    /// Roll-outs that ended by termination rather than the step limit
    pub terminated: usize,
    pub mean_reward: f64,
    pub mean_length: f64,
}

/// Roll out `table` in `env` without updating it.
///
/// The environment is closed when evaluation finishes, on success or error.
pub fn evaluate(
    table: &QTable,
    env: &mut dyn Environment,
    config: &EvaluationConfig,
) -> Result<EvaluationResult> {
    let outcome = run_rollouts(table, env, config);
    let closed = env.close();
    let result = outcome?;
    closed?;
    Ok(result)
}

fn run_rollouts(
    table: &QTable,
    env: &mut dyn Environment,
    config: &EvaluationConfig,
) -> Result<EvaluationResult> {
    config.validate()?;
    let got = (env.num_states(), env.num_actions());
    if got != table.shape() {
        return Err(Error::ShapeMismatch {
            expected: table.shape(),
            got,
        });
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let mut episodes = Vec::with_capacity(config.episodes);
    let mut terminated = 0;

    for episode in 0..config.episodes {
        let mut state = table.check_state(env.reset()?)?;
        let mut total_reward = 0.0;
        let mut length = 0;

        while length < config.max_steps {
            let action = epsilon_greedy(table, state, config.explore, &mut rng);
            let step = env.step(action)?;
            state = table.check_state(step.next_state)?;
            total_reward += step.reward;
            length += 1;

            if step.done() {
                if step.terminated {
                    terminated += 1;
                }
                break;
            }
        }

        episodes.push(EpisodeStats {
            episode,
            length,
            total_reward,
        });
    }

    let count = episodes.len() as f64;
    let mean_reward = episodes.iter().map(|e| e.total_reward).sum::<f64>() / count;
    let mean_length = episodes.iter().map(|e| e.length).sum::<usize>() as f64 / count;

    Ok(EvaluationResult {
        episodes,
        terminated,
        mean_reward,
        mean_length,
    })
}
