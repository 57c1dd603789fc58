//! Q-learning and SARSA agents
//!
//! Both agents drive an [`Environment`] through full episodes, selecting
//! actions ε-greedily from their own Q-table and updating it after every
//! step.

use std::{fmt, str::FromStr};

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::{Environment, Learner, Observer, Step},
    q_learning::{AgentConfig, QTable, policy::epsilon_greedy},
    types::{EpisodeStats, Transition},
};

/// Which temporal difference update rule an agent applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TdAlgorithm {
    QLearning,
    Sarsa,
}

impl TdAlgorithm {
    /// File name the trained table is saved under when none is given.
    pub fn default_table_file(self) -> &'static str {
        match self {
            TdAlgorithm::QLearning => "q_learning_q_table.msgpack",
            TdAlgorithm::Sarsa => "sarsa_q_table.msgpack",
        }
    }

    /// Create a fresh agent for this algorithm.
    pub fn build(
        self,
        config: AgentConfig,
        num_states: usize,
        num_actions: usize,
    ) -> Result<Box<dyn Learner>> {
        Ok(match self {
            TdAlgorithm::QLearning => {
                Box::new(QLearningAgent::new(config, num_states, num_actions)?)
            }
            TdAlgorithm::Sarsa => Box::new(SarsaAgent::new(config, num_states, num_actions)?),
        })
    }
}

impl fmt::Display for TdAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TdAlgorithm::QLearning => write!(f, "q-learning"),
            TdAlgorithm::Sarsa => write!(f, "sarsa"),
        }
    }
}

impl FromStr for TdAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "q-learning" | "qlearning" | "q" => Ok(TdAlgorithm::QLearning),
            "sarsa" => Ok(TdAlgorithm::Sarsa),
            other => Err(Error::InvalidConfiguration {
                message: format!("unknown algorithm '{other}' (expected 'q-learning' or 'sarsa')"),
            }),
        }
    }
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// State shared by both agents: table, hyperparameters and RNG
#[derive(Debug, Clone)]
struct AgentCore {
    q_table: QTable,
    config: AgentConfig,
    rng: StdRng,
}

impl AgentCore {
    fn new(config: AgentConfig, num_states: usize, num_actions: usize) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            q_table: QTable::new(num_states, num_actions)?,
            rng: build_rng(config.seed),
            config,
        })
    }

    fn select_action(&mut self, state: usize) -> usize {
        epsilon_greedy(&self.q_table, state, self.config.epsilon, &mut self.rng)
    }

    fn reset_env(&self, env: &mut dyn Environment) -> Result<usize> {
        let got = (env.num_states(), env.num_actions());
        if got != self.q_table.shape() {
            return Err(Error::ShapeMismatch {
                expected: self.q_table.shape(),
                got,
            });
        }
        let state = env.reset()?;
        self.q_table.check_state(state)
    }

    fn step_env(&self, env: &mut dyn Environment, action: usize) -> Result<Step> {
        let step = env.step(action)?;
        self.q_table.check_state(step.next_state)?;
        if !step.reward.is_finite() {
            return Err(Error::InvalidReward {
                reward: step.reward,
            });
        }
        Ok(step)
    }

    fn reseed(&mut self, seed: u64) {
        self.config.seed = Some(seed);
        self.rng = StdRng::seed_from_u64(seed);
    }

    fn reset(&mut self) {
        self.q_table.reset();
        self.rng = build_rng(self.config.seed);
    }
}

fn notify_step(
    observers: &mut [Box<dyn Observer>],
    episode: usize,
    step_num: usize,
    transition: &Transition,
    updated_value: f64,
) -> Result<()> {
    for observer in observers.iter_mut() {
        observer.on_step(episode, step_num, transition, updated_value)?;
    }
    Ok(())
}

/// Q-learning agent (off-policy TD control)
///
/// Learns the optimal Q* function by always updating toward the maximum
/// next-state value, regardless of the action actually taken next.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    core: AgentCore,
}

impl QLearningAgent {
    /// Create a new Q-learning agent with a zeroed `num_states x num_actions` table
    ///
    /// # Errors
    ///
    /// Fails if the hyperparameters are out of range or a dimension is zero.
    pub fn new(config: AgentConfig, num_states: usize, num_actions: usize) -> Result<Self> {
        Ok(Self {
            core: AgentCore::new(config, num_states, num_actions)?,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.core.reseed(seed);
        self
    }

    pub fn config(&self) -> &AgentConfig {
        &self.core.config
    }

    pub fn into_q_table(self) -> QTable {
        self.core.q_table
    }
}

impl Learner for QLearningAgent {
    fn name(&self) -> &str {
        "Q-Learning"
    }

    fn algorithm(&self) -> TdAlgorithm {
        TdAlgorithm::QLearning
    }

    fn select_action(&mut self, state: usize) -> usize {
        self.core.select_action(state)
    }

    fn run_episode(
        &mut self,
        env: &mut dyn Environment,
        episode: usize,
        observers: &mut [Box<dyn Observer>],
    ) -> Result<EpisodeStats> {
        let AgentConfig { alpha, gamma, .. } = self.core.config;
        let mut state = self.core.reset_env(env)?;
        let mut total_reward = 0.0;
        let mut length = 0;

        loop {
            let action = self.core.select_action(state);
            let step = self.core.step_env(env, action)?;

            let updated = self.core.q_table.q_learning_update(
                state,
                action,
                step.reward,
                step.next_state,
                alpha,
                gamma,
            );

            let transition = Transition {
                state,
                action,
                reward: step.reward,
                next_state: step.next_state,
                next_action: None,
                terminated: step.terminated,
                truncated: step.truncated,
            };
            notify_step(observers, episode, length, &transition, updated)?;

            state = step.next_state;
            total_reward += step.reward;
            length += 1;

            if step.done() {
                break;
            }
        }

        Ok(EpisodeStats {
            episode,
            length,
            total_reward,
        })
    }

    fn q_table(&self) -> &QTable {
        &self.core.q_table
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.core.reseed(seed);
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.core.reset();
        Ok(())
    }
}

/// SARSA agent (on-policy TD control)
///
/// Learns Q^π for the ε-greedy policy it follows, exploration included,
/// by bootstrapping from the action it will actually take next.
#[derive(Debug, Clone)]
pub struct SarsaAgent {
    core: AgentCore,
}

impl SarsaAgent {
    /// Create a new SARSA agent with a zeroed `num_states x num_actions` table
    pub fn new(config: AgentConfig, num_states: usize, num_actions: usize) -> Result<Self> {
        Ok(Self {
            core: AgentCore::new(config, num_states, num_actions)?,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.core.reseed(seed);
        self
    }

    pub fn config(&self) -> &AgentConfig {
        &self.core.config
    }

    pub fn into_q_table(self) -> QTable {
        self.core.q_table
    }
}

impl Learner for SarsaAgent {
    fn name(&self) -> &str {
        "SARSA"
    }

    fn algorithm(&self) -> TdAlgorithm {
        TdAlgorithm::Sarsa
    }

    fn select_action(&mut self, state: usize) -> usize {
        self.core.select_action(state)
    }

    fn run_episode(
        &mut self,
        env: &mut dyn Environment,
        episode: usize,
        observers: &mut [Box<dyn Observer>],
    ) -> Result<EpisodeStats> {
        let AgentConfig { alpha, gamma, .. } = self.core.config;
        let mut state = self.core.reset_env(env)?;
        let mut action = self.core.select_action(state);
        let mut total_reward = 0.0;
        let mut length = 0;

        loop {
            let step = self.core.step_env(env, action)?;

            // Next action comes from the same exploratory policy
            let next_action = self.core.select_action(step.next_state);

            let updated = self.core.q_table.sarsa_update(
                state,
                action,
                step.reward,
                step.next_state,
                next_action,
                alpha,
                gamma,
            );

            let transition = Transition {
                state,
                action,
                reward: step.reward,
                next_state: step.next_state,
                next_action: Some(next_action),
                terminated: step.terminated,
                truncated: step.truncated,
            };
            notify_step(observers, episode, length, &transition, updated)?;

            state = step.next_state;
            action = next_action;
            total_reward += step.reward;
            length += 1;

            if step.done() {
                break;
            }
        }

        Ok(EpisodeStats {
            episode,
            length,
            total_reward,
        })
    }

    fn q_table(&self) -> &QTable {
        &self.core.q_table
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.core.reseed(seed);
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.core.reset();
        Ok(())
    }
}
