//! Hyperparameters for tabular TD agents.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Configuration for creating a Q-learning or SARSA agent.
///
/// Defaults match the classic CliffWalking setup: ε = 0.1, α = 0.1, γ = 0.9
/// and a non-deterministic RNG.
///
/// # Examples
///
/// ```
/// use cliffwalk::q_learning::AgentConfig;
///
/// let config = AgentConfig::default()
///     .with_epsilon(0.05)
///     .with_alpha(0.5)
///     .with_seed(42);
/// config.validate()?;
/// # Ok::<(), cliffwalk::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Exploration probability ε in [0, 1]
    pub epsilon: f64,
    /// Learning rate α in (0, 1]
    pub alpha: f64,
    /// Discount factor γ in [0, 1]
    pub gamma: f64,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    pub const DEFAULT_EPSILON: f64 = 0.1;
    pub const DEFAULT_ALPHA: f64 = 0.1;
    pub const DEFAULT_GAMMA: f64 = 0.9;

    pub fn new(epsilon: f64, alpha: f64, gamma: f64) -> Self {
        Self {
            epsilon,
            alpha,
            gamma,
            seed: None,
        }
    }

    /// Set the exploration probability.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the learning rate.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the discount factor.
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Fail fast on out-of-range hyperparameters.
    ///
    /// Requires `0 ≤ ε ≤ 1`, `0 < α ≤ 1` and `0 ≤ γ ≤ 1`.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(invalid(format!(
                "epsilon must be in [0, 1], got {}",
                self.epsilon
            )));
        }
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(invalid(format!(
                "alpha must be in (0, 1], got {}",
                self.alpha
            )));
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(invalid(format!(
                "gamma must be in [0, 1], got {}",
                self.gamma
            )));
        }
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_EPSILON,
            Self::DEFAULT_ALPHA,
            Self::DEFAULT_GAMMA,
        )
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidConfiguration { message }
}
