//! Learner port - abstraction over the tabular control algorithms

use crate::{
    Result,
    ports::{Environment, Observer},
    q_learning::{QTable, TdAlgorithm},
    types::EpisodeStats,
};

/// Learner trait - Unified interface for Q-learning and SARSA agents
///
/// A learner owns its Q-table, its hyperparameters and its random number
/// generator. The training pipeline only decides how many episodes to run
/// and who gets notified.
pub trait Learner: Send {
    /// Get the learner's display name.
    fn name(&self) -> &str;

    /// Which update rule the learner applies.
    fn algorithm(&self) -> TdAlgorithm;

    /// Choose an action for `state` with the learner's exploration rate.
    fn select_action(&mut self, state: usize) -> usize;

    /// Run one episode to completion, updating the Q-table after every step.
    ///
    /// # Parameters
    ///
    /// * `env` - Environment to interact with (reset is performed here)
    /// * `episode` - Index of the episode (0-based)
    /// * `observers` - Receivers of per-step notifications
    ///
    /// # Errors
    ///
    /// Propagates environment errors unchanged, and rejects out-of-range
    /// states or non-finite rewards coming back from the environment.
    fn run_episode(
        &mut self,
        env: &mut dyn Environment,
        episode: usize,
        observers: &mut [Box<dyn Observer>],
    ) -> Result<EpisodeStats>;

    /// Read access to the learned table.
    fn q_table(&self) -> &QTable;

    /// Reseed the internal random number generator.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }

    /// Zero the table and restore the RNG to its initial seed.
    fn reset(&mut self) -> Result<()>;
}
