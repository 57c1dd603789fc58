//! Observer port - abstraction for training observation
//!
//! Observers receive training events without the training loop knowing
//! whether they print, draw a progress bar or collect metrics.

use crate::{
    Result,
    types::{EpisodeStats, Transition},
};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - Once at the beginning
/// 2. For each episode:
///    - `on_episode_start(episode)`
///    - `on_step(...)` - After every Q-table update
///    - `on_episode_end(stats)`
/// 3. `on_training_end()` - Once at the end, only if all episodes succeeded
///
/// # Examples
///
/// ```
/// use cliffwalk::{ports::Observer, types::EpisodeStats};
///
/// struct WorstEpisode {
///     worst: f64,
/// }
///
/// impl Observer for WorstEpisode {
///     fn on_episode_end(&mut self, stats: &EpisodeStats) -> cliffwalk::Result<()> {
///         self.worst = self.worst.min(stats.total_reward);
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when training starts.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode starts (index is 0-based).
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each environment step and its Q-table update.
    ///
    /// # Parameters
    ///
    /// * `episode` - Index of the current episode
    /// * `step_num` - Step number within the episode (0-based)
    /// * `transition` - The observed transition
    /// * `updated_value` - Q(s, a) after the update
    fn on_step(
        &mut self,
        _episode: usize,
        _step_num: usize,
        _transition: &Transition,
        _updated_value: f64,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when an episode ends.
    fn on_episode_end(&mut self, _stats: &EpisodeStats) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
