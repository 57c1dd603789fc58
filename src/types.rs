//! Shared value types passed between learners, pipelines and observers

use serde::{Deserialize, Serialize};

/// One observed transition inside an episode.
///
/// Transitions are ephemeral: they are handed to observers and then
/// dropped. Nothing keeps a replay buffer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub state: usize,
    pub action: usize,
    pub reward: f64,
    pub next_state: usize,
    /// Action chosen in `next_state` (SARSA only)
    pub next_action: Option<usize>,
    pub terminated: bool,
    pub truncated: bool,
}

impl Transition {
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Per-episode bookkeeping reported after every episode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeStats {
    /// Episode index (0-based)
    pub episode: usize,
    /// Number of environment steps taken
    pub length: usize,
    /// Sum of rewards observed during the episode
    pub total_reward: f64,
}

impl EpisodeStats {
    /// Episode number as shown to humans (1-based)
    pub fn number(&self) -> usize {
        self.episode + 1
    }
}
