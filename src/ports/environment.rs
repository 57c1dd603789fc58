//! Environment port - abstraction over the simulated world
//!
//! The learning core never looks inside the environment. It only sees
//! discrete state and action indices, scalar rewards and the two episode
//! ending flags.

use crate::Result;

/// Outcome of a single environment step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// State reached after the action
    pub next_state: usize,
    /// Reward observed for the transition
    pub reward: f64,
    /// The episode reached a terminal state (e.g. the goal)
    pub terminated: bool,
    /// The episode was cut short (e.g. a step limit)
    pub truncated: bool,
}

impl Step {
    /// Whether the episode is over.
    ///
    /// Termination and truncation end the episode alike. Neither one stops
    /// the update from bootstrapping.
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Environment trait - discrete state/action Markov decision process
///
/// # Examples
///
/// ```
/// use cliffwalk::ports::{Environment, Step};
///
/// /// Two cells; moving right from cell 0 ends the episode.
/// struct Corridor {
///     position: usize,
/// }
///
/// impl Environment for Corridor {
///     fn reset(&mut self) -> cliffwalk::Result<usize> {
///         self.position = 0;
///         Ok(0)
///     }
///
///     fn step(&mut self, action: usize) -> cliffwalk::Result<Step> {
///         self.position = action.min(1);
///         Ok(Step {
///             next_state: self.position,
///             reward: -1.0,
///             terminated: self.position == 1,
///             truncated: false,
///         })
///     }
///
///     fn num_states(&self) -> usize {
///         2
///     }
///
///     fn num_actions(&self) -> usize {
///         2
///     }
/// }
/// ```
pub trait Environment {
    /// Start a new episode and return the initial state.
    fn reset(&mut self) -> Result<usize>;

    /// Apply `action` in the current state.
    ///
    /// # Errors
    ///
    /// Implementations may fail for any reason (invalid action, broken
    /// backend). The training loop does not recover from such errors.
    fn step(&mut self, action: usize) -> Result<Step>;

    /// Number of discrete states.
    fn num_states(&self) -> usize;

    /// Number of discrete actions.
    fn num_actions(&self) -> usize;

    /// Release any resources held by the environment.
    ///
    /// Called exactly once by the training pipeline after the episode loop,
    /// whether or not the loop succeeded.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
