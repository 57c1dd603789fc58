//! CliffWalking grid world
//!
//! The 4 x 12 grid from Sutton & Barto, Example 6.6:
//!
//! ```text
//! . . . . . . . . . . . .
//! . . . . . . . . . . . .
//! . . . . . . . . . . . .
//! S C C C C C C C C C C G
//! ```
//!
//! States are `row * 12 + col`. Each move costs -1. Stepping into a cliff
//! cell costs -100 and puts the agent back on `S` without ending the
//! episode. Reaching `G` terminates the episode.

use crate::{
    Error, Result,
    ports::{Environment, Step},
};

pub const ROWS: usize = 4;
pub const COLS: usize = 12;
pub const NUM_STATES: usize = ROWS * COLS;
pub const NUM_ACTIONS: usize = 4;

pub const START_STATE: usize = (ROWS - 1) * COLS;
pub const GOAL_STATE: usize = ROWS * COLS - 1;

const STEP_REWARD: f64 = -1.0;
const CLIFF_REWARD: f64 = -100.0;

/// Moves available to the agent, indexed as the environment expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Move {
    pub const ALL: [Move; NUM_ACTIONS] = [Move::Up, Move::Right, Move::Down, Move::Left];

    pub fn from_index(action: usize) -> Option<Self> {
        Self::ALL.get(action).copied()
    }
}

fn is_cliff(state: usize) -> bool {
    let (row, col) = (state / COLS, state % COLS);
    row == ROWS - 1 && col > 0 && col < COLS - 1
}

/// CliffWalking environment
///
/// # Examples
///
/// ```
/// use cliffwalk::adapters::{CliffWalking, cliff_walking::{Move, START_STATE}};
/// use cliffwalk::ports::Environment;
///
/// let mut env = CliffWalking::new();
/// let state = env.reset()?;
/// assert_eq!(state, START_STATE);
///
/// let step = env.step(Move::Right as usize)?;
/// assert_eq!(step.reward, -100.0);
/// assert_eq!(step.next_state, START_STATE);
/// # Ok::<(), cliffwalk::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct CliffWalking {
    position: usize,
    max_steps: Option<usize>,
    elapsed: usize,
    closed: bool,
}

impl CliffWalking {
    pub fn new() -> Self {
        Self {
            position: START_STATE,
            max_steps: None,
            elapsed: 0,
            closed: false,
        }
    }

    /// Truncate episodes after `max_steps` steps.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(Error::InvalidConfiguration {
                message: "environment has been closed".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for CliffWalking {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for CliffWalking {
    fn reset(&mut self) -> Result<usize> {
        self.ensure_open()?;
        self.position = START_STATE;
        self.elapsed = 0;
        Ok(self.position)
    }

    fn step(&mut self, action: usize) -> Result<Step> {
        self.ensure_open()?;
        let movement = Move::from_index(action).ok_or(Error::ActionOutOfRange {
            action,
            num_actions: NUM_ACTIONS,
        })?;

        let (row, col) = (self.position / COLS, self.position % COLS);
        let (row, col) = match movement {
            Move::Up => (row.saturating_sub(1), col),
            Move::Right => (row, (col + 1).min(COLS - 1)),
            Move::Down => ((row + 1).min(ROWS - 1), col),
            Move::Left => (row, col.saturating_sub(1)),
        };
        let target = row * COLS + col;

        let reward = if is_cliff(target) {
            self.position = START_STATE;
            CLIFF_REWARD
        } else {
            self.position = target;
            STEP_REWARD
        };

        self.elapsed += 1;
        let terminated = self.position == GOAL_STATE;
        let truncated = !terminated && self.max_steps.is_some_and(|max| self.elapsed >= max);

        Ok(Step {
            next_state: self.position,
            reward,
            terminated,
            truncated,
        })
    }

    fn num_states(&self) -> usize {
        NUM_STATES
    }

    fn num_actions(&self) -> usize {
        NUM_ACTIONS
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}
