//! Common test utilities for the cliffwalk test suite.
//!
//! Hand-built environments with fully known dynamics, plus an observer
//! that records every step for later inspection.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use cliffwalk::{
    Error, Result,
    ports::{Environment, Observer, Step},
    types::{EpisodeStats, Transition},
};

pub const LEFT: usize = 0;
pub const RIGHT: usize = 1;

/// Three cells in a row. Start in 0, the episode ends on reaching 2.
/// Moving left from 0 stays in 0. Every step costs -1.
#[derive(Debug, Default)]
pub struct ChainEnv {
    position: usize,
    pub resets: usize,
    pub close_calls: usize,
}

impl ChainEnv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Environment for ChainEnv {
    fn reset(&mut self) -> Result<usize> {
        self.position = 0;
        self.resets += 1;
        Ok(0)
    }

    fn step(&mut self, action: usize) -> Result<Step> {
        self.position = match action {
            LEFT => self.position.saturating_sub(1),
            RIGHT => self.position + 1,
            other => {
                return Err(Error::ActionOutOfRange {
                    action: other,
                    num_actions: 2,
                });
            }
        };
        Ok(Step {
            next_state: self.position,
            reward: -1.0,
            terminated: self.position == 2,
            truncated: false,
        })
    }

    fn num_states(&self) -> usize {
        3
    }

    fn num_actions(&self) -> usize {
        2
    }

    fn close(&mut self) -> Result<()> {
        self.close_calls += 1;
        Ok(())
    }
}

/// Environment whose `step` fails once `fail_after` steps have succeeded.
#[derive(Debug)]
pub struct FailingEnv {
    pub fail_after: usize,
    steps: usize,
    pub close_calls: usize,
}

impl FailingEnv {
    pub fn new(fail_after: usize) -> Self {
        Self {
            fail_after,
            steps: 0,
            close_calls: 0,
        }
    }
}

impl Environment for FailingEnv {
    fn reset(&mut self) -> Result<usize> {
        Ok(0)
    }

    fn step(&mut self, _action: usize) -> Result<Step> {
        if self.steps >= self.fail_after {
            return Err(Error::Io {
                operation: "step simulated environment".to_string(),
                source: std::io::Error::other("backend went away"),
            });
        }
        self.steps += 1;
        Ok(Step {
            next_state: 1,
            reward: 0.0,
            terminated: false,
            truncated: false,
        })
    }

    fn num_states(&self) -> usize {
        2
    }

    fn num_actions(&self) -> usize {
        2
    }

    fn close(&mut self) -> Result<()> {
        self.close_calls += 1;
        Ok(())
    }
}

/// Environment replaying a fixed list of steps, one list per episode.
#[derive(Debug)]
pub struct ScriptedEnv {
    pub num_states: usize,
    pub num_actions: usize,
    pub start: usize,
    pub script: Vec<Step>,
    cursor: usize,
}

impl ScriptedEnv {
    pub fn new(num_states: usize, num_actions: usize, start: usize, script: Vec<Step>) -> Self {
        Self {
            num_states,
            num_actions,
            start,
            script,
            cursor: 0,
        }
    }
}

impl Environment for ScriptedEnv {
    fn reset(&mut self) -> Result<usize> {
        self.cursor = 0;
        Ok(self.start)
    }

    fn step(&mut self, _action: usize) -> Result<Step> {
        let step = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        Ok(step)
    }

    fn num_states(&self) -> usize {
        self.num_states
    }

    fn num_actions(&self) -> usize {
        self.num_actions
    }
}

/// One recorded `on_step` call
#[derive(Debug, Clone, Copy)]
pub struct RecordedStep {
    pub episode: usize,
    pub step_num: usize,
    pub transition: Transition,
    pub updated_value: f64,
}

/// Observer that keeps every step and episode in shared storage.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub steps: Arc<Mutex<Vec<RecordedStep>>>,
    pub episodes: Arc<Mutex<Vec<EpisodeStats>>>,
    pub training_ended: Arc<Mutex<bool>>,
}

impl Recorder {
    pub fn steps(&self) -> Vec<RecordedStep> {
        self.steps.lock().unwrap().clone()
    }

    pub fn episodes(&self) -> Vec<EpisodeStats> {
        self.episodes.lock().unwrap().clone()
    }

    pub fn training_ended(&self) -> bool {
        *self.training_ended.lock().unwrap()
    }
}

impl Observer for Recorder {
    fn on_step(
        &mut self,
        episode: usize,
        step_num: usize,
        transition: &Transition,
        updated_value: f64,
    ) -> Result<()> {
        self.steps.lock().unwrap().push(RecordedStep {
            episode,
            step_num,
            transition: *transition,
            updated_value,
        });
        Ok(())
    }

    fn on_episode_end(&mut self, stats: &EpisodeStats) -> Result<()> {
        self.episodes.lock().unwrap().push(*stats);
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        *self.training_ended.lock().unwrap() = true;
        Ok(())
    }
}
