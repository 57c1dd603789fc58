//! Tabular temporal-difference control on the CliffWalking grid world
//!
//! This crate provides:
//! - A dense Q-table with the Q-learning (off-policy) and SARSA (on-policy)
//!   update rules
//! - An epsilon-greedy policy over the table
//! - A training pipeline driving episodes against any `Environment`
//! - A CliffWalking environment adapter and MessagePack table persistence
//! - A command-line front end for training, evaluation and export

pub mod adapters;
pub mod cli;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod types;

pub use error::{Error, Result};
pub use q_learning::{AgentConfig, QLearningAgent, QTable, SarsaAgent, TdAlgorithm};
