//! Q-learning and SARSA temporal difference control
//!
//! Both algorithms share the same dense Q-table and the same epsilon-greedy
//! behaviour policy. They differ only in the bootstrap term of the update:
//!
//! | Aspect | Q-learning | SARSA |
//! |--------|------------|-------|
//! | Policy | Off-policy (learns Q*) | On-policy (learns Q^π) |
//! | Update | Uses max_a Q(s',a') | Uses Q(s',a') for the sampled a' |
//! | Action selection | Every step, before stepping | Next action picked before the update |
//!
//! ## Usage Example
//!
//! ```
//! use cliffwalk::q_learning::{AgentConfig, QLearningAgent, SarsaAgent};
//!
//! let config = AgentConfig::default().with_seed(42);
//!
//! // 48 states x 4 actions, as in CliffWalking
//! let q_agent = QLearningAgent::new(config.clone(), 48, 4)?;
//! let sarsa_agent = SarsaAgent::new(config, 48, 4)?;
//! # Ok::<(), cliffwalk::Error>(())
//! ```

pub mod agent;
pub mod config;
pub mod policy;
pub mod q_table;

pub use agent::{QLearningAgent, SarsaAgent, TdAlgorithm};
pub use config::AgentConfig;
pub use policy::epsilon_greedy;
pub use q_table::QTable;
