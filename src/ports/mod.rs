//! Ports (trait boundaries) for external dependencies.
//!
//! This module defines the interfaces between the learning core and the
//! outside world. The environment simulation, table storage and training
//! observation are all owned by adapters implementing these traits.

pub mod environment;
pub mod learner;
pub mod observer;
pub mod repository;

pub use environment::{Environment, Step};
pub use learner::Learner;
pub use observer::Observer;
pub use repository::QTableRepository;
