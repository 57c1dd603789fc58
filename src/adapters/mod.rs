//! Adapters implementing the ports.
//!
//! Concrete environments and storage backends live here. The learning core
//! only ever sees them through the traits in [`crate::ports`].

pub mod cliff_walking;
pub mod in_memory_repository;
pub mod msgpack_repository;

pub use cliff_walking::CliffWalking;
pub use in_memory_repository::InMemoryRepository;
pub use msgpack_repository::MsgPackRepository;
