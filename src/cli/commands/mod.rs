//! Subcommands of the `cliffwalk` binary

pub mod evaluate;
pub mod export;
pub mod train;
