//! CLI infrastructure for the cliffwalk toolkit
//!
//! This module provides the command-line interface for training tabular
//! learners, evaluating saved tables and exporting them.

pub mod commands;
pub mod output;
