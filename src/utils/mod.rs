//! Utility functions and helpers.
pub mod cli;
