//! banwatch CLI library
//!
//! Command implementations and output helpers for the `banwatch` binary.

pub mod commands;
pub mod output;
pub mod sink;
