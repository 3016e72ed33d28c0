//! Subcommand implementations.

pub mod process;
pub mod scan;
