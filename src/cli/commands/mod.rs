//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`bmt new`, `bmt preview`)
//! - Settings loaded once through one [`ConfigStore`](crate::config::ConfigStore)
//! - A missing setting mapped to the same exit code everywhere

pub mod build;
pub mod clean;
pub mod completions;
pub mod config;
pub mod dispatcher;
pub mod new;
pub mod open;
pub mod preview;
pub mod push;
pub mod set;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, EXIT_NOT_CONFIGURED};
