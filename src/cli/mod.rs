//! Command-line interface.
//!
//! - [`args`] defines the clap argument structs
//! - [`commands`] holds the command implementations and dispatcher

pub mod args;
pub mod commands;

pub use args::{Cli, Commands};
pub use commands::{Command, CommandDispatcher, CommandResult};
