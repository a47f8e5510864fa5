//! Command implementations.

pub mod check;
pub mod dispatcher;
pub mod load;
pub mod provide;
pub mod render;
pub mod resolve;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, Workspace};
