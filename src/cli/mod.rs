//! Command-line interface.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, CompletionsArgs, ListArgs, RunArgs, StatusArgs};
pub use commands::dispatch;
