//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the datatables binary.

mod commands;
mod query;

pub use commands::{Cli, Commands};
pub use query::{handle_describe_command, handle_query_command, open_source, read_params};
