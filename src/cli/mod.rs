// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command surface: argument definitions and dispatch.

pub mod args;
pub mod commands;
pub mod error;
pub mod exitcode;

pub use args::{Cli, Commands, ConfigCommands, StageArgs};
pub use commands::execute_command;
pub use error::{CliError, CliResult};
