// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command dispatch.
//!
//! The resolution stages do not transform any data yet: each one logs that it
//! started and echoes a status line.

use std::path::Path;

use crate::cli::args::{Cli, Commands, ConfigCommands, StageArgs};
use crate::cli::error::{CliError, CliResult};
use crate::domain::{ConfigError, ConfigValue};
use crate::logging::{get_logger, setup_logging, Logger};
use crate::service::ConfigStore;

/// Name of the logger the stages report through.
pub const LOGGER_NAME: &str = "serf::cli";

/// Runs the parsed command line.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let store = load_store(cli.config.as_deref())?;

    match &cli.command {
        Commands::Config { command } => execute_config_command(&store, command),
        Commands::Block(args) => {
            let logger = stage_logger(&store)?;
            block(&logger, args)
        }
        Commands::AlignMatchMerge(args) => {
            let logger = stage_logger(&store)?;
            align_match_merge(&logger, args)
        }
        Commands::EdgeResolve(args) => {
            let logger = stage_logger(&store)?;
            edge_resolve(&logger, args)
        }
    }
}

/// Loads the store for this invocation.
///
/// An explicit path must exist. Without one, a missing file means running on
/// an empty document so every setting takes its default.
pub fn load_store(explicit_path: Option<&Path>) -> CliResult<ConfigStore> {
    match ConfigStore::new(explicit_path) {
        Ok(store) => Ok(store),
        Err(ConfigError::ConfigNotFound { path }) if explicit_path.is_none() => {
            tracing::debug!(
                "No configuration file at {}; using defaults",
                path.display()
            );
            Ok(ConfigStore::empty())
        }
        Err(e) => Err(e.into()),
    }
}

fn stage_logger(store: &ConfigStore) -> CliResult<Logger> {
    setup_logging(store)?;
    Ok(get_logger(Some(LOGGER_NAME)))
}

/// Perform semantic blocking on input data.
pub fn block(logger: &Logger, args: &StageArgs) -> CliResult<()> {
    logger.info(format_args!(
        "Starting blocking with input: {}, output: {}",
        args.input.display(),
        args.output.display()
    ));
    println!(
        "Blocking data from {} to {}",
        args.input.display(),
        args.output.display()
    );
    Ok(())
}

/// Align schemas, match entities, and merge within blocks.
pub fn align_match_merge(logger: &Logger, args: &StageArgs) -> CliResult<()> {
    logger.info(format_args!(
        "Starting align/match/merge with input: {}, output: {}",
        args.input.display(),
        args.output.display()
    ));
    println!(
        "Aligning, matching, and merging entities from {} to {}",
        args.input.display(),
        args.output.display()
    );
    Ok(())
}

/// Resolve edges after node merging.
pub fn edge_resolve(logger: &Logger, args: &StageArgs) -> CliResult<()> {
    logger.info(format_args!(
        "Starting edge resolution with input: {}, output: {}",
        args.input.display(),
        args.output.display()
    ));
    println!(
        "Resolving edges from {} to {}",
        args.input.display(),
        args.output.display()
    );
    Ok(())
}

fn execute_config_command(store: &ConfigStore, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Get { key } => {
            let value = store.get(key.as_str())?;
            print!("{}", render_value(&value)?);
        }
        ConfigCommands::Path => match store.file_path() {
            Some(path) => println!("{}", path.display()),
            None => println!("{} (not found)", ConfigStore::locate(None).display()),
        },
    }
    Ok(())
}

/// Scalars print as plain text, containers as YAML.
fn render_value(value: &ConfigValue) -> CliResult<String> {
    match value {
        ConfigValue::Sequence(_) | ConfigValue::Mapping(_) => {
            serde_yaml::to_string(&serde_yaml::Value::from(value.clone()))
                .map_err(|e| CliError::Output(e.to_string()))
        }
        scalar => Ok(format!("{}\n", scalar)),
    }
}
