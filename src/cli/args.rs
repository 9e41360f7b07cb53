// SPDX-License-Identifier: MIT OR Apache-2.0

//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

/// SERF: Semantic Entity Resolution Framework CLI.
#[derive(Parser, Debug)]
#[command(name = "serf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (default: ./config.yml, then the user config directory)
    #[arg(short, long, global = true, env = "SERF_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[allow(missing_docs)]
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Perform semantic blocking on input data
    Block(StageArgs),

    /// Align schemas, match entities, and merge within blocks
    #[command(name = "match")]
    AlignMatchMerge(StageArgs),

    /// Resolve edges after node merging
    #[command(name = "edges")]
    EdgeResolve(StageArgs),

    /// Inspect the loaded configuration
    Config {
        #[allow(missing_docs)]
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Options shared by every resolution stage.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct StageArgs {
    /// Input data file or directory
    #[arg(short, long, value_parser = existing_path, value_hint = ValueHint::AnyPath)]
    pub input: PathBuf,

    /// Output directory for results
    #[arg(short, long, value_hint = ValueHint::DirPath)]
    pub output: PathBuf,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the resolved value of a dotted key
    Get {
        /// Key path, e.g. logs.file.path
        key: String,
    },

    /// Print the configuration file in use
    Path,
}

fn existing_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("path '{}' does not exist", value))
    }
}
