// SPDX-License-Identifier: MIT OR Apache-2.0

//! SERF: Semantic Entity Resolution Framework.
//!
//! This crate provides the configuration, logging and command-line plumbing of
//! the framework. The resolution stages themselves (blocking, matching and
//! merging, edge resolution) are exposed as commands that currently only
//! report what they were asked to do.
//!
//! # Architecture
//!
//! The configuration side follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types (`ConfigKey`, `ConfigValue`, `ConfigPath`, errors)
//! - **Ports**: Trait definitions (`ConfigParser`, `DocumentSource`)
//! - **Adapters**: YAML parsing, file-backed and in-memory document sources
//! - **Service**: `ConfigStore`, with `${key.path}` interpolation
//!
//! On top of that sit [`logging`] (file + console sinks configured from the
//! store) and, behind the `cli` feature, the `serf` command surface.
//!
//! # Feature Flags
//!
//! - `cli`: Enable the command-line surface and the `serf` binary (default)
//!
//! # Quick Start
//!
//! ```rust
//! use serf::prelude::*;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let store: ConfigStore = "data: /srv\ninput: ${data}/records.jsonl\n".parse()?;
//! let input = store.get_path("input")?;
//! assert_eq!(input.as_single(), Some(std::path::Path::new("/srv/records.jsonl")));
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
#[cfg(feature = "cli")]
pub mod cli;
pub mod domain;
pub mod logging;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::{InMemoryAdapter, YamlFileAdapter, YamlParser};
    pub use crate::domain::{ConfigError, ConfigKey, ConfigPath, ConfigValue, Result};
    pub use crate::logging::{get_logger, setup_logging, Logger};
    pub use crate::ports::{ConfigParser, DocumentSource};
    pub use crate::service::ConfigStore;
}
