// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing the core configuration types.
//!
//! These types know nothing about files, parsers or the command line. They
//! define the document tree, the key paths that address it, and the errors
//! that can come out of reading it.

pub mod config_key;
pub mod config_path;
pub mod config_value;
pub mod errors;

// Re-export commonly used types
pub use config_key::ConfigKey;
pub use config_path::ConfigPath;
pub use config_value::ConfigValue;
pub use errors::{ConfigError, Result};
