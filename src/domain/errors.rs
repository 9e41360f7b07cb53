// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration store.
//!
//! Every failure the store can surface to a caller is one variant of
//! [`ConfigError`]. None of them are retried internally.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for configuration operations.
///
/// # Examples
///
/// ```
/// use serf::domain::errors::ConfigError;
///
/// fn lookup() -> Result<String, ConfigError> {
///     Err(ConfigError::ValueMissing {
///         key: "data.input".to_string(),
///     })
/// }
///
/// assert!(lookup().is_err());
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The backing configuration file does not exist.
    #[error("Configuration file not found: {}", .path.display())]
    ConfigNotFound {
        /// The path that was attempted
        path: PathBuf,
    },

    /// The backing file exists but is not valid structured data.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A key path could not be walked to the end and no default was supplied.
    #[error("Configuration key '{key}' not found at '{reached}': {reason}{}", format_available(.available))]
    ConfigKeyError {
        /// The full key path that was requested
        key: String,
        /// The prefix of the key path at which traversal stopped
        reached: String,
        /// Why traversal stopped
        reason: String,
        /// Keys available at the point traversal stopped
        available: Vec<String>,
    },

    /// A path-valued key resolved to null.
    #[error("Configuration value not found: {key}")]
    ValueMissing {
        /// The key that resolved to null
        key: String,
    },

    /// A `${...}` reference could not be resolved to a final value.
    #[error("Unresolvable reference '${{{reference}}}' ({reason}); chain: {}", .chain.join(" -> "))]
    UnresolvableReference {
        /// The reference being resolved when resolution gave up
        reference: String,
        /// The keys being resolved at that point, outermost first
        chain: Vec<String>,
        /// Why resolution gave up
        reason: String,
    },

    /// Failed to convert a configuration value to the requested type.
    #[error(
        "Failed to convert configuration value for key '{key}' to type {target_type}: {source}"
    )]
    TypeConversionError {
        /// The key being converted
        key: String,
        /// The target type name
        target_type: String,
        /// The underlying conversion error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An error occurred while reading from a configuration source.
    #[error("Configuration source '{source_name}' error: {message}")]
    SourceError {
        /// The name of the source that encountered the error
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred outside of reading the backing file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

fn format_available(available: &[String]) -> String {
    if available.is_empty() {
        String::new()
    } else {
        format!(". Available keys: [{}]", available.join(", "))
    }
}

impl ConfigError {
    /// Creates a `TypeConversionError` from a plain message.
    pub fn conversion(
        key: impl Into<String>,
        target_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let message: String = message.into();
        ConfigError::TypeConversionError {
            key: key.into(),
            target_type: target_type.into(),
            source: message.into(),
        }
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
