// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document source trait definition.
//!
//! A `DocumentSource` is where the configuration store gets its tree from.
//! Every reload asks the source for a complete, fresh document; the store
//! never merges an old tree with a new one.

use crate::domain::{ConfigValue, Result};
use std::path::Path;

/// A trait for the backing source of a configuration document.
///
/// # Examples
///
/// ```rust
/// use serf::ports::DocumentSource;
/// use serf::domain::{ConfigValue, Result};
/// use std::path::Path;
///
/// struct Fixed;
///
/// impl DocumentSource for Fixed {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     fn location(&self) -> Option<&Path> {
///         None
///     }
///
///     fn load(&self) -> Result<ConfigValue> {
///         Ok(ConfigValue::Null)
///     }
/// }
///
/// assert!(Fixed.load().unwrap().is_null());
/// ```
pub trait DocumentSource: Send + Sync {
    /// Short name of the source, used in diagnostics.
    fn name(&self) -> &str;

    /// Filesystem location backing the source, if any.
    fn location(&self) -> Option<&Path>;

    /// Reads the whole document.
    ///
    /// # Errors
    ///
    /// File-backed sources return `ConfigNotFound` when the file is absent and
    /// `ParseError` when its content is not valid structured data.
    fn load(&self) -> Result<ConfigValue>;
}
