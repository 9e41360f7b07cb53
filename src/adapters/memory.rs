// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory document source.
//!
//! Holds a fixed document with no backing file. Reloading it yields the same
//! tree every time.

use crate::adapters::YamlParser;
use crate::domain::{ConfigValue, Result};
use crate::ports::{ConfigParser, DocumentSource};
use std::path::Path;

/// Document source holding a fixed [`ConfigValue`].
///
/// # Examples
///
/// ```rust
/// use serf::adapters::InMemoryAdapter;
/// use serf::ports::DocumentSource;
///
/// let adapter = InMemoryAdapter::from_yaml("a: 1").unwrap();
/// assert!(adapter.location().is_none());
/// assert!(adapter.load().unwrap().as_mapping().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryAdapter {
    document: ConfigValue,
}

impl InMemoryAdapter {
    /// Wraps an already built document.
    pub fn new(document: ConfigValue) -> Self {
        Self { document }
    }

    /// Parses YAML text once and keeps the resulting tree.
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(Self::new(YamlParser::new().parse(content)?))
    }
}

impl DocumentSource for InMemoryAdapter {
    fn name(&self) -> &str {
        "in-memory"
    }

    fn location(&self) -> Option<&Path> {
        None
    }

    fn load(&self) -> Result<ConfigValue> {
        Ok(self.document.clone())
    }
}
