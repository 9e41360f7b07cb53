// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration parser trait definition.
//!
//! This module defines the `ConfigParser` trait, which turns the raw text of a
//! backing file into a [`ConfigValue`] document tree.

use crate::domain::{ConfigValue, Result};

/// A trait for parsing configuration content.
///
/// Unlike a flat key/value parser, implementations keep the nesting of the
/// source format: mappings stay mappings and sequences stay sequences, so the
/// store can walk dotted key paths over the tree and report which keys were
/// available when a lookup fails.
///
/// # Examples
///
/// ```rust
/// use serf::ports::ConfigParser;
/// use serf::domain::{ConfigValue, Result};
///
/// struct LineParser;
///
/// impl ConfigParser for LineParser {
///     fn parse(&self, content: &str) -> Result<ConfigValue> {
///         Ok(ConfigValue::from(content.lines().collect::<Vec<_>>()))
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["txt"]
///     }
/// }
///
/// let value = LineParser.parse("a\nb").unwrap();
/// assert_eq!(value.as_sequence().unwrap().len(), 2);
/// ```
pub trait ConfigParser {
    /// Parses configuration content into a document tree.
    ///
    /// Empty content parses to [`ConfigValue::Null`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`](crate::domain::ConfigError::ParseError)
    /// when the content is not valid in the parser's format.
    fn parse(&self, content: &str) -> Result<ConfigValue>;

    /// Returns the file extensions supported by this parser, without the dot.
    fn supported_extensions(&self) -> &[&str];

    /// Returns `true` if the parser claims the given extension.
    fn supports_extension(&self, extension: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    struct KeyValueParser;

    impl ConfigParser for KeyValueParser {
        fn parse(&self, content: &str) -> Result<ConfigValue> {
            let map: BTreeMap<String, ConfigValue> = content
                .lines()
                .filter_map(|line| line.split_once('='))
                .map(|(k, v)| (k.trim().to_string(), ConfigValue::from(v.trim())))
                .collect();
            Ok(ConfigValue::Mapping(map))
        }

        fn supported_extensions(&self) -> &[&str] {
            &["kv", "properties"]
        }
    }

    #[test]
    fn test_parser_parse() {
        let value = KeyValueParser.parse("a = 1\nb = two").unwrap();
        let map = value.as_mapping().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["b"], ConfigValue::from("two"));
    }

    #[test]
    fn test_supports_extension_is_case_insensitive() {
        assert!(KeyValueParser.supports_extension("KV"));
        assert!(KeyValueParser.supports_extension("properties"));
        assert!(!KeyValueParser.supports_extension("yml"));
    }
}
