// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dotted key paths addressing nodes in a configuration document.
//!
//! A [`ConfigKey`] such as `logs.file.path` is a query parameter, not a stored
//! entity: it is split on `.` and walked one mapping level per segment.

use std::fmt;

/// A dot-separated path into the configuration document.
///
/// # Examples
///
/// ```
/// use serf::domain::config_key::ConfigKey;
///
/// let key = ConfigKey::from("logs.file.path");
/// assert_eq!(key.segments().collect::<Vec<_>>(), vec!["logs", "file", "path"]);
/// assert_eq!(key.prefix(2), "logs.file");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Creates a new `ConfigKey` from a `String`.
    pub fn new(key: String) -> Self {
        ConfigKey(key)
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `ConfigKey` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Iterates over the path segments.
    ///
    /// Splitting is purely textual, so an empty key yields one empty segment
    /// and `a..b` yields an empty middle segment.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Number of segments in the path.
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// The first `n` segments joined back together.
    pub fn prefix(&self, n: usize) -> String {
        self.segments().take(n).collect::<Vec<_>>().join(".")
    }
}

impl From<String> for ConfigKey {
    fn from(s: String) -> Self {
        ConfigKey(s)
    }
}

impl From<&str> for ConfigKey {
    fn from(s: &str) -> Self {
        ConfigKey(s.to_string())
    }
}

impl From<&ConfigKey> for ConfigKey {
    fn from(key: &ConfigKey) -> Self {
        key.clone()
    }
}

impl From<ConfigKey> for String {
    fn from(key: ConfigKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_config_key_from_str() {
        let key = ConfigKey::from("logs.file.path");
        assert_eq!(key.as_str(), "logs.file.path");
    }

    #[test]
    fn test_segments() {
        let key = ConfigKey::from("a.b.c");
        assert_eq!(key.segments().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(key.depth(), 3);
    }

    #[test]
    fn test_single_segment() {
        let key = ConfigKey::from("logs");
        assert_eq!(key.segments().collect::<Vec<_>>(), vec!["logs"]);
    }

    #[test]
    fn test_empty_key_has_one_empty_segment() {
        let key = ConfigKey::from("");
        assert_eq!(key.segments().collect::<Vec<_>>(), vec![""]);
        assert_eq!(key.depth(), 1);
    }

    #[test]
    fn test_prefix() {
        let key = ConfigKey::from("logs.file.path");
        assert_eq!(key.prefix(0), "");
        assert_eq!(key.prefix(1), "logs");
        assert_eq!(key.prefix(3), "logs.file.path");
        assert_eq!(key.prefix(10), "logs.file.path");
    }

    #[test]
    fn test_display_and_into_string() {
        let key = ConfigKey::from("a.b");
        assert_eq!(format!("{}", key), "a.b");
        assert_eq!(key.into_string(), "a.b");
    }

    #[test]
    fn test_hash() {
        let mut map = HashMap::new();
        map.insert(ConfigKey::from("a.b"), 1);
        assert_eq!(map.get(&ConfigKey::from("a.b")), Some(&1));
        assert_eq!(map.get(&ConfigKey::from("a.c")), None);
    }
}
