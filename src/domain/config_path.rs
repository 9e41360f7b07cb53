// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filesystem path values read from the configuration.

use std::path::{Path, PathBuf};

/// The result of a path-typed lookup.
///
/// A string node becomes one path; a sequence of strings becomes a list of
/// paths with the same length and order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigPath {
    /// A single path.
    Single(PathBuf),
    /// A list of paths.
    Many(Vec<PathBuf>),
}

impl ConfigPath {
    /// Returns the path if this is a single value.
    pub fn as_single(&self) -> Option<&Path> {
        match self {
            ConfigPath::Single(path) => Some(path),
            ConfigPath::Many(_) => None,
        }
    }

    /// All paths, in order. A single value yields a one-element vector.
    pub fn into_vec(self) -> Vec<PathBuf> {
        match self {
            ConfigPath::Single(path) => vec![path],
            ConfigPath::Many(paths) => paths,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single() {
        let path = ConfigPath::Single(PathBuf::from("data/in"));
        assert_eq!(path.as_single(), Some(Path::new("data/in")));
        assert_eq!(path.into_vec(), vec![PathBuf::from("data/in")]);
    }

    #[test]
    fn test_many() {
        let paths = ConfigPath::Many(vec![PathBuf::from("a"), PathBuf::from("b")]);
        assert_eq!(paths.as_single(), None);
        assert_eq!(paths.into_vec().len(), 2);
    }
}
