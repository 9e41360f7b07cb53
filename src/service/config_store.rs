// SPDX-License-Identifier: MIT OR Apache-2.0

//! The configuration store.
//!
//! A [`ConfigStore`] owns one document tree loaded from a [`DocumentSource`].
//! It is built once at process start and handed by reference to whoever needs
//! configuration; the only way to change its contents is [`ConfigStore::reload`],
//! which replaces the tree wholesale.

use crate::adapters::{InMemoryAdapter, YamlFileAdapter};
use crate::domain::{ConfigError, ConfigKey, ConfigPath, ConfigValue, Result};
use crate::ports::DocumentSource;
use crate::service::interpolation::{has_references, walk, Resolver};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File name searched for when no explicit path is given.
pub const CONFIG_FILE_NAME: &str = "config.yml";

/// Application name used for the per-user configuration directory.
const APP_NAME: &str = "serf";

/// Configuration store over a single document.
///
/// Reads never cache: `${...}` references are resolved on every [`get`](Self::get).
///
/// # Examples
///
/// ```rust
/// use serf::service::ConfigStore;
///
/// # fn main() -> serf::domain::Result<()> {
/// let store: ConfigStore = "root: /srv\ndata: ${root}/data\n".parse()?;
/// assert_eq!(store.get("data")?.as_str(), Some("/srv/data"));
/// assert_eq!(store.get_or("missing", "fallback")?.as_str(), Some("fallback"));
/// # Ok(())
/// # }
/// ```
pub struct ConfigStore {
    source: Box<dyn DocumentSource>,
    document: ConfigValue,
}

impl ConfigStore {
    /// Builds a store from the discovered backing file and loads it.
    ///
    /// See [`ConfigStore::locate`] for the search order.
    ///
    /// # Errors
    ///
    /// `ConfigNotFound` when the selected file does not exist, `ParseError`
    /// when it is not valid YAML.
    pub fn new(explicit_path: Option<&Path>) -> Result<Self> {
        Self::from_file(Self::locate(explicit_path))
    }

    /// Builds a store over a specific YAML file and loads it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_source(Box::new(YamlFileAdapter::new(path)))
    }

    /// Builds a store over any document source and loads it.
    pub fn from_source(source: Box<dyn DocumentSource>) -> Result<Self> {
        let mut store = Self {
            source,
            document: ConfigValue::Null,
        };
        store.reload()?;
        Ok(store)
    }

    /// A store over an empty document; every lookup falls back to its default.
    pub fn empty() -> Self {
        Self {
            source: Box::new(InMemoryAdapter::default()),
            document: ConfigValue::Null,
        }
    }

    /// Picks the backing file.
    ///
    /// Order: the explicit path, `./config.yml`, then `config.yml` in the
    /// per-user configuration directory for `serf`. When none of the
    /// candidates exists the project-root path is returned anyway, so that
    /// loading fails with a clear not-found error.
    pub fn locate(explicit_path: Option<&Path>) -> PathBuf {
        Self::locate_in(explicit_path, &Self::default_candidates())
    }

    /// Like [`locate`](Self::locate) with an explicit candidate list.
    ///
    /// The first candidate doubles as the fallback.
    pub fn locate_in(explicit_path: Option<&Path>, candidates: &[PathBuf]) -> PathBuf {
        if let Some(path) = explicit_path {
            return path.to_path_buf();
        }

        if let Some(found) = candidates.iter().find(|c| c.exists()) {
            tracing::debug!("Using configuration file {}", found.display());
            return found.clone();
        }

        candidates
            .first()
            .cloned()
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Project-root file first, then the per-user configuration directory.
    pub fn default_candidates() -> Vec<PathBuf> {
        let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(dirs) = ProjectDirs::from("", "", APP_NAME) {
            candidates.push(dirs.config_dir().join(CONFIG_FILE_NAME));
        }
        candidates
    }

    /// Re-reads the backing source and replaces the document.
    ///
    /// On failure the previous document is left untouched.
    pub fn reload(&mut self) -> Result<()> {
        self.document = self.source.load()?;
        tracing::debug!("Configuration reloaded from {}", self.source.name());
        Ok(())
    }

    /// The backing file, if the store has one.
    pub fn file_path(&self) -> Option<&Path> {
        self.source.location()
    }

    /// The raw, unresolved document.
    pub fn root(&self) -> &ConfigValue {
        &self.document
    }

    /// Returns `true` if `key` addresses a node in the document.
    pub fn contains(&self, key: impl Into<ConfigKey>) -> bool {
        walk(&self.document, &key.into()).is_ok()
    }

    /// Looks up `key` and resolves `${...}` references in every string under it.
    ///
    /// Numbers, booleans and null come back unchanged.
    ///
    /// # Errors
    ///
    /// `ConfigKeyError` when the path cannot be walked (or a referenced key is
    /// missing), `UnresolvableReference` on cycles or null references.
    pub fn get(&self, key: impl Into<ConfigKey>) -> Result<ConfigValue> {
        let key = key.into();
        let node = walk(&self.document, &key)?;
        Resolver::for_key(&self.document, &key).resolve_value(node)
    }

    /// Like [`get`](Self::get), but returns `default` when the path cannot be walked.
    ///
    /// The default is returned as given, without reference resolution. A key
    /// that exists with a null value yields null, not the default.
    pub fn get_or(
        &self,
        key: impl Into<ConfigKey>,
        default: impl Into<ConfigValue>,
    ) -> Result<ConfigValue> {
        let key = key.into();
        match walk(&self.document, &key) {
            Ok(node) => Resolver::for_key(&self.document, &key).resolve_value(node),
            Err(ConfigError::ConfigKeyError { .. }) => Ok(default.into()),
            Err(e) => Err(e),
        }
    }

    /// Resolves `key` and deserializes it into `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serf::service::ConfigStore;
    ///
    /// # fn main() -> serf::domain::Result<()> {
    /// let store: ConfigStore = "workers: 4\n".parse()?;
    /// let workers: usize = store.get_as("workers")?;
    /// assert_eq!(workers, 4);
    /// # Ok(())
    /// # }
    /// ```
    pub fn get_as<T: DeserializeOwned>(&self, key: impl Into<ConfigKey>) -> Result<T> {
        let key = key.into();
        self.get(&key)?.deserialize(key.as_str())
    }

    /// Looks up `key` as one filesystem path or a list of them.
    ///
    /// # Errors
    ///
    /// `ValueMissing` when the value is null, `TypeConversionError` when it is
    /// neither a string nor a sequence of strings.
    pub fn get_path(&self, key: impl Into<ConfigKey>) -> Result<ConfigPath> {
        let key = key.into();
        let value = self.get(&key)?;
        to_config_path(key.as_str(), value)
    }

    /// Like [`get_path`](Self::get_path) with a default for absent keys.
    pub fn get_path_or(
        &self,
        key: impl Into<ConfigKey>,
        default: impl Into<ConfigValue>,
    ) -> Result<ConfigPath> {
        let key = key.into();
        let value = self.get_or(&key, default)?;
        to_config_path(key.as_str(), value)
    }

    /// Resolves `${...}` references in a free-standing string.
    pub fn expand_variables(&self, value: &str) -> Result<String> {
        if !has_references(value) {
            return Ok(value.to_string());
        }
        Resolver::new(&self.document).resolve_str(value)
    }

    /// Text form of any value.
    ///
    /// Strings are resolved like [`expand_variables`](Self::expand_variables);
    /// every other value is rendered as-is, without resolution.
    pub fn expand_value(&self, value: &ConfigValue) -> Result<String> {
        match value {
            ConfigValue::String(s) => self.expand_variables(s),
            other => Ok(other.to_string()),
        }
    }
}

fn to_config_path(key: &str, value: ConfigValue) -> Result<ConfigPath> {
    match value {
        ConfigValue::Null => Err(ConfigError::ValueMissing {
            key: key.to_string(),
        }),
        ConfigValue::String(s) => Ok(ConfigPath::Single(PathBuf::from(s))),
        ConfigValue::Sequence(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                ConfigValue::String(s) => Ok(PathBuf::from(s)),
                other => Err(ConfigError::conversion(
                    key,
                    "path",
                    format!("element {} is a {}", i, other.kind()),
                )),
            })
            .collect::<Result<Vec<_>>>()
            .map(ConfigPath::Many),
        other => Err(ConfigError::conversion(
            key,
            "path",
            format!("found {}", other.kind()),
        )),
    }
}

impl FromStr for ConfigStore {
    type Err = ConfigError;

    /// Builds a store over in-memory YAML text. Reloading it is a no-op.
    fn from_str(content: &str) -> Result<Self> {
        Self::from_source(Box::new(InMemoryAdapter::from_yaml(content)?))
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigStore")
            .field("source", &self.source.name())
            .field("location", &self.source.location())
            .finish_non_exhaustive()
    }
}
