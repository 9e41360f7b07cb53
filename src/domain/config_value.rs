// SPDX-License-Identifier: MIT OR Apache-2.0

//! The configuration document tree.
//!
//! [`ConfigValue`] is a tagged union over everything a structured
//! configuration file can hold. Traversal and interpolation match on it
//! exhaustively instead of probing runtime types.

use crate::domain::errors::{ConfigError, Result};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fmt;

/// A node in the configuration document.
///
/// # Examples
///
/// ```
/// use serf::domain::config_value::ConfigValue;
///
/// let value = ConfigValue::from("logs");
/// assert_eq!(value.as_str(), Some("logs"));
/// assert_eq!(value.to_string(), "logs");
///
/// let port = ConfigValue::from(8080i64);
/// assert_eq!(port.as_i64("server.port").unwrap(), 8080);
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum ConfigValue {
    /// An explicit null or an empty node.
    #[default]
    Null,
    /// A boolean scalar.
    Bool(bool),
    /// An integer scalar.
    Integer(i64),
    /// A floating point scalar.
    Float(f64),
    /// A string scalar, possibly containing `${...}` references.
    String(String),
    /// An ordered sequence of nodes.
    Sequence(Vec<ConfigValue>),
    /// A mapping from string keys to nodes.
    Mapping(BTreeMap<String, ConfigValue>),
}

impl ConfigValue {
    /// Human readable name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::Float(_) => "float",
            ConfigValue::String(_) => "string",
            ConfigValue::Sequence(_) => "sequence",
            ConfigValue::Mapping(_) => "mapping",
        }
    }

    /// Returns `true` for [`ConfigValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    /// Returns the string contents if this is a string node.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements if this is a sequence node.
    pub fn as_sequence(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries if this is a mapping node.
    pub fn as_mapping(&self) -> Option<&BTreeMap<String, ConfigValue>> {
        match self {
            ConfigValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Converts the value to a boolean.
    ///
    /// Boolean nodes convert directly. String nodes recognize the following
    /// values (case-insensitive):
    /// - `true`: "true", "yes", "1", "on"
    /// - `false`: "false", "no", "0", "off"
    pub fn as_bool(&self, key: &str) -> Result<bool> {
        match self {
            ConfigValue::Bool(b) => Ok(*b),
            ConfigValue::String(s) => match s.to_lowercase().as_str() {
                "true" | "yes" | "1" | "on" => Ok(true),
                "false" | "no" | "0" | "off" => Ok(false),
                _ => Err(ConfigError::conversion(
                    key,
                    "boolean",
                    format!("'{}' is not a boolean", s),
                )),
            },
            other => Err(ConfigError::conversion(
                key,
                "boolean",
                format!("found {}", other.kind()),
            )),
        }
    }

    /// Converts the value to an `i64`.
    ///
    /// String nodes holding a decimal integer are accepted.
    pub fn as_i64(&self, key: &str) -> Result<i64> {
        match self {
            ConfigValue::Integer(n) => Ok(*n),
            ConfigValue::String(s) => {
                s.trim()
                    .parse::<i64>()
                    .map_err(|e| ConfigError::TypeConversionError {
                        key: key.to_string(),
                        target_type: "integer".to_string(),
                        source: Box::new(e),
                    })
            }
            other => Err(ConfigError::conversion(
                key,
                "integer",
                format!("found {}", other.kind()),
            )),
        }
    }

    /// Converts the value to an `f64`. Integers widen.
    pub fn as_f64(&self, key: &str) -> Result<f64> {
        match self {
            ConfigValue::Float(f) => Ok(*f),
            ConfigValue::Integer(n) => Ok(*n as f64),
            ConfigValue::String(s) => {
                s.trim()
                    .parse::<f64>()
                    .map_err(|e| ConfigError::TypeConversionError {
                        key: key.to_string(),
                        target_type: "float".to_string(),
                        source: Box::new(e),
                    })
            }
            other => Err(ConfigError::conversion(
                key,
                "float",
                format!("found {}", other.kind()),
            )),
        }
    }

    /// Deserializes the node into any `DeserializeOwned` type.
    ///
    /// # Examples
    ///
    /// ```
    /// use serf::domain::config_value::ConfigValue;
    ///
    /// let value = ConfigValue::Sequence(vec![ConfigValue::from(1i64), ConfigValue::from(2i64)]);
    /// let numbers: Vec<u16> = value.deserialize("ports").unwrap();
    /// assert_eq!(numbers, vec![1, 2]);
    /// ```
    pub fn deserialize<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let yaml = serde_yaml::Value::from(self.clone());
        serde_yaml::from_value(yaml).map_err(|e| ConfigError::TypeConversionError {
            key: key.to_string(),
            target_type: std::any::type_name::<T>().to_string(),
            source: Box::new(e),
        })
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(n: i64) -> Self {
        ConfigValue::Integer(n)
    }
}

impl From<f64> for ConfigValue {
    fn from(f: f64) -> Self {
        ConfigValue::Float(f)
    }
}

impl<T: Into<ConfigValue>> From<Vec<T>> for ConfigValue {
    fn from(items: Vec<T>) -> Self {
        ConfigValue::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl From<serde_yaml::Value> for ConfigValue {
    fn from(value: serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Null => ConfigValue::Null,
            serde_yaml::Value::Bool(b) => ConfigValue::Bool(b),
            serde_yaml::Value::Number(n) => match n.as_i64() {
                Some(i) => ConfigValue::Integer(i),
                // u64 beyond i64::MAX and real floats both land here
                None => ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_yaml::Value::String(s) => ConfigValue::String(s),
            serde_yaml::Value::Sequence(seq) => {
                ConfigValue::Sequence(seq.into_iter().map(ConfigValue::from).collect())
            }
            serde_yaml::Value::Mapping(map) => ConfigValue::Mapping(
                map.into_iter()
                    .map(|(k, v)| (yaml_key_to_string(k), ConfigValue::from(v)))
                    .collect(),
            ),
            serde_yaml::Value::Tagged(tagged) => ConfigValue::from(tagged.value),
        }
    }
}

impl From<ConfigValue> for serde_yaml::Value {
    fn from(value: ConfigValue) -> Self {
        match value {
            ConfigValue::Null => serde_yaml::Value::Null,
            ConfigValue::Bool(b) => serde_yaml::Value::Bool(b),
            ConfigValue::Integer(n) => serde_yaml::Value::Number(n.into()),
            ConfigValue::Float(f) => serde_yaml::Value::Number(f.into()),
            ConfigValue::String(s) => serde_yaml::Value::String(s),
            ConfigValue::Sequence(items) => {
                serde_yaml::Value::Sequence(items.into_iter().map(Into::into).collect())
            }
            ConfigValue::Mapping(map) => serde_yaml::Value::Mapping(
                map.into_iter()
                    .map(|(k, v)| (serde_yaml::Value::String(k), v.into()))
                    .collect(),
            ),
        }
    }
}

/// Non-string mapping keys (`1: x`, `true: y`) are addressed by their text.
fn yaml_key_to_string(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Null => "null".to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        other => ConfigValue::from(other).to_string(),
    }
}

/// Text used when a value is substituted into a string.
///
/// Scalars render as YAML plain scalars; containers render in flow style.
impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Null => write!(f, "null"),
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::Integer(n) => write!(f, "{}", n),
            ConfigValue::Float(x) if x.is_nan() => write!(f, ".nan"),
            ConfigValue::Float(x) if x.is_infinite() => {
                write!(f, "{}", if *x > 0.0 { ".inf" } else { "-.inf" })
            }
            // `{:?}` keeps the `.0` on whole numbers
            ConfigValue::Float(x) => write!(f, "{:?}", x),
            ConfigValue::String(s) => write!(f, "{}", s),
            ConfigValue::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            ConfigValue::Mapping(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}
