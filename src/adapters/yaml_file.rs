// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML file document source adapter.
//!
//! This module provides the parser for YAML content and the adapter that
//! reads a backing `config.yml` from disk.

use crate::domain::{ConfigError, ConfigValue, Result};
use crate::ports::{ConfigParser, DocumentSource};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Maximum allowed file size for YAML configuration files (10MB)
const MAX_YAML_FILE_SIZE: u64 = 10 * 1024 * 1024;

const SOURCE_NAME: &str = "yaml-file";

/// YAML parser implementation.
///
/// Keeps the full tree of the document; nothing is flattened.
///
/// # Examples
///
/// ```rust
/// use serf::adapters::YamlParser;
/// use serf::ports::ConfigParser;
///
/// let parser = YamlParser::new();
/// let doc = parser.parse("logs:\n  file:\n    path: /var/log/serf").unwrap();
/// let logs = doc.as_mapping().unwrap()["logs"].as_mapping().unwrap();
/// assert!(logs.contains_key("file"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct YamlParser;

impl YamlParser {
    /// Creates a new YAML parser.
    pub fn new() -> Self {
        YamlParser
    }
}

impl ConfigParser for YamlParser {
    fn parse(&self, content: &str) -> Result<ConfigValue> {
        if content.trim().is_empty() {
            return Ok(ConfigValue::Null);
        }

        let value: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
                message: format!("Failed to parse YAML: {}", e),
                source: Some(Box::new(e)),
            })?;

        Ok(ConfigValue::from(value))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}

/// Document source backed by a YAML file.
///
/// Construction never touches the filesystem; the file is read on every
/// [`load`](DocumentSource::load), so a missing file surfaces as
/// [`ConfigError::ConfigNotFound`] at load time with the attempted path.
///
/// # Examples
///
/// ```rust,no_run
/// use serf::adapters::YamlFileAdapter;
/// use serf::ports::DocumentSource;
///
/// let adapter = YamlFileAdapter::new("config.yml");
/// let document = adapter.load().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct YamlFileAdapter {
    /// Path to the YAML file
    file_path: PathBuf,
    /// YAML parser
    parser: YamlParser,
}

impl YamlFileAdapter {
    /// Creates an adapter for the given file path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            file_path: path.as_ref().to_path_buf(),
            parser: YamlParser::new(),
        }
    }

    /// Returns the path to the configuration file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn read_content(&self) -> Result<String> {
        let metadata = fs::metadata(&self.file_path).map_err(|e| self.io_error(e))?;

        if metadata.len() > MAX_YAML_FILE_SIZE {
            return Err(ConfigError::SourceError {
                source_name: SOURCE_NAME.to_string(),
                message: format!(
                    "Configuration file too large: {} bytes (max {} bytes)",
                    metadata.len(),
                    MAX_YAML_FILE_SIZE
                ),
                source: None,
            });
        }

        fs::read_to_string(&self.file_path).map_err(|e| self.io_error(e))
    }

    fn io_error(&self, e: std::io::Error) -> ConfigError {
        if e.kind() == ErrorKind::NotFound {
            return ConfigError::ConfigNotFound {
                path: self.file_path.clone(),
            };
        }
        ConfigError::SourceError {
            source_name: SOURCE_NAME.to_string(),
            message: format!(
                "Failed to read configuration file: {}",
                self.file_path.display()
            ),
            source: Some(Box::new(e)),
        }
    }
}

impl DocumentSource for YamlFileAdapter {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn location(&self) -> Option<&Path> {
        Some(&self.file_path)
    }

    fn load(&self) -> Result<ConfigValue> {
        let content = self.read_content()?;
        let document = self.parser.parse(&content)?;
        tracing::debug!(
            "Loaded configuration document from {}",
            self.file_path.display()
        );
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_yaml_parser_nested() {
        let parser = YamlParser::new();
        let yaml = r#"
database:
  host: localhost
  port: 5432
"#;
        let doc = parser.parse(yaml).unwrap();
        let db = doc.as_mapping().unwrap()["database"].as_mapping().unwrap();

        assert_eq!(db["host"], ConfigValue::from("localhost"));
        assert_eq!(db["port"], ConfigValue::Integer(5432));
    }

    #[test]
    fn test_yaml_parser_keeps_sequences() {
        let parser = YamlParser::new();
        let doc = parser.parse("servers:\n  - one\n  - two\n").unwrap();
        let servers = doc.as_mapping().unwrap()["servers"].as_sequence().unwrap();

        assert_eq!(servers, &[ConfigValue::from("one"), ConfigValue::from("two")]);
    }

    #[test]
    fn test_yaml_parser_empty_content() {
        let parser = YamlParser::new();
        assert!(parser.parse("").unwrap().is_null());
        assert!(parser.parse("   \n").unwrap().is_null());
    }

    #[test]
    fn test_yaml_parser_invalid() {
        let parser = YamlParser::new();
        let result = parser.parse("invalid: yaml: content:");

        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_yaml_parser_supported_extensions() {
        let parser = YamlParser::default();
        assert!(parser.supports_extension("yml"));
        assert!(parser.supports_extension("yaml"));
        assert!(!parser.supports_extension("toml"));
    }

    #[test]
    fn test_yaml_adapter_load() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "logs:\n  file:\n    path: /tmp/serf-logs").unwrap();

        let adapter = YamlFileAdapter::new(temp_file.path());
        assert_eq!(adapter.name(), "yaml-file");
        assert_eq!(adapter.location(), Some(temp_file.path()));

        let doc = adapter.load().unwrap();
        assert!(doc.as_mapping().unwrap().contains_key("logs"));
    }

    #[test]
    fn test_yaml_adapter_rereads_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();
        fs::write(&path, "key: initial\n").unwrap();

        let adapter = YamlFileAdapter::new(&path);
        let first = adapter.load().unwrap();
        assert_eq!(first.as_mapping().unwrap()["key"], ConfigValue::from("initial"));

        fs::write(&path, "key: updated\n").unwrap();
        let second = adapter.load().unwrap();
        assert_eq!(second.as_mapping().unwrap()["key"], ConfigValue::from("updated"));
    }

    #[test]
    fn test_yaml_adapter_nonexistent_file() {
        let adapter = YamlFileAdapter::new("/nonexistent/path/to/config.yml");
        match adapter.load() {
            Err(ConfigError::ConfigNotFound { path }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/path/to/config.yml"));
            }
            other => panic!("expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_yaml_adapter_invalid_content() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "a: [unclosed").unwrap();

        let adapter = YamlFileAdapter::new(temp_file.path());
        assert!(matches!(adapter.load(), Err(ConfigError::ParseError { .. })));
    }
}
