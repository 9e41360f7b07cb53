// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide logging.
//!
//! [`setup_logging`] reads the log directory from the configuration store,
//! creates it, and installs a `tracing` subscriber that writes every record at
//! INFO or above both to `<dir>/app.log` and to standard output, one line per
//! record:
//!
//! ```text
//! 2024-05-01 12:00:00,123 - serf::cli - INFO - Starting blocking with input: in, output: out
//! ```
//!
//! [`get_logger`] hands out named [`Logger`]s whose records carry that name.

use crate::domain::{ConfigError, ConfigPath, Result};
use crate::service::ConfigStore;
use chrono::Local;
use once_cell::sync::OnceCell;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

/// Configuration key holding the log directory.
pub const LOG_DIR_KEY: &str = "logs.file.path";

/// Log directory used when the key is absent.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Log file created inside the log directory.
pub const LOG_FILE_NAME: &str = "app.log";

/// Name used by [`get_logger`] when no name is given.
pub const ROOT_LOGGER: &str = "root";

const LOGGER_FIELD: &str = "logger";
const MESSAGE_FIELD: &str = "message";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

static INSTALLED: OnceCell<PathBuf> = OnceCell::new();

/// Reads the log directory from `logs.file.path`, defaulting to `logs`.
pub fn log_directory(store: &ConfigStore) -> Result<PathBuf> {
    match store.get_path_or(LOG_DIR_KEY, DEFAULT_LOG_DIR)? {
        ConfigPath::Single(dir) => Ok(dir),
        ConfigPath::Many(_) => Err(ConfigError::conversion(
            LOG_DIR_KEY,
            "path",
            "expected a single directory, found a list",
        )),
    }
}

/// Installs the process-wide logging configuration.
///
/// Creates the log directory (and its parents) if needed and returns the path
/// of the log file. Only the first call installs anything; later calls still
/// make sure their directory exists but return the file chosen by the first.
pub fn setup_logging(store: &ConfigStore) -> Result<PathBuf> {
    let log_dir = log_directory(store)?;
    fs::create_dir_all(&log_dir)?;

    let log_file = INSTALLED.get_or_try_init(|| -> Result<PathBuf> {
        let subscriber = logging_subscriber(&log_dir)?;
        if tracing::subscriber::set_global_default(subscriber).is_err() {
            tracing::debug!("A global subscriber was already installed; keeping it");
        }
        Ok(log_dir.join(LOG_FILE_NAME))
    })?;

    Ok(log_file.clone())
}

/// Builds the file + stdout subscriber for `log_dir` without installing it.
///
/// The directory must already exist.
pub fn logging_subscriber(log_dir: &Path) -> Result<impl Subscriber + Send + Sync + 'static> {
    build_subscriber(log_dir, std::io::stdout)
}

/// Builds the subscriber with an arbitrary console writer.
pub fn build_subscriber<W>(
    log_dir: &Path,
    console: W,
) -> Result<impl Subscriber + Send + Sync + 'static>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join(LOG_FILE_NAME))?;

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(LineFormat)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    let console_layer = tracing_subscriber::fmt::layer()
        .event_format(LineFormat)
        .with_ansi(false)
        .with_writer(console);

    Ok(tracing_subscriber::registry()
        .with(LevelFilter::INFO)
        .with(file_layer)
        .with(console_layer))
}

/// Returns a named logger, or the root logger when `name` is `None`.
///
/// # Examples
///
/// ```rust
/// use serf::logging::get_logger;
///
/// assert_eq!(get_logger(Some("serf::cli")).name(), "serf::cli");
/// assert_eq!(get_logger(None).name(), "root");
/// ```
pub fn get_logger(name: Option<&str>) -> Logger {
    Logger {
        name: name.unwrap_or(ROOT_LOGGER).to_string(),
    }
}

/// A named handle for emitting log records.
///
/// All loggers feed the sinks installed by [`setup_logging`]; the name only
/// shows up in the formatted line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logger {
    name: String,
}

impl Logger {
    /// The logger name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Emits a DEBUG record.
    pub fn debug(&self, message: impl fmt::Display) {
        tracing::debug!(logger = %self.name, "{}", message);
    }

    /// Emits an INFO record.
    pub fn info(&self, message: impl fmt::Display) {
        tracing::info!(logger = %self.name, "{}", message);
    }

    /// Emits a WARN record.
    pub fn warn(&self, message: impl fmt::Display) {
        tracing::warn!(logger = %self.name, "{}", message);
    }

    /// Emits an ERROR record.
    pub fn error(&self, message: impl fmt::Display) {
        tracing::error!(logger = %self.name, "{}", message);
    }
}

/// `<timestamp> - <logger name> - <LEVEL> - <message>` lines.
///
/// The logger name comes from the `logger` field when present, otherwise the
/// event target. Any other fields are appended as `key=value`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut fields = LineFields::default();
        event.record(&mut fields);

        let metadata = event.metadata();
        let name = fields.logger.as_deref().unwrap_or_else(|| metadata.target());

        write!(
            writer,
            "{} - {} - {} - {}",
            Local::now().format(TIMESTAMP_FORMAT),
            name,
            metadata.level(),
            fields.message
        )?;
        for (key, value) in &fields.extra {
            write!(writer, " {}={}", key, value)?;
        }
        writeln!(writer)
    }
}

#[derive(Default)]
struct LineFields {
    logger: Option<String>,
    message: String,
    extra: Vec<(&'static str, String)>,
}

impl LineFields {
    fn record(&mut self, field: &Field, value: String) {
        match field.name() {
            LOGGER_FIELD => self.logger = Some(value),
            MESSAGE_FIELD => self.message = value,
            other => self.extra.push((other, value)),
        }
    }
}

impl Visit for LineFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.record(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record(field, format!("{:?}", value));
    }
}
