//! Logger configuration
//!
//! [`ConfigBuilder`] applies options in call order; each option sets one
//! field, except [`ConfigBuilder::sink`] which appends. [`ConfigBuilder::build`]
//! freezes the result into a [`Config`] that a driver consumes.
//!
//! [`LoggerConfig`] is the serializable form of the same four settings, used
//! for the process-wide startup logger.

use super::encoder::Encoding;
use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::sink::Sink;
use super::timestamp::TimestampFormat;
use crate::sinks::{ConsoleSink, FileSink, RotatingFileSink, RotationPolicy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Path of the rotating file used by the startup logger
pub const DEFAULT_LOG_FILE: &str = "logs/runtime.log";

/// Frozen logger settings
pub struct Config {
    level: LogLevel,
    sinks: Vec<Box<dyn Sink>>,
    encoding: Encoding,
    caller: bool,
    timestamp_format: TimestampFormat,
    color: bool,
}

impl Config {
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    pub fn caller(&self) -> bool {
        self.caller
    }

    pub fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }

    pub fn color(&self) -> bool {
        self.color
    }

    pub fn sink_names(&self) -> Vec<String> {
        self.sinks.iter().map(|s| s.name().to_string()).collect()
    }

    /// Take ownership of the sinks, in insertion order
    pub fn into_sinks(self) -> Vec<Box<dyn Sink>> {
        self.sinks
    }
}

impl Default for Config {
    fn default() -> Self {
        ConfigBuilder::new().build()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("level", &self.level)
            .field("sinks", &self.sink_names())
            .field("encoding", &self.encoding)
            .field("caller", &self.caller)
            .field("timestamp_format", &self.timestamp_format)
            .field("color", &self.color)
            .finish()
    }
}

/// Builder for [`Config`]
///
/// Defaults: level `Debug`, encoding `json`, no caller capture, and a stdout
/// sink if no sink is added.
///
/// # Example
/// ```
/// use rust_log_facade::prelude::*;
///
/// let capture = MemorySink::new();
/// let config = Config::builder()
///     .level(LogLevel::Info)
///     .sink(ConsoleSink::stdout())
///     .sink(capture.clone())
///     .encoding("console")
///     .caller(true)
///     .build();
///
/// assert_eq!(config.sink_names(), vec!["stdout", "memory"]);
/// ```
pub struct ConfigBuilder {
    level: LogLevel,
    sinks: Vec<Box<dyn Sink>>,
    encoding: Encoding,
    caller: bool,
    timestamp_format: TimestampFormat,
    color: bool,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            level: LogLevel::Debug,
            sinks: Vec::new(),
            encoding: Encoding::Json,
            caller: false,
            timestamp_format: TimestampFormat::default(),
            color: false,
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Append a sink; earlier sinks are kept
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Append several sinks, in order
    #[must_use = "builder methods return a new value"]
    pub fn sinks<I>(mut self, sinks: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Sink>>,
    {
        self.sinks.extend(sinks);
        self
    }

    /// Set the encoding; unrecognized names are kept and encoded as json
    #[must_use = "builder methods return a new value"]
    pub fn encoding(mut self, encoding: impl Into<Encoding>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Capture the caller's file and line on every record
    #[must_use = "builder methods return a new value"]
    pub fn caller(mut self, caller: bool) -> Self {
        self.caller = caller;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Color the level column of the console encoding
    #[must_use = "builder methods return a new value"]
    pub fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn build(self) -> Config {
        let mut sinks = self.sinks;
        if sinks.is_empty() {
            sinks.push(Box::new(ConsoleSink::stdout()));
        }

        Config {
            level: self.level,
            sinks,
            encoding: self.encoding,
            caller: self.caller,
            timestamp_format: self.timestamp_format,
            color: self.color,
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable sink description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SinkConfig {
    Stdout,
    Stderr,
    File {
        path: PathBuf,
    },
    RotatingFile {
        path: PathBuf,
        #[serde(default = "default_max_bytes")]
        max_bytes: u64,
        #[serde(default = "default_max_backups")]
        max_backups: usize,
        #[serde(default)]
        compress: bool,
    },
}

fn default_max_bytes() -> u64 {
    RotationPolicy::default().max_file_size().unwrap_or(100 * 1024 * 1024)
}

fn default_max_backups() -> usize {
    RotationPolicy::default().max_backup_files
}

impl SinkConfig {
    fn validate(&self) -> Result<()> {
        match self {
            SinkConfig::File { path } | SinkConfig::RotatingFile { path, .. }
                if path.as_os_str().is_empty() =>
            {
                Err(LoggerError::config(self.kind(), "path must not be empty"))
            }
            SinkConfig::RotatingFile { max_bytes: 0, .. } => {
                Err(LoggerError::config(self.kind(), "max_bytes must be positive"))
            }
            _ => Ok(()),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            SinkConfig::Stdout => "stdout",
            SinkConfig::Stderr => "stderr",
            SinkConfig::File { .. } => "file",
            SinkConfig::RotatingFile { .. } => "rotating_file",
        }
    }

    /// Rotating file at `path` with the default rotation policy
    pub fn rotating_file(path: impl Into<PathBuf>) -> Self {
        SinkConfig::RotatingFile {
            path: path.into(),
            max_bytes: default_max_bytes(),
            max_backups: default_max_backups(),
            compress: false,
        }
    }

    /// Open the described sink
    ///
    /// # Errors
    ///
    /// Returns error if a file sink cannot be opened, has an empty path, or
    /// is a rotating file with a zero `max_bytes`
    pub fn open(&self) -> Result<Box<dyn Sink>> {
        self.validate()?;
        Ok(match self {
            SinkConfig::Stdout => Box::new(ConsoleSink::stdout()),
            SinkConfig::Stderr => Box::new(ConsoleSink::stderr()),
            SinkConfig::File { path } => Box::new(FileSink::new(path)?),
            SinkConfig::RotatingFile {
                path,
                max_bytes,
                max_backups,
                compress,
            } => {
                let policy = RotationPolicy::new()
                    .with_max_size(*max_bytes)
                    .with_max_backups(*max_backups)
                    .with_compression(*compress);
                Box::new(RotatingFileSink::with_policy(path, policy)?)
            }
        })
    }
}

/// Serializable logger settings
///
/// The default value is the startup configuration of the process-wide
/// logger: level `debug`, a rotating `logs/runtime.log` plus stdout,
/// `console` encoding, no caller capture.
///
/// ```
/// use rust_log_facade::{LoggerConfig, LogLevel};
///
/// let config: LoggerConfig = serde_json::from_str(
///     r#"{"level": "warn", "encoder": "json", "sinks": [{"type": "stderr"}]}"#,
/// ).unwrap();
///
/// assert_eq!(config.level, LogLevel::Warn);
/// assert!(!config.caller);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub sinks: Vec<SinkConfig>,
    pub encoder: Encoding,
    pub caller: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Debug,
            sinks: vec![SinkConfig::rotating_file(DEFAULT_LOG_FILE), SinkConfig::Stdout],
            encoder: Encoding::Console,
            caller: false,
        }
    }
}

impl LoggerConfig {
    /// Open every sink and freeze the settings
    ///
    /// # Errors
    ///
    /// Returns the first sink that fails to open
    pub fn build(&self) -> Result<Config> {
        let sinks = self
            .sinks
            .iter()
            .map(SinkConfig::open)
            .collect::<Result<Vec<_>>>()?;

        Ok(self.builder().sinks(sinks).build())
    }

    /// Like [`LoggerConfig::build`], but a sink that fails to open is skipped
    /// and reported on stderr instead of failing the whole configuration.
    pub fn build_lossy(&self) -> Config {
        let sinks = self.sinks.iter().filter_map(|sink_config| match sink_config.open() {
            Ok(sink) => Some(sink),
            Err(e) => {
                eprintln!("[LOGGER WARNING] Skipping sink {:?}: {}", sink_config, e);
                None
            }
        });

        self.builder().sinks(sinks.collect::<Vec<_>>()).build()
    }

    fn builder(&self) -> ConfigBuilder {
        Config::builder()
            .level(self.level)
            .encoding(self.encoder.clone())
            .caller(self.caller)
    }
}
