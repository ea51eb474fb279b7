//! Core facade types and traits

pub mod config;
pub mod driver;
pub mod encoder;
pub mod error;
pub mod fields;
pub mod global;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod sink;
pub mod timestamp;

pub use config::{Config, ConfigBuilder, LoggerConfig, SinkConfig, DEFAULT_LOG_FILE};
pub use driver::{driver, engine_driver, new_logger, noop_driver, set_driver, Driver};
pub use encoder::{Encoder, Encoding, ENCODER_CONSOLE, ENCODER_JSON};
pub use error::{LoggerError, Result};
pub use fields::{FieldValue, Fields};
pub use global::{default_logger, update_default_logger};
pub use log_entry::{CallSite, LogEntry};
pub use log_level::LogLevel;
pub use logger::{Logger, Payload};
pub use sink::{FanOut, Sink, WriterSink};
pub use timestamp::TimestampFormat;
