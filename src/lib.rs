//! # Rust Log Facade
//!
//! A pluggable structured-logging facade. Application code logs through the
//! [`Logger`] trait; the backend behind it is chosen by a [`Driver`] and can
//! be swapped without touching call sites.
//!
//! ## Features
//!
//! - **Three call families**: free-form values (`info`), formatted text
//!   (`infof`) and message plus fields (`infot`) at six severities
//! - **Swappable backends**: the engine backend, a no-op backend, and an
//!   in-memory capture backend for tests
//! - **Fan-out**: one record goes to every configured sink, in order; console,
//!   file, rotating file and in-memory sinks are included
//! - **Two encodings**: single-line JSON and tab-separated console text
//! - **Process-wide default**: free functions forwarding to a replaceable
//!   default logger
//!
//! ## Example
//!
//! ```
//! use rust_log_facade::prelude::*;
//!
//! let capture = MemorySink::new();
//! let logger = new_logger(
//!     Config::builder()
//!         .level(LogLevel::Info)
//!         .sink(capture.clone())
//!         .encoding("json")
//!         .build(),
//! );
//!
//! logger.infot("user login", fields! { "user" => "alice", "attempt" => 2 });
//!
//! let record = &capture.json_lines().unwrap()[0];
//! assert_eq!(record["msg"], "user login");
//! assert_eq!(record["user"], "alice");
//! ```

pub mod backends;
pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::backends::{CaptureLogger, EngineLogger, NoopLogger};
    pub use crate::core::{
        default_logger, new_logger, update_default_logger, Config, ConfigBuilder, Encoding,
        FieldValue, Fields, LogLevel, Logger, LoggerConfig, LoggerError, Result, Sink,
        SinkConfig,
    };
    pub use crate::fields;
    pub use crate::sinks::{ConsoleSink, FileSink, MemorySink, RotatingFileSink, RotationPolicy};
}

pub use self::backends::{CaptureLogger, CapturedEntry, EngineLogger, NoopLogger};
pub use self::core::global::{
    debug, debugf, debugt, error, errorf, errort, fatal, fatalf, fatalt, flush, info, infof,
    infot, panic, panicf, panict, warn, warnf, warnt,
};
pub use self::core::{
    default_logger, driver, engine_driver, new_logger, noop_driver, set_driver,
    update_default_logger, CallSite, Config, ConfigBuilder, Driver, Encoder, Encoding, FanOut,
    FieldValue, Fields, LogEntry, LogLevel, Logger, LoggerConfig, LoggerError, Payload, Result,
    Sink, SinkConfig, TimestampFormat, WriterSink, DEFAULT_LOG_FILE,
};
pub use self::sinks::{
    ConsoleSink, ConsoleTarget, FileSink, MemorySink, RotatingFileSink, RotationPolicy,
    RotationStrategy,
};
