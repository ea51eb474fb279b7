//! Logging macros for ergonomic log message formatting.
//!
//! Every leveled macro has two forms. With a string literal first it logs
//! through the process-wide default logger; with a logger expression first it
//! logs through that logger. Both take `format!`-style arguments and record
//! the macro's call site.
//!
//! # Examples
//!
//! ```
//! use rust_log_facade::prelude::*;
//! use rust_log_facade::info;
//!
//! let capture = MemorySink::new();
//! let logger = new_logger(Config::builder().sink(capture.clone()).build());
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! assert_eq!(capture.lines().len(), 2);
//! ```
//!
//! There is no `panic!` counterpart; use [`Logger::panicf`](crate::Logger::panicf).

/// Build [`Fields`](crate::Fields) from `key => value` pairs.
///
/// # Examples
///
/// ```
/// use rust_log_facade::{fields, FieldValue};
///
/// let fields = fields! { "user" => "alice", "attempts" => 3, "ok" => false };
/// assert_eq!(fields.len(), 3);
/// assert_eq!(fields.get("attempts"), Some(&FieldValue::Int(3)));
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut fields = $crate::Fields::new();
        $(
            fields.insert($key, $value);
        )+
        fields
    }};
}

/// Log a formatted message at an explicit level.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let logger = CaptureLogger::new();
/// use rust_log_facade::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// # assert_eq!(logger.messages(), vec!["Simple message", "Error code: 500"]);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        use $crate::Logger as _;
        $logger.log(
            $level,
            $crate::Payload::Format(format_args!($($arg)+)),
            ::std::panic::Location::caller(),
        )
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __leveled {
    ($global:path, $method:ident, $fmt:literal $($arg:tt)*) => {
        $global(format_args!($fmt $($arg)*))
    };
    ($global:path, $method:ident, $logger:expr, $($arg:tt)+) => {{
        use $crate::Logger as _;
        $logger.$method(format_args!($($arg)+))
    }};
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let logger = CaptureLogger::new();
/// use rust_log_facade::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// # assert_eq!(logger.len(), 2);
/// ```
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::__leveled!($crate::debugf, debugf, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let logger = CaptureLogger::new();
/// use rust_log_facade::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// # assert_eq!(logger.messages()[1], "Processing 100 items");
/// ```
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::__leveled!($crate::infof, infof, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let logger = CaptureLogger::new();
/// use rust_log_facade::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::__leveled!($crate::warnf, warnf, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let logger = CaptureLogger::new();
/// use rust_log_facade::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::__leveled!($crate::errorf, errorf, $($arg)+)
    };
}

/// Log a fatal-level message.
///
/// On the engine backend this exits the process after writing.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let logger = CaptureLogger::new();
/// use rust_log_facade::fatal;
/// fatal!(logger, "Critical system failure");
/// fatal!(logger, "Unable to recover from error: {}", "disk full");
/// # assert_eq!(logger.entries()[0].level, LogLevel::Fatal);
/// ```
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)+) => {
        $crate::__leveled!($crate::fatalf, fatalf, $($arg)+)
    };
}
