//! Process-wide default logger
//!
//! The slot starts empty and is filled on first use with a logger built by
//! the current [`driver`](super::driver::driver) from
//! [`LoggerConfig::default`]: level debug, console encoding, a rotating
//! `logs/runtime.log` plus stdout. If the log file cannot be opened the
//! startup logger keeps the remaining sinks and says so on stderr.
//!
//! [`update_default_logger`] overwrites the slot. The previous logger is
//! handed back to the caller and is not flushed or closed here. Replacing the
//! slot before first use skips the startup logger entirely, so no log file is
//! created.
//!
//! The free functions forward to whichever logger occupies the slot at the
//! time of the call. The lock is released before the record is emitted, so a
//! logger may itself log through the default slot or replace it.

use super::config::LoggerConfig;
use super::driver::new_logger;
use super::fields::Fields;
use super::log_level::LogLevel;
use super::logger::{Logger, Payload};
use parking_lot::{const_rwlock, RwLock};
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

static DEFAULT_LOGGER: RwLock<Option<Arc<dyn Logger>>> = const_rwlock(None);

/// The logger currently in the default slot, building the startup logger if
/// the slot has never been filled
pub fn default_logger() -> Arc<dyn Logger> {
    if let Some(logger) = DEFAULT_LOGGER.read().as_ref() {
        return Arc::clone(logger);
    }

    // Built without holding the lock: the driver may itself use the slot
    let startup = new_logger(LoggerConfig::default().build_lossy());

    // Another thread may have filled the slot in the meantime; its logger wins
    DEFAULT_LOGGER.write().get_or_insert(startup).clone()
}

/// Replace the default logger, returning the one it replaced
///
/// Returns `None` if the slot had never been filled.
///
/// ```
/// use rust_log_facade::prelude::*;
/// use std::sync::Arc;
///
/// let capture = CaptureLogger::new();
/// update_default_logger(Arc::new(capture.clone()));
///
/// rust_log_facade::infof(format_args!("port {}", 8080));
/// assert_eq!(capture.messages(), vec!["port 8080"]);
/// ```
pub fn update_default_logger(logger: Arc<dyn Logger>) -> Option<Arc<dyn Logger>> {
    DEFAULT_LOGGER.write().replace(logger)
}

/// Flush the default logger
pub fn flush() {
    default_logger().flush();
}

#[track_caller]
fn emit(level: LogLevel, payload: Payload<'_>) {
    let location = Location::caller();
    default_logger().log(level, payload, location);
}

macro_rules! forwarding_functions {
    ($($level:ident => $values:ident, $format:ident, $structured:ident;)*) => {
        $(
            #[doc = concat!("Log values joined by spaces at ", stringify!($level), " on the default logger")]
            #[track_caller]
            pub fn $values(values: &[&dyn fmt::Display]) {
                emit(LogLevel::$level, Payload::Values(values));
            }

            #[doc = concat!("Log formatted text at ", stringify!($level), " on the default logger")]
            #[track_caller]
            pub fn $format(args: fmt::Arguments<'_>) {
                emit(LogLevel::$level, Payload::Format(args));
            }

            #[doc = concat!("Log a message with fields at ", stringify!($level), " on the default logger")]
            #[track_caller]
            pub fn $structured(message: &str, fields: Fields) {
                emit(LogLevel::$level, Payload::Structured { message, fields: &fields });
            }
        )*
    };
}

forwarding_functions! {
    Debug => debug, debugf, debugt;
    Info => info, infof, infot;
    Warn => warn, warnf, warnt;
    Error => error, errorf, errort;
    Panic => panic, panicf, panict;
    Fatal => fatal, fatalf, fatalt;
}
