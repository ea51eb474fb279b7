//! Logger that discards everything

use crate::core::{LogLevel, Logger, Payload};
use std::panic::Location;

/// Discards every call
///
/// Unlike the engine backend, `panic*` and `fatal*` calls on a `NoopLogger`
/// neither panic nor exit: disabling logging never changes control flow.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl NoopLogger {
    pub fn new() -> Self {
        NoopLogger
    }
}

impl Logger for NoopLogger {
    #[inline]
    fn log(&self, _level: LogLevel, _payload: Payload<'_>, _location: &'static Location<'static>) {}
}
