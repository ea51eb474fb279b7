//! Logger that records calls in memory

use crate::core::{CallSite, Fields, LogLevel, Logger, Payload};
use parking_lot::Mutex;
use std::panic::Location;
use std::sync::Arc;

/// One recorded call
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedEntry {
    pub level: LogLevel,
    pub message: String,
    pub fields: Fields,
    pub caller: CallSite,
}

/// Test double that keeps every call at or above its level
///
/// Clones share the same record list. Like [`NoopLogger`](super::NoopLogger),
/// it never panics or exits on `Panic` / `Fatal` records.
///
/// ```
/// use rust_log_facade::prelude::*;
///
/// let capture = CaptureLogger::new();
/// capture.warnt("disk low", fields! { "free_mb" => 12 });
///
/// let entries = capture.entries();
/// assert_eq!(entries[0].level, LogLevel::Warn);
/// assert_eq!(entries[0].fields.get("free_mb"), Some(&FieldValue::Int(12)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CaptureLogger {
    min_level: LogLevel,
    entries: Arc<Mutex<Vec<CapturedEntry>>>,
}

impl CaptureLogger {
    /// Capture everything
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(min_level: LogLevel) -> Self {
        Self {
            min_level,
            entries: Arc::default(),
        }
    }

    pub fn entries(&self) -> Vec<CapturedEntry> {
        self.entries.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries.lock().iter().map(|e| e.message.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Logger for CaptureLogger {
    fn log(&self, level: LogLevel, payload: Payload<'_>, location: &'static Location<'static>) {
        if level < self.min_level {
            return;
        }

        self.entries.lock().push(CapturedEntry {
            level,
            message: payload.render(),
            fields: payload.fields().cloned().unwrap_or_default(),
            caller: CallSite::from_location(location),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_by_level() {
        let capture = CaptureLogger::with_level(LogLevel::Warn);

        capture.info(&[&"dropped"]);
        capture.warnf(format_args!("kept {}", 1));
        capture.fatal(&[&"kept", &2]);

        assert_eq!(capture.messages(), vec!["kept 1", "kept 2"]);
    }

    #[test]
    fn test_panic_and_fatal_do_not_alter_control_flow() {
        let capture = CaptureLogger::new();
        capture.panicf(format_args!("boom"));
        capture.fatalt("gone", Fields::new());

        assert_eq!(capture.len(), 2);
    }

    #[test]
    fn test_records_call_site() {
        let capture = CaptureLogger::new();
        let expected = line!() + 1;
        capture.error(&[&"where"]);

        let entry = &capture.entries()[0];
        assert_eq!(entry.caller.line, expected);
        assert!(entry.caller.file.ends_with("capture.rs"));
    }
}
