//! The logging capability
//!
//! [`Logger`] is the only contract application code depends on. Backends
//! implement a single method, [`Logger::log`]; the eighteen leveled methods
//! are provided on top of it in three families:
//!
//! - free-form (`info`): a slice of displayable values joined by single spaces
//! - formatted (`infof`): `format_args!` output
//! - structured (`infot`): a message plus [`Fields`]
//!
//! Every provided method is `#[track_caller]`, so the location handed to
//! [`Logger::log`] is the application's call site, never a frame inside the
//! facade.

use super::fields::Fields;
use super::log_level::LogLevel;
use std::fmt;
use std::panic::Location;

/// Unrendered message of one logging call
///
/// Backends render it only after deciding the record passes their level.
#[derive(Clone, Copy)]
pub enum Payload<'a> {
    Values(&'a [&'a dyn fmt::Display]),
    Format(fmt::Arguments<'a>),
    Structured {
        message: &'a str,
        fields: &'a Fields,
    },
}

impl<'a> Payload<'a> {
    pub fn render(&self) -> String {
        match self {
            Payload::Values(values) => values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" "),
            Payload::Format(args) => fmt::format(*args),
            Payload::Structured { message, .. } => message.to_string(),
        }
    }

    pub fn fields(&self) -> Option<&'a Fields> {
        match self {
            Payload::Structured { fields, .. } => Some(*fields),
            _ => None,
        }
    }
}

impl fmt::Debug for Payload<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Structured { message, fields } => f
                .debug_struct("Structured")
                .field("message", message)
                .field("fields", fields)
                .finish(),
            other => f.debug_tuple("Payload").field(&other.render()).finish(),
        }
    }
}

macro_rules! leveled_methods {
    ($($level:ident => $values:ident, $format:ident, $structured:ident;)*) => {
        $(
            #[track_caller]
            fn $values(&self, values: &[&dyn fmt::Display]) {
                self.log(LogLevel::$level, Payload::Values(values), Location::caller());
            }

            #[track_caller]
            fn $format(&self, args: fmt::Arguments<'_>) {
                self.log(LogLevel::$level, Payload::Format(args), Location::caller());
            }

            #[track_caller]
            fn $structured(&self, message: &str, fields: Fields) {
                self.log(
                    LogLevel::$level,
                    Payload::Structured { message, fields: &fields },
                    Location::caller(),
                );
            }
        )*
    };
}

/// Leveled, structured logging
///
/// Implementations must be safe to call from many threads at once.
///
/// Severity side effects belong to the backend: the engine backend panics
/// after a `Panic` record and exits the process after a `Fatal` record, while
/// [`NoopLogger`](crate::backends::NoopLogger) and
/// [`CaptureLogger`](crate::backends::CaptureLogger) never alter control flow.
pub trait Logger: Send + Sync {
    /// Emit one record at `level` attributed to `location`
    fn log(&self, level: LogLevel, payload: Payload<'_>, location: &'static Location<'static>);

    /// Flush buffered output
    fn flush(&self) {}

    leveled_methods! {
        Debug => debug, debugf, debugt;
        Info => info, infof, infot;
        Warn => warn, warnf, warnt;
        Error => error, errorf, errort;
        Panic => panic, panicf, panict;
        Fatal => fatal, fatalf, fatalt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FieldValue;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<(LogLevel, String, Option<Fields>, u32)>>,
    }

    impl Logger for Recorder {
        fn log(&self, level: LogLevel, payload: Payload<'_>, location: &'static Location<'static>) {
            self.calls.lock().push((
                level,
                payload.render(),
                payload.fields().cloned(),
                location.line(),
            ));
        }
    }

    #[test]
    fn test_values_are_space_joined() {
        let recorder = Recorder::default();
        recorder.info(&[&"user", &42, &true]);

        let calls = recorder.calls.lock();
        assert_eq!(calls[0].0, LogLevel::Info);
        assert_eq!(calls[0].1, "user 42 true");
        assert!(calls[0].2.is_none());
    }

    #[test]
    fn test_each_family_maps_to_its_level() {
        let recorder = Recorder::default();
        recorder.debugf(format_args!("{}-{}", 1, 2));
        recorder.warnt("event", Fields::new().with_field("a", 1));
        recorder.errorf(format_args!("e"));
        recorder.panict("p", Fields::new());
        recorder.fatal(&[]);

        let calls = recorder.calls.lock();
        let levels: Vec<LogLevel> = calls.iter().map(|c| c.0).collect();
        assert_eq!(
            levels,
            vec![
                LogLevel::Debug,
                LogLevel::Warn,
                LogLevel::Error,
                LogLevel::Panic,
                LogLevel::Fatal
            ]
        );
        assert_eq!(calls[0].1, "1-2");
        assert_eq!(calls[1].1, "event");
        assert_eq!(calls[1].2.as_ref().and_then(|f| f.get("a")), Some(&FieldValue::Int(1)));
        assert_eq!(calls[4].1, "");
    }

    #[test]
    fn test_location_is_call_site() {
        let recorder = Recorder::default();
        let expected = line!() + 1;
        recorder.info(&[&"here"]);

        assert_eq!(recorder.calls.lock()[0].3, expected);
    }
}
