//! Production backend: encodes records and fans them out to sinks

use crate::core::{
    Config, Encoder, FanOut, LogEntry, LogLevel, Logger, Payload,
};
use parking_lot::{Mutex, RwLock};
use std::panic::Location;
use std::sync::Arc;

/// Exit status used after a `Fatal` record
pub const FATAL_EXIT_CODE: i32 = 1;

struct Engine {
    min_level: RwLock<LogLevel>,
    encoder: Encoder,
    caller: bool,
    sinks: Mutex<FanOut>,
}

/// Logger bound to one encoder and one set of sinks
///
/// Built from a [`Config`]; two calls to [`EngineLogger::new`] never share
/// state. Clones share the same engine, including its level.
///
/// Records below the minimum level are discarded. Records that pass are
/// encoded once and written to every sink, in the order the sinks were
/// configured, then the sinks are flushed.
///
/// Severity side effects run after the record is written and regardless of
/// the minimum level:
/// - `Panic`: panics with the rendered message (a `String` payload)
/// - `Fatal`: flushes every sink and exits the process with status 1
#[derive(Clone, Default)]
pub struct EngineLogger {
    engine: Option<Arc<Engine>>,
}

impl EngineLogger {
    pub fn new(config: Config) -> Self {
        let encoder = Encoder::new(
            config.encoding(),
            config.timestamp_format().clone(),
            config.color(),
        );

        let engine = Engine {
            min_level: RwLock::new(config.level()),
            encoder,
            caller: config.caller(),
            sinks: Mutex::new(FanOut::new(config.into_sinks())),
        };

        Self {
            engine: Some(Arc::new(engine)),
        }
    }

    /// A logger with no engine; every call on it panics
    pub fn unbound() -> Self {
        Self { engine: None }
    }

    pub fn is_bound(&self) -> bool {
        self.engine.is_some()
    }

    fn engine(&self) -> &Engine {
        match self.engine {
            Some(ref engine) => engine,
            None => panic!("logger: engine not initialized"),
        }
    }

    pub fn level(&self) -> LogLevel {
        *self.engine().min_level.read()
    }

    /// Change the minimum level of this logger and all its clones
    pub fn set_level(&self, level: LogLevel) {
        *self.engine().min_level.write() = level;
    }

    pub fn sink_names(&self) -> Vec<String> {
        self.engine().sinks.lock().names()
    }
}

impl Logger for EngineLogger {
    fn log(&self, level: LogLevel, payload: Payload<'_>, location: &'static Location<'static>) {
        let engine = self.engine();
        let enabled = level >= *engine.min_level.read();

        if !enabled && level < LogLevel::Panic {
            return;
        }

        let message = payload.render();

        if enabled {
            let mut entry = LogEntry::new(level, &message)
                .with_fields(payload.fields().cloned().unwrap_or_default());
            if engine.caller {
                entry = entry.with_caller(location);
            }

            let line = engine.encoder.encode(&entry);
            let mut sinks = engine.sinks.lock();
            sinks.write_all(line.as_bytes());
            sinks.flush();
        }

        match level {
            LogLevel::Panic => std::panic::panic_any(message),
            LogLevel::Fatal => {
                engine.sinks.lock().flush();
                std::process::exit(FATAL_EXIT_CODE);
            }
            _ => {}
        }
    }

    fn flush(&self) {
        self.engine().sinks.lock().flush();
    }
}

impl std::fmt::Debug for EngineLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.engine {
            Some(ref engine) => f
                .debug_struct("EngineLogger")
                .field("level", &*engine.min_level.read())
                .field("encoding", engine.encoder.encoding())
                .field("caller", &engine.caller)
                .field("sinks", &engine.sinks.lock().names())
                .finish(),
            None => f.write_str("EngineLogger(unbound)"),
        }
    }
}
