//! Backend selection
//!
//! A [`Driver`] turns a frozen [`Config`] into a [`Logger`]. The process holds
//! one current driver, the engine driver unless replaced; [`new_logger`]
//! always goes through it, so swapping the driver swaps the backend of every
//! logger created afterwards without touching call sites. Loggers created
//! before the swap keep their backend.

use super::config::Config;
use super::logger::Logger;
use crate::backends::{EngineLogger, NoopLogger};
use parking_lot::{const_rwlock, RwLock};
use std::sync::Arc;

/// Factory producing a logger bound to a concrete backend
pub type Driver = Arc<dyn Fn(Config) -> Arc<dyn Logger> + Send + Sync>;

static DRIVER: RwLock<Option<Driver>> = const_rwlock(None);

/// Driver building [`EngineLogger`]s
pub fn engine_driver() -> Driver {
    Arc::new(|config: Config| Arc::new(EngineLogger::new(config)) as Arc<dyn Logger>)
}

/// Driver building [`NoopLogger`]s; the configuration is dropped unused
pub fn noop_driver() -> Driver {
    Arc::new(|_config: Config| Arc::new(NoopLogger::new()) as Arc<dyn Logger>)
}

/// The current driver
pub fn driver() -> Driver {
    DRIVER.read().clone().unwrap_or_else(engine_driver)
}

/// Replace the current driver, returning the previous one
pub fn set_driver(driver: Driver) -> Driver {
    DRIVER
        .write()
        .replace(driver)
        .unwrap_or_else(engine_driver)
}

/// Build a logger from `config` with the current driver
///
/// ```
/// use rust_log_facade::prelude::*;
///
/// let capture = MemorySink::new();
/// let logger = new_logger(
///     Config::builder()
///         .level(LogLevel::Info)
///         .sink(capture.clone())
///         .build(),
/// );
///
/// logger.debug(&[&"dropped"]);
/// logger.info(&[&"kept", &1]);
///
/// assert_eq!(capture.lines().len(), 1);
/// ```
pub fn new_logger(config: Config) -> Arc<dyn Logger> {
    let driver = driver();
    driver(config)
}
