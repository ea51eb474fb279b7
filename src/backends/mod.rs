//! Logger backends
//!
//! - [`EngineLogger`]: encodes records and writes them to sinks
//! - [`NoopLogger`]: discards everything
//! - [`CaptureLogger`]: records calls in memory for assertions

pub mod capture;
pub mod engine;
pub mod noop;

pub use capture::{CaptureLogger, CapturedEntry};
pub use engine::EngineLogger;
pub use noop::NoopLogger;
