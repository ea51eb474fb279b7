//! Sink implementations

pub mod console;
pub mod file;
pub mod memory;
pub mod rotating_file;

pub use console::{ConsoleSink, ConsoleTarget};
pub use file::FileSink;
pub use memory::MemorySink;
pub use rotating_file::{RotatingFileSink, RotationPolicy, RotationStrategy};

// Re-export the trait and writer adapter alongside the implementations
pub use crate::core::{Sink, WriterSink};
