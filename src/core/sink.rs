//! Sink trait for encoded log output and the fan-out that combines sinks

use super::error::Result;
use std::io::Write;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// A destination for encoded log lines
pub trait Sink: Send {
    fn write_all(&mut self, bytes: &[u8]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write_all(bytes)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Adapts any `io::Write` into a sink
///
/// ```
/// use rust_log_facade::{Sink, WriterSink};
///
/// let mut sink = WriterSink::new(Vec::new());
/// sink.write_all(b"hello\n").unwrap();
/// assert_eq!(sink.into_inner(), b"hello\n");
/// ```
pub struct WriterSink<W: Write + Send> {
    writer: W,
    name: String,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self::named(writer, "writer")
    }

    pub fn named(writer: W, name: impl Into<String>) -> Self {
        Self {
            writer,
            name: name.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Ordered set of sinks receiving every record
///
/// **Per-sink isolation**: a sink that errors or panics is reported on stderr
/// and the remaining sinks still receive the record.
#[derive(Default)]
pub struct FanOut {
    sinks: Vec<Box<dyn Sink>>,
}

impl FanOut {
    pub fn new(sinks: Vec<Box<dyn Sink>>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: Box<dyn Sink>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.sinks.iter().map(|s| s.name().to_string()).collect()
    }

    /// Write to every sink, returning the number of sinks that failed
    pub fn write_all(&mut self, bytes: &[u8]) -> usize {
        let mut failures = 0;

        for (idx, sink) in self.sinks.iter_mut().enumerate() {
            match catch_unwind(AssertUnwindSafe(|| sink.write_all(bytes))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Sink #{} ({}) failed: {}", idx, sink.name(), e);
                    failures += 1;
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Sink #{} ({}) panicked: {}. \
                         Other sinks continue to function.",
                        idx,
                        sink.name(),
                        panic_message(panic_info.as_ref())
                    );
                    failures += 1;
                }
            }
        }

        failures
    }

    /// Flush every sink, returning the number of sinks that failed
    pub fn flush(&mut self) -> usize {
        let mut failures = 0;

        for (idx, sink) in self.sinks.iter_mut().enumerate() {
            match catch_unwind(AssertUnwindSafe(|| sink.flush())) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Sink #{} ({}) flush failed: {}", idx, sink.name(), e);
                    failures += 1;
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Sink #{} ({}) panicked during flush: {}",
                        idx,
                        sink.name(),
                        panic_message(panic_info.as_ref())
                    );
                    failures += 1;
                }
            }
        }

        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LoggerError;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct FailingSink;

    impl Sink for FailingSink {
        fn write_all(&mut self, _bytes: &[u8]) -> Result<()> {
            Err(LoggerError::sink("simulated failure"))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct PanickingSink;

    impl Sink for PanickingSink {
        fn write_all(&mut self, _bytes: &[u8]) -> Result<()> {
            panic!("sink exploded");
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    #[test]
    fn test_fan_out_writes_to_every_sink() {
        let a = Shared::default();
        let b = Shared::default();
        let mut fan_out = FanOut::new(vec![
            Box::new(WriterSink::named(a.clone(), "a")),
            Box::new(WriterSink::named(b.clone(), "b")),
        ]);

        assert_eq!(fan_out.write_all(b"record\n"), 0);
        assert_eq!(fan_out.names(), vec!["a", "b"]);
        assert_eq!(a.0.lock().unwrap().as_slice(), b"record\n");
        assert_eq!(b.0.lock().unwrap().as_slice(), b"record\n");
    }

    #[test]
    fn test_failing_sinks_are_isolated() {
        let healthy = Shared::default();
        let mut fan_out = FanOut::default();
        fan_out.push(Box::new(FailingSink));
        fan_out.push(Box::new(PanickingSink));
        fan_out.push(Box::new(WriterSink::new(healthy.clone())));

        assert_eq!(fan_out.write_all(b"survives\n"), 2);
        assert_eq!(fan_out.flush(), 0);
        assert_eq!(healthy.0.lock().unwrap().as_slice(), b"survives\n");
    }
}
