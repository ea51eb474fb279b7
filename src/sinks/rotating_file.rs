//! Rotating file sink
//!
//! Appends encoded lines to a file and rotates it according to a
//! [`RotationPolicy`]. Rotated files are kept as numbered backups next to the
//! active file (`runtime.log.1`, `runtime.log.2`, ...), the lowest number
//! being the most recent, optionally gzip-compressed (`runtime.log.1.gz`).

use crate::core::error::{LoggerError, Result};
use crate::core::sink::Sink;
use chrono::{DateTime, Local, Timelike};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// When to rotate the active file
///
/// # Examples
///
/// ```
/// use rust_log_facade::sinks::RotationStrategy;
/// use std::time::Duration;
///
/// // Rotate when file exceeds 100 MB
/// let size_strategy = RotationStrategy::size(100 * 1024 * 1024);
///
/// // Rotate on size OR time, whichever comes first
/// let hybrid_strategy = RotationStrategy::hybrid(50 * 1024 * 1024, Duration::from_secs(24 * 3600));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RotationStrategy {
    /// Rotate when a write would push the file past `max_bytes`
    Size { max_bytes: u64 },

    /// Rotate at time interval
    Time { interval: Duration },

    /// Rotate daily at specified local hour (0-23)
    Daily { hour: u8 },

    /// Rotate hourly
    Hourly,

    /// Rotate on size OR time, whichever comes first
    Hybrid { max_bytes: u64, interval: Duration },

    /// No rotation
    Never,
}

impl Default for RotationStrategy {
    fn default() -> Self {
        RotationStrategy::Size {
            max_bytes: 100 * 1024 * 1024,
        }
    }
}

impl RotationStrategy {
    #[must_use]
    pub fn size(max_bytes: u64) -> Self {
        RotationStrategy::Size { max_bytes }
    }

    #[must_use]
    pub fn time(interval: Duration) -> Self {
        RotationStrategy::Time { interval }
    }

    /// Create a daily rotation strategy
    ///
    /// # Panics
    ///
    /// Panics if hour is greater than 23
    #[must_use]
    pub fn daily(hour: u8) -> Self {
        assert!(hour <= 23, "Hour must be between 0 and 23");
        RotationStrategy::Daily { hour }
    }

    #[must_use]
    pub fn hourly() -> Self {
        RotationStrategy::Hourly
    }

    #[must_use]
    pub fn hybrid(max_bytes: u64, interval: Duration) -> Self {
        RotationStrategy::Hybrid { max_bytes, interval }
    }

    #[must_use]
    pub fn never() -> Self {
        RotationStrategy::Never
    }
}

/// Rotation strategy plus backup retention
#[derive(Debug, Clone)]
pub struct RotationPolicy {
    pub strategy: RotationStrategy,
    /// Maximum number of rotated files to keep
    pub max_backup_files: usize,
    /// Whether to gzip rotated files
    pub compress: bool,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            strategy: RotationStrategy::default(),
            max_backup_files: 5,
            compress: false,
        }
    }
}

impl RotationPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_strategy(mut self, strategy: RotationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Shorthand for `with_strategy(RotationStrategy::Size { max_bytes: size })`
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_size(mut self, size: u64) -> Self {
        self.strategy = RotationStrategy::Size { max_bytes: size };
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_backups(mut self, count: usize) -> Self {
        self.max_backup_files = count;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }

    /// Size limit, if the strategy has one
    #[must_use]
    pub fn max_file_size(&self) -> Option<u64> {
        match &self.strategy {
            RotationStrategy::Size { max_bytes } => Some(*max_bytes),
            RotationStrategy::Hybrid { max_bytes, .. } => Some(*max_bytes),
            _ => None,
        }
    }
}

/// File sink with automatic rotation
///
/// ```no_run
/// use rust_log_facade::sinks::{RotatingFileSink, RotationPolicy, RotationStrategy};
///
/// let policy = RotationPolicy::new()
///     .with_strategy(RotationStrategy::Daily { hour: 0 })
///     .with_max_backups(7)
///     .with_compression(true);
/// let sink = RotatingFileSink::with_policy("logs/runtime.log", policy).unwrap();
/// ```
pub struct RotatingFileSink {
    base_path: PathBuf,
    policy: RotationPolicy,
    writer: Option<BufWriter<File>>,
    current_size: u64,
    last_rotation: SystemTime,
}

impl RotatingFileSink {
    /// Open with the default policy (100 MB, 5 backups, no compression)
    ///
    /// # Errors
    ///
    /// Returns error if the parent directory or the file cannot be created
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_policy(path, RotationPolicy::default())
    }

    /// # Errors
    ///
    /// Returns error if the parent directory or the file cannot be created
    pub fn with_policy<P: AsRef<Path>>(path: P, policy: RotationPolicy) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();

        if let Some(parent) = base_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::io_operation(
                    "create log directory",
                    format!("Failed to create directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let (file, current_size, last_rotation) = Self::open_file(&base_path)?;

        Ok(Self {
            base_path,
            policy,
            writer: Some(BufWriter::new(file)),
            current_size,
            last_rotation,
        })
    }

    fn open_file(path: &Path) -> Result<(File, u64, SystemTime)> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::file_sink(path.display().to_string(), format!("Failed to open: {}", e))
            })?;

        let metadata = file.metadata().map_err(|e| {
            LoggerError::file_sink(
                path.display().to_string(),
                format!("Cannot access file metadata: {}", e),
            )
        })?;
        let last_rotation = metadata.modified().unwrap_or_else(|_| SystemTime::now());

        Ok((file, metadata.len(), last_rotation))
    }

    fn elapsed_since_rotation(&self) -> Duration {
        SystemTime::now()
            .duration_since(self.last_rotation)
            .unwrap_or(Duration::ZERO)
    }

    fn exceeds(&self, max_bytes: u64, incoming: u64) -> bool {
        self.current_size > 0 && self.current_size + incoming > max_bytes
    }

    fn should_rotate(&self, incoming: u64) -> bool {
        match &self.policy.strategy {
            RotationStrategy::Never => false,
            RotationStrategy::Size { max_bytes } => self.exceeds(*max_bytes, incoming),
            RotationStrategy::Time { interval } => self.elapsed_since_rotation() >= *interval,
            RotationStrategy::Daily { hour } => {
                let now: DateTime<Local> = SystemTime::now().into();
                let last: DateTime<Local> = self.last_rotation.into();
                now.date_naive() != last.date_naive() && now.hour() >= u32::from(*hour)
            }
            RotationStrategy::Hourly => self.elapsed_since_rotation() >= Duration::from_secs(3600),
            RotationStrategy::Hybrid { max_bytes, interval } => {
                self.exceeds(*max_bytes, incoming) || self.elapsed_since_rotation() >= *interval
            }
        }
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let filename = self
            .base_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("runtime.log");
        self.base_path.with_file_name(format!("{}.{}", filename, index))
    }

    fn compressed(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_os_string();
        name.push(".gz");
        PathBuf::from(name)
    }

    fn rotate(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        let max = self.policy.max_backup_files;
        if max == 0 {
            // No backups kept: the rotated content is discarded
            fs::remove_file(&self.base_path).or_else(ignore_not_found)?;
        } else {
            for oldest in [self.backup_path(max), Self::compressed(&self.backup_path(max))] {
                fs::remove_file(&oldest).or_else(ignore_not_found)?;
            }

            for i in (1..max).rev() {
                for (from, to) in [
                    (self.backup_path(i), self.backup_path(i + 1)),
                    (
                        Self::compressed(&self.backup_path(i)),
                        Self::compressed(&self.backup_path(i + 1)),
                    ),
                ] {
                    if from.exists() {
                        fs::rename(&from, &to).map_err(|e| {
                            LoggerError::file_rotation(
                                from.display().to_string(),
                                format!("Failed to shift backup: {}", e),
                            )
                        })?;
                    }
                }
            }

            let first = self.backup_path(1);
            if self.base_path.exists() {
                fs::rename(&self.base_path, &first).map_err(|e| {
                    LoggerError::file_rotation(
                        self.base_path.display().to_string(),
                        format!("Failed to rotate current log file: {}", e),
                    )
                })?;

                if self.policy.compress {
                    Self::compress_file(&first)?;
                }
            }
        }

        let (file, size, _) = Self::open_file(&self.base_path)?;
        self.writer = Some(BufWriter::new(file));
        self.current_size = size;
        self.last_rotation = SystemTime::now();

        Ok(())
    }

    /// Gzip `path` into `path.gz`; the original is removed only after the
    /// compressed file is complete.
    fn compress_file(path: &Path) -> Result<()> {
        let gz_path = Self::compressed(path);
        let mut tmp_name = gz_path.as_os_str().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        let result = (|| -> std::io::Result<()> {
            let mut reader = BufReader::with_capacity(64 * 1024, File::open(path)?);
            let output = BufWriter::with_capacity(64 * 1024, File::create(&tmp_path)?);
            let mut encoder = GzEncoder::new(output, Compression::default());
            std::io::copy(&mut reader, &mut encoder)?;
            encoder.finish()?.flush()?;
            fs::rename(&tmp_path, &gz_path)
        })();

        if let Err(e) = result {
            let _ = fs::remove_file(&tmp_path);
            return Err(LoggerError::io_operation(
                "compress log file",
                format!("Failed to compress '{}'", path.display()),
                e,
            ));
        }

        if let Err(e) = fs::remove_file(path) {
            eprintln!(
                "[LOGGER WARNING] Compressed {} but failed to remove the original: {}",
                path.display(),
                e
            );
        }

        Ok(())
    }

    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.base_path
    }

    #[must_use]
    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }

    #[must_use]
    pub fn last_rotation(&self) -> SystemTime {
        self.last_rotation
    }
}

fn ignore_not_found(e: std::io::Error) -> std::io::Result<()> {
    if e.kind() == std::io::ErrorKind::NotFound {
        Ok(())
    } else {
        Err(e)
    }
}

impl Sink for RotatingFileSink {
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        let incoming = bytes.len() as u64;

        if self.should_rotate(incoming) {
            if let Err(e) = self.rotate() {
                eprintln!(
                    "[LOGGER WARNING] Log rotation failed: {}. Continuing with current file.",
                    e
                );

                if self.writer.is_none() {
                    let (file, size, last_rotation) = Self::open_file(&self.base_path)?;
                    self.writer = Some(BufWriter::new(file));
                    self.current_size = size;
                    self.last_rotation = last_rotation;
                }

                // Let the file grow past the limit instead of retrying on every write
                self.current_size = 0;
                self.last_rotation = SystemTime::now();
            }
        }

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::sink("Rotating file writer not initialized"))?;
        writer.write_all(bytes).map_err(|e| {
            LoggerError::file_sink(
                self.base_path.display().to_string(),
                format!("Failed to write log entry: {}", e),
            )
        })?;
        self.current_size += incoming;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush().map_err(|e| {
                LoggerError::file_sink(
                    self.base_path.display().to_string(),
                    format!("Failed to flush: {}", e),
                )
            })?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "rotating_file"
    }
}

impl Drop for RotatingFileSink {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;
    use std::thread;
    use tempfile::tempdir;

    fn line(i: usize) -> Vec<u8> {
        format!("Test message number {}\n", i).into_bytes()
    }

    #[test]
    fn test_rotation_strategy_constructors() {
        assert_eq!(RotationStrategy::size(1024), RotationStrategy::Size { max_bytes: 1024 });
        assert_eq!(RotationStrategy::daily(2), RotationStrategy::Daily { hour: 2 });
        assert_eq!(RotationStrategy::hourly(), RotationStrategy::Hourly);
        assert_eq!(RotationStrategy::never(), RotationStrategy::Never);
        assert_eq!(
            RotationStrategy::hybrid(1024, Duration::from_secs(3600)),
            RotationStrategy::Hybrid {
                max_bytes: 1024,
                interval: Duration::from_secs(3600)
            }
        );
    }

    #[test]
    #[should_panic(expected = "Hour must be between 0 and 23")]
    fn test_daily_strategy_invalid_hour() {
        let _ = RotationStrategy::daily(24);
    }

    #[test]
    fn test_rotation_policy_builder() {
        let policy = RotationPolicy::new()
            .with_max_size(1024)
            .with_max_backups(3)
            .with_compression(true);

        assert_eq!(policy.max_file_size(), Some(1024));
        assert_eq!(policy.max_backup_files, 3);
        assert!(policy.compress);

        let policy = RotationPolicy::new().with_strategy(RotationStrategy::Hourly);
        assert_eq!(policy.max_file_size(), None);
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("logs").join("nested").join("runtime.log");

        let sink = RotatingFileSink::new(&log_path).unwrap();
        assert_eq!(sink.path(), log_path);
        assert_eq!(sink.current_size(), 0);
        assert!(log_path.exists());
    }

    #[test]
    fn test_size_rotation_shifts_backups() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("rotation.log");
        let policy = RotationPolicy::new().with_max_size(100).with_max_backups(3);

        let mut sink = RotatingFileSink::with_policy(&log_path, policy).unwrap();
        for i in 0..20 {
            sink.write_all(&line(i)).unwrap();
        }
        sink.flush().unwrap();

        assert!(dir.path().join("rotation.log.1").exists());
        assert!(dir.path().join("rotation.log.3").exists());
        assert!(!dir.path().join("rotation.log.4").exists());
        assert!(fs::metadata(&log_path).unwrap().len() <= 100);

        // The newest content lives in the active file
        let active = fs::read_to_string(&log_path).unwrap();
        assert!(active.contains("Test message number 19"));
    }

    #[test]
    fn test_time_rotation() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("time_rotation.log");
        let policy = RotationPolicy::new()
            .with_strategy(RotationStrategy::time(Duration::from_millis(50)))
            .with_max_backups(3);

        let mut sink = RotatingFileSink::with_policy(&log_path, policy).unwrap();
        sink.write_all(b"Initial message\n").unwrap();
        sink.flush().unwrap();

        thread::sleep(Duration::from_millis(80));

        sink.write_all(b"After interval\n").unwrap();
        sink.flush().unwrap();

        let backup = fs::read_to_string(dir.path().join("time_rotation.log.1")).unwrap();
        assert_eq!(backup, "Initial message\n");
        assert_eq!(fs::read_to_string(&log_path).unwrap(), "After interval\n");
    }

    #[test]
    fn test_never_rotates() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("never.log");
        let policy = RotationPolicy::new().with_strategy(RotationStrategy::Never);

        let mut sink = RotatingFileSink::with_policy(&log_path, policy).unwrap();
        for i in 0..100 {
            sink.write_all(&line(i)).unwrap();
        }
        sink.flush().unwrap();

        assert!(!dir.path().join("never.log.1").exists());
        assert_eq!(fs::read_to_string(&log_path).unwrap().lines().count(), 100);
    }

    #[test]
    fn test_zero_backups_discards_rotated_content() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("zero.log");
        let policy = RotationPolicy::new().with_max_size(30).with_max_backups(0);

        let mut sink = RotatingFileSink::with_policy(&log_path, policy).unwrap();
        for i in 0..5 {
            sink.write_all(&line(i)).unwrap();
        }
        sink.flush().unwrap();

        let files = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(files, 1);
    }

    #[test]
    fn test_compressed_backups() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("compressed.log");
        let policy = RotationPolicy::new()
            .with_max_size(40)
            .with_max_backups(2)
            .with_compression(true);

        let mut sink = RotatingFileSink::with_policy(&log_path, policy).unwrap();
        for i in 0..4 {
            sink.write_all(&line(i)).unwrap();
        }
        sink.flush().unwrap();

        let gz_path = dir.path().join("compressed.log.1.gz");
        assert!(gz_path.exists());
        assert!(!dir.path().join("compressed.log.1").exists());

        let mut decoded = String::new();
        GzDecoder::new(File::open(gz_path).unwrap())
            .read_to_string(&mut decoded)
            .unwrap();
        assert!(decoded.starts_with("Test message number"));
    }

    #[test]
    fn test_reopen_keeps_existing_size() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("reopen.log");
        fs::write(&log_path, b"previous run\n").unwrap();

        let sink = RotatingFileSink::new(&log_path).unwrap();
        assert_eq!(sink.current_size(), 13);
    }
}
