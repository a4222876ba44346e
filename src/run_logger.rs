//! Per-run log file with a terminal mirror.
//!
//! Every run creates a fresh file under the logs directory, named after the
//! local wall-clock time the run started. Each line carries a UTC timestamp
//! and a level tag, and is echoed to stderr so interactive runs read the same
//! text that lands on disk. Logging is best effort: once the file is open, a
//! failed write never aborts the run.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};

/// Directory that collects one log file per run, relative to the working
/// directory.
pub const LOGS_DIR: &str = "logs";

#[derive(Debug, Clone, Copy)]
enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

pub struct RunLogger {
    file: Mutex<File>,
}

impl RunLogger {
    /// Creates the logs directory if needed and opens this run's log file.
    pub fn create(logs_dir: &Path) -> Result<Self> {
        fs::create_dir_all(logs_dir)
            .with_context(|| format!("Failed to create log directory {}", logs_dir.display()))?;
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let path = logs_dir.join(format!("{}.log", stamp));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.write(LogLevel::Info, message.as_ref());
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.write(LogLevel::Warn, message.as_ref());
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.write(LogLevel::Error, message.as_ref());
    }

    fn write(&self, level: LogLevel, message: &str) {
        let line = format!("[{}] [{}] {}", format_timestamp(), level.as_str(), message);
        eprintln!("{}", line);
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{}", line);
            let _ = file.flush();
        }
    }
}

fn format_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn log_contents(logs_dir: &Path) -> String {
        let mut entries: Vec<_> = fs::read_dir(logs_dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        entries.sort();
        assert_eq!(entries.len(), 1, "expected exactly one log file per run");
        fs::read_to_string(&entries[0]).unwrap()
    }

    #[test]
    fn create_makes_logs_directory_and_file() {
        let dir = TempDir::new().unwrap();
        let logs_dir = dir.path().join("logs");
        let logger = RunLogger::create(&logs_dir).unwrap();
        logger.info("hello");
        assert!(logs_dir.is_dir());
        let contents = log_contents(&logs_dir);
        assert!(contents.contains("hello"));
    }

    #[test]
    fn lines_carry_level_tags_and_utc_timestamps() {
        let dir = TempDir::new().unwrap();
        let logs_dir = dir.path().join("logs");
        let logger = RunLogger::create(&logs_dir).unwrap();
        logger.info("first");
        logger.warn("second");
        logger.error("third");
        let contents = log_contents(&logs_dir);
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("[INFO] first"));
        assert!(lines[1].contains("[WARN] second"));
        assert!(lines[2].contains("[ERROR] third"));
        for line in lines {
            assert!(line.starts_with('['));
            assert!(line.contains("Z] ["));
        }
    }

    #[test]
    fn log_file_name_has_timestamp_shape() {
        let dir = TempDir::new().unwrap();
        let logs_dir = dir.path().join("logs");
        let _logger = RunLogger::create(&logs_dir).unwrap();
        let entries: Vec<_> = fs::read_dir(&logs_dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].ends_with(".log"));
        // YYYYMMDD-HHMMSS.log
        assert_eq!(entries[0].len(), "20250101-120000.log".len());
    }
}
