//! Lifecycle event log.
//!
//! The simulation never touches the filesystem itself; callers inject an
//! [`EventSink`] into scene construction and the driver. Each record is one
//! line of the form `<timestamp>: <message>`.

use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Timestamp layout used for file records.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Destination for lifecycle messages.
pub trait EventSink {
    fn record(&mut self, message: &str);
}

/// Discards every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEventLog;

impl EventSink for NullEventLog {
    fn record(&mut self, _message: &str) {}
}

/// Keeps messages in memory, in order.
#[derive(Debug, Default, Clone)]
pub struct MemoryEventLog {
    pub messages: Vec<String>,
}

impl EventSink for MemoryEventLog {
    fn record(&mut self, message: &str) {
        self.messages.push(message.to_owned());
    }
}

/// Appends timestamped lines to a file.
///
/// I/O failures are reported through `log::warn!` and otherwise ignored so a
/// broken log file never stops a running simulation.
#[derive(Debug, Clone)]
pub struct FileEventLog {
    path: PathBuf,
}

impl FileEventLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn append(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}

/// Render a single log line for `message` stamped with the current local time.
pub fn format_record(message: &str) -> String {
    format!("{}: {}\n", Local::now().format(TIMESTAMP_FORMAT), message)
}

impl EventSink for FileEventLog {
    fn record(&mut self, message: &str) {
        log::info!("{message}");
        if let Err(e) = self.append(&format_record(message)) {
            log::warn!("event log {} not written: {e}", self.path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_log_keeps_order() {
        let mut log = MemoryEventLog::default();
        log.record("first");
        log.record("second");
        assert_eq!(log.messages, vec!["first", "second"]);
    }

    #[test]
    fn record_line_shape() {
        let line = format_record("Simulation started");
        assert!(line.ends_with(": Simulation started\n"));
        // "YYYY-MM-DD HH:MM:SS.ffffff"
        let stamp = line.split(": ").next().unwrap_or_default();
        assert_eq!(stamp.len(), 26);
        assert_eq!(&stamp[4..5], "-");
        assert_eq!(&stamp[10..11], " ");
    }

    #[test]
    fn file_log_appends() -> std::io::Result<()> {
        let path = std::env::temp_dir().join(format!(
            "pistonsim_event_log_{}.txt",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        let mut log = FileEventLog::new(&path);
        log.record("one");
        log.record("two");
        let text = std::fs::read_to_string(&path)?;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(": one"));
        assert!(lines[1].ends_with(": two"));
        std::fs::remove_file(&path)
    }

    #[test]
    fn unwritable_path_does_not_panic() {
        let mut log = FileEventLog::new("/nonexistent-dir/definitely/missing/log.txt");
        log.record("ignored");
    }
}
