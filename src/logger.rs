//! Custom logging module.
//!
//! This module provides a custom logger implementation that captures log entries
//! into a bounded buffer shared with the application state, which the log panel
//! displays.

use crate::error::AppResult;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::collections::VecDeque;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

/// Maximum number of entries kept before the oldest are dropped.
pub const MAX_LOG_ENTRIES: usize = 500;

/// Formatted log lines, oldest first.
pub type LogBuffer = Arc<Mutex<VecDeque<String>>>;

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {:<5} {}", timestamp, level_str, record.args())
}

/// Parse a configured level name, falling back to `Info`.
///
pub fn parse_level(name: &str) -> LevelFilter {
    LevelFilter::from_str(name.trim()).unwrap_or(LevelFilter::Info)
}

/// Custom logger that captures logs into a shared buffer
///
pub struct CustomLogger {
    buffer: LogBuffer,
    level: LevelFilter,
}

impl CustomLogger {
    pub fn new(buffer: LogBuffer, level: LevelFilter) -> Self {
        CustomLogger { buffer, level }
    }

    fn push(&self, entry: String) {
        // A poisoned buffer only loses log lines
        if let Ok(mut entries) = self.buffer.lock() {
            entries.push_back(entry);
            while entries.len() > MAX_LOG_ENTRIES {
                entries.pop_front();
            }
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.target().starts_with(env!("CARGO_CRATE_NAME"))
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.push(format_log(record));
        }
    }

    fn flush(&self) {}
}

/// Install the logger globally and return the buffer it writes to.
///
pub fn init(level: LevelFilter) -> AppResult<LogBuffer> {
    let buffer: LogBuffer = Arc::new(Mutex::new(VecDeque::new()));
    log::set_boxed_logger(Box::new(CustomLogger::new(Arc::clone(&buffer), level)))?;
    log::set_max_level(level);
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with<'a>(level: Level, args: std::fmt::Arguments<'a>) -> Record<'a> {
        Record::builder()
            .level(level)
            .target(env!("CARGO_CRATE_NAME"))
            .args(args)
            .build()
    }

    #[test]
    fn format_includes_level_and_message() {
        let line = format_log(&record_with(Level::Warn, format_args!("disk almost full")));
        assert!(line.contains("WARN"));
        assert!(line.ends_with("disk almost full"));
    }

    #[test]
    fn logger_respects_level() {
        let buffer: LogBuffer = Arc::new(Mutex::new(VecDeque::new()));
        let logger = CustomLogger::new(Arc::clone(&buffer), LevelFilter::Info);
        logger.log(&record_with(Level::Debug, format_args!("hidden")));
        logger.log(&record_with(Level::Info, format_args!("shown")));

        let entries = buffer.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].ends_with("shown"));
    }

    #[test]
    fn logger_ignores_other_crates() {
        let buffer: LogBuffer = Arc::new(Mutex::new(VecDeque::new()));
        let logger = CustomLogger::new(Arc::clone(&buffer), LevelFilter::Trace);
        let record = Record::builder()
            .level(Level::Info)
            .target("hyper::client")
            .args(format_args!("connection reused"))
            .build();
        logger.log(&record);
        assert!(buffer.lock().unwrap().is_empty());
    }

    #[test]
    fn buffer_is_bounded() {
        let buffer: LogBuffer = Arc::new(Mutex::new(VecDeque::new()));
        let logger = CustomLogger::new(Arc::clone(&buffer), LevelFilter::Info);
        for i in 0..MAX_LOG_ENTRIES + 10 {
            logger.log(&record_with(Level::Info, format_args!("entry {}", i)));
        }
        let entries = buffer.lock().unwrap();
        assert_eq!(entries.len(), MAX_LOG_ENTRIES);
        assert!(entries[0].ends_with("entry 10"));
    }

    #[test]
    fn parse_level_falls_back_to_info() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level(" WARN "), LevelFilter::Warn);
        assert_eq!(parse_level("loud"), LevelFilter::Info);
    }
}
