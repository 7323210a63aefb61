//! Ring Logger
//!
//! `log` backend for browser apps: every record goes to the devtools console
//! and the most recent lines are kept in a fixed-size ring buffer so they can
//! be shown or copied from inside the app.

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Default number of lines kept in memory
pub const DEFAULT_CAPACITY: usize = 500;

static LOGGER: OnceLock<RingLogger> = OnceLock::new();

/// Console logger with circular buffer
pub struct RingLogger {
    level: LevelFilter,
    capacity: usize,
    lines: Mutex<VecDeque<String>>,
}

impl RingLogger {
    pub fn new(level: LevelFilter, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            level,
            capacity,
            lines: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// Buffered lines, oldest first
    pub fn recent(&self) -> Vec<String> {
        self.buffer().iter().cloned().collect()
    }

    pub fn clear(&self) {
        self.buffer().clear();
    }

    fn buffer(&self) -> std::sync::MutexGuard<'_, VecDeque<String>> {
        // A panic while holding the lock only loses log lines
        self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, line: String) {
        let mut lines = self.buffer();
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }
}

impl Log for RingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "{} {:<5} [{}] {}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        );
        write_console(record.level(), &line);
        self.push(line);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn write_console(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&value),
        Level::Warn => web_sys::console::warn_1(&value),
        Level::Info => web_sys::console::info_1(&value),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(level: Level, line: &str) {
    if level <= Level::Warn {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

/// Install the global logger. Only the first call decides level and capacity.
pub fn init(level: LevelFilter, capacity: usize) -> Result<&'static RingLogger, SetLoggerError> {
    let logger = LOGGER.get_or_init(|| RingLogger::new(level, capacity));
    log::set_logger(logger)?;
    log::set_max_level(logger.level());
    Ok(logger)
}

/// The installed logger, if `init` has run
pub fn logger() -> Option<&'static RingLogger> {
    LOGGER.get()
}

/// Buffered lines of the installed logger, empty before `init`
pub fn recent_lines() -> Vec<String> {
    logger().map(RingLogger::recent).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit(logger: &RingLogger, level: Level, msg: &str) {
        logger.log(
            &Record::builder()
                .args(format_args!("{}", msg))
                .level(level)
                .target("test")
                .build(),
        );
    }

    #[test]
    fn test_keeps_only_latest_lines() {
        let logger = RingLogger::new(LevelFilter::Trace, 3);
        for i in 0..5 {
            emit(&logger, Level::Info, &format!("line {}", i));
        }

        let lines = logger.recent();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("line 2"));
        assert!(lines[2].ends_with("line 4"));
    }

    #[test]
    fn test_filters_below_level() {
        let logger = RingLogger::new(LevelFilter::Warn, 10);
        emit(&logger, Level::Info, "quiet");
        emit(&logger, Level::Error, "loud");

        let lines = logger.recent();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("ERROR"));
        assert!(lines[0].contains("[test]"));
    }

    #[test]
    fn test_clear_and_zero_capacity() {
        let logger = RingLogger::new(LevelFilter::Info, 0);
        emit(&logger, Level::Info, "a");
        emit(&logger, Level::Info, "b");
        assert_eq!(logger.recent().len(), 1);

        logger.clear();
        assert!(logger.recent().is_empty());
    }

    #[test]
    fn test_installed_logger_reads_back() {
        assert!(recent_lines().is_empty());

        let installed = init(LevelFilter::Debug, 4).unwrap();
        log::debug!(target: "app", "rules loaded");
        log::trace!(target: "app", "too chatty");

        assert!(std::ptr::eq(installed, logger().unwrap()));
        let lines = recent_lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("[app] rules loaded"));
        assert!(init(LevelFilter::Info, 4).is_err());

        installed.clear();
        assert!(recent_lines().is_empty());
    }
}
