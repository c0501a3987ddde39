//! Destinations that persist or display formatted records.
//!
//! The two built-in sinks (console, rotating file) can't cover every use
//! case; the `Sink` trait lets callers add custom destinations and share one
//! sink between loggers through an `Arc`.

mod console;
mod rotating;

pub use console::ConsoleSink;
pub use rotating::RotatingFileSink;

use crate::error::Error;
use crate::fmt::Formatter;
use crate::level::Level;
use chrono::{DateTime, Local};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU8, Ordering};

/// One log call, frozen at the call site. Never mutated afterwards.
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Name of the logger that produced the record.
    pub logger: String,
    pub level: Level,
    /// Captured when the record is created, not when it is sunk.
    pub timestamp: DateTime<Local>,
    pub message: String,
}

impl LogRecord {
    #[must_use]
    pub fn new(logger: &str, level: Level, message: &str) -> Self {
        Self {
            logger: logger.to_string(),
            level,
            timestamp: Local::now(),
            message: message.to_string(),
        }
    }
}

/// `Send + Sync` bounds enable concurrent logging from multiple threads; each
/// sink serializes its own writes internally.
pub trait Sink: Send + Sync {
    /// Formats and persists one record. Records below the sink's threshold
    /// are skipped silently.
    ///
    /// # Errors
    /// I/O errors from the underlying destination. The sink stays usable
    /// afterwards; the failed record is lost, not retried.
    fn log(&self, record: &LogRecord) -> Result<(), Error>;

    /// Forces buffered bytes to stable storage. Idempotent, safe to call
    /// concurrently with `log`.
    ///
    /// # Errors
    /// I/O errors from the underlying destination.
    fn flush(&self) -> Result<(), Error>;

    /// Current severity threshold of this sink.
    fn level(&self) -> Level;

    /// Replaces the severity threshold.
    fn set_level(&self, level: Level);

    /// Replaces the active formatter. Exactly one formatter is active at any time.
    fn set_formatter(&self, formatter: Formatter);
}

/// Threshold and formatter state shared by the built-in sinks.
pub(crate) struct SinkCore {
    level: AtomicU8,
    formatter: Mutex<Formatter>,
}

impl SinkCore {
    pub(crate) fn new() -> Self {
        Self {
            level: AtomicU8::new(Level::Trace.repr()),
            formatter: Mutex::new(Formatter::default()),
        }
    }

    pub(crate) fn enabled(&self, level: Level) -> bool {
        level >= self.level()
    }

    pub(crate) fn level(&self) -> Level {
        Level::from_repr(self.level.load(Ordering::Relaxed))
    }

    pub(crate) fn set_level(&self, level: Level) {
        self.level.store(level.repr(), Ordering::Relaxed);
    }

    pub(crate) fn set_formatter(&self, formatter: Formatter) {
        let mut guard = self
            .formatter
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = formatter;
    }

    /// Renders through the active formatter, `None` when the void formatter
    /// is installed.
    pub(crate) fn format(&self, record: &LogRecord) -> Option<String> {
        let guard = self
            .formatter
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        guard.render(record)
    }
}
