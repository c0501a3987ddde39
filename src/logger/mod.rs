//! Named logger that fans records out to its sinks, directly or through the
//! async dispatch queue. The sync/async choice is fixed at construction.

mod builder;

pub use builder::LoggerBuilder;

use crate::dispatch::{AsyncDispatch, ErrorHandler};
use crate::error::Error;
use crate::fmt::Formatter;
use crate::level::Level;
use crate::sink::{LogRecord, Sink};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

pub struct Logger {
    name: String,
    level: AtomicU8,
    /// A logger that set its own level stops following registry defaults.
    level_overridden: AtomicBool,
    /// Shared with the async worker so flush-on applies on both paths.
    flush_level: Arc<AtomicU8>,
    flush_overridden: AtomicBool,
    sinks: Vec<Arc<dyn Sink>>,
    dispatch: Option<AsyncDispatch>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("sinks", &self.sinks.len())
            .field("async", &self.dispatch.is_some())
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Entry point for programmatic construction; the registry drives this
    /// through `get_or_create`.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }

    pub(crate) fn from_parts(
        name: String,
        level: Level,
        level_overridden: bool,
        flush_level: Arc<AtomicU8>,
        flush_overridden: bool,
        sinks: Vec<Arc<dyn Sink>>,
        dispatch: Option<AsyncDispatch>,
    ) -> Self {
        Self {
            name,
            level: AtomicU8::new(level.repr()),
            level_overridden: AtomicBool::new(level_overridden),
            flush_level,
            flush_overridden: AtomicBool::new(flush_overridden),
            sinks,
            dispatch,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn level(&self) -> Level {
        Level::from_repr(self.level.load(Ordering::Relaxed))
    }

    /// Numeric form of the current level, for host-facing surfaces.
    #[must_use]
    pub fn level_index(&self) -> i64 {
        self.level().index()
    }

    pub fn set_level(&self, level: Level) {
        self.level.store(level.repr(), Ordering::Relaxed);
        self.level_overridden.store(true, Ordering::Relaxed);
    }

    /// Validates a host-supplied integer before mutating anything.
    ///
    /// # Errors
    /// `Error::InvalidLevel` when out of range; the current level is unchanged.
    pub fn set_level_index(&self, value: i64) -> Result<(), Error> {
        let level = Level::from_index(value)?;
        self.set_level(level);
        Ok(())
    }

    /// Minimum severity that forces an immediate flush of every sink.
    #[must_use]
    pub fn flush_on(&self) -> Level {
        Level::from_repr(self.flush_level.load(Ordering::Relaxed))
    }

    pub fn set_flush_on(&self, level: Level) {
        self.flush_level.store(level.repr(), Ordering::Relaxed);
        self.flush_overridden.store(true, Ordering::Relaxed);
    }

    /// Registry defaults only reach loggers that never set their own level.
    pub(crate) fn apply_default_level(&self, level: Level) {
        if !self.level_overridden.load(Ordering::Relaxed) {
            self.level.store(level.repr(), Ordering::Relaxed);
        }
    }

    pub(crate) fn apply_default_flush_on(&self, level: Level) {
        if !self.flush_overridden.load(Ordering::Relaxed) {
            self.flush_level.store(level.repr(), Ordering::Relaxed);
        }
    }

    /// Core emit operation. No-op below the logger threshold; otherwise the
    /// record goes to every sink in order (sync) or onto the queue (async).
    ///
    /// # Errors
    /// Sync loggers surface the first sink error; async loggers surface
    /// enqueue failures (`Shutdown`). Either way the logger stays usable.
    pub fn log(&self, level: Level, message: &str) -> Result<(), Error> {
        if level < self.level() || level == Level::Off {
            return Ok(());
        }
        let record = LogRecord::new(&self.name, level, message);

        match &self.dispatch {
            Some(dispatch) => dispatch.enqueue(record),
            None => self.sink_direct(&record),
        }
    }

    fn sink_direct(&self, record: &LogRecord) -> Result<(), Error> {
        let mut result = Ok(());
        for sink in &self.sinks {
            if let Err(e) = sink.log(record) {
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }
        if record.level >= self.flush_on() {
            for sink in &self.sinks {
                if let Err(e) = sink.flush() {
                    if result.is_ok() {
                        result = Err(e);
                    }
                }
            }
        }
        result
    }

    /// # Errors
    /// See [`Logger::log`].
    pub fn trace(&self, message: &str) -> Result<(), Error> {
        self.log(Level::Trace, message)
    }

    /// # Errors
    /// See [`Logger::log`].
    pub fn debug(&self, message: &str) -> Result<(), Error> {
        self.log(Level::Debug, message)
    }

    /// # Errors
    /// See [`Logger::log`].
    pub fn info(&self, message: &str) -> Result<(), Error> {
        self.log(Level::Info, message)
    }

    /// # Errors
    /// See [`Logger::log`].
    pub fn warn(&self, message: &str) -> Result<(), Error> {
        self.log(Level::Warn, message)
    }

    /// # Errors
    /// See [`Logger::log`].
    pub fn error(&self, message: &str) -> Result<(), Error> {
        self.log(Level::Error, message)
    }

    /// # Errors
    /// See [`Logger::log`].
    pub fn critical(&self, message: &str) -> Result<(), Error> {
        self.log(Level::Critical, message)
    }

    /// Flushes every sink. For an async logger this drains the queue up to
    /// the point of the call first; flush is a barrier, not a bypass.
    ///
    /// # Errors
    /// The first flush error observed, `Error::Shutdown` if the worker is gone.
    pub fn flush(&self) -> Result<(), Error> {
        if let Some(dispatch) = &self.dispatch {
            dispatch.flush()?;
        }
        let mut result = Ok(());
        for sink in &self.sinks {
            if let Err(e) = sink.flush() {
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }
        result
    }

    /// Installs a new pattern on every sink. The parse fails fast, before any
    /// sink is touched.
    ///
    /// # Errors
    /// `Error::InvalidPattern` on an unknown placeholder.
    pub fn set_pattern(&self, pattern: &str) -> Result<(), Error> {
        let formatter = Formatter::pattern(pattern)?;
        for sink in &self.sinks {
            sink.set_formatter(formatter.clone());
        }
        Ok(())
    }

    /// Installs the void formatter on every sink, silencing formatted output
    /// without removing any sink.
    pub fn clear_formatters(&self) {
        for sink in &self.sinks {
            sink.set_formatter(Formatter::void());
        }
    }

    /// Attaches a callback for sink errors on the async worker. No-op for a
    /// synchronous logger, which surfaces errors directly from `log`.
    pub fn set_error_handler(&self, handler: ErrorHandler) {
        if let Some(dispatch) = &self.dispatch {
            dispatch.set_error_handler(handler);
        }
    }

    /// Sinks attached to this logger, in emission order.
    #[must_use]
    pub fn sinks(&self) -> &[Arc<dyn Sink>] {
        &self.sinks
    }
}
