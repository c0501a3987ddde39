//! Stepwise construction of a logger. Validation happens in `build`, before
//! any registry entry exists; pattern parsing happens at set time.

use super::Logger;
use crate::dispatch::{AsyncDispatch, OverflowPolicy};
use crate::error::Error;
use crate::fmt::Formatter;
use crate::level::Level;
use crate::sink::{ConsoleSink, RotatingFileSink, Sink};
use std::sync::Arc;
use std::sync::atomic::AtomicU8;

pub struct LoggerBuilder {
    name: String,
    level: Option<Level>,
    flush_on: Option<Level>,
    sinks: Vec<Arc<dyn Sink>>,
    formatter: Option<Formatter>,
    async_queue: Option<(usize, OverflowPolicy)>,
    flush_on_shutdown: bool,
}

impl LoggerBuilder {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: None,
            flush_on: None,
            sinks: Vec::new(),
            formatter: None,
            async_queue: None,
            flush_on_shutdown: true,
        }
    }

    /// Explicit level; the logger stops following registry defaults.
    #[must_use]
    pub fn level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Minimum severity that triggers an immediate flush after the record.
    #[must_use]
    pub fn flush_on(mut self, level: Level) -> Self {
        self.flush_on = Some(level);
        self
    }

    /// Adds a console sink.
    #[must_use]
    pub fn console(mut self) -> Self {
        self.sinks.push(Arc::new(ConsoleSink::new()));
        self
    }

    /// Adds a rotating file sink.
    ///
    /// # Errors
    /// `Error::InvalidArgument` for bad size parameters, `Error::Io` when the
    /// file cannot be opened.
    pub fn rotating_file(
        mut self,
        path: &str,
        max_size: u64,
        max_files: usize,
    ) -> Result<Self, Error> {
        self.sinks
            .push(Arc::new(RotatingFileSink::new(path, max_size, max_files)?));
        Ok(self)
    }

    /// Adds an externally built sink; an `Arc` shared with another logger
    /// lives as long as its longest holder.
    #[must_use]
    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Initial pattern for every sink. Parsed here, so unknown placeholders
    /// fail before the logger exists.
    ///
    /// # Errors
    /// `Error::InvalidPattern` on an unknown placeholder.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, Error> {
        self.formatter = Some(Formatter::pattern(pattern)?);
        Ok(self)
    }

    /// Routes records through a bounded queue and background worker instead
    /// of writing on the calling thread. Fixed for the logger's lifetime.
    #[must_use]
    pub fn async_dispatch(mut self, capacity: usize, policy: OverflowPolicy) -> Self {
        self.async_queue = Some((capacity, policy));
        self
    }

    /// Whether queued records are drained (true) or discarded (false) when
    /// the logger shuts down.
    #[must_use]
    pub fn flush_on_shutdown(mut self, flush: bool) -> Self {
        self.flush_on_shutdown = flush;
        self
    }

    /// Builds with the crate defaults (`Info`, flush-on `Off`).
    ///
    /// # Errors
    /// `Error::InvalidArgument` for an empty name or an empty sink list, plus
    /// anything worker spawning can raise.
    pub fn build(self) -> Result<Logger, Error> {
        self.build_with_defaults(Level::Info, Level::Off)
    }

    /// Builds, filling unset thresholds from registry defaults. Explicitly
    /// set thresholds are marked overridden so later global changes skip them.
    ///
    /// # Errors
    /// See [`LoggerBuilder::build`].
    pub fn build_with_defaults(
        self,
        default_level: Level,
        default_flush_on: Level,
    ) -> Result<Logger, Error> {
        if self.name.is_empty() {
            return Err(Error::InvalidArgument(
                "logger name must not be empty".to_string(),
            ));
        }
        if self.sinks.is_empty() {
            return Err(Error::InvalidArgument(format!(
                "logger '{}' needs at least one sink",
                self.name
            )));
        }

        if let Some(formatter) = &self.formatter {
            for sink in &self.sinks {
                sink.set_formatter(formatter.clone());
            }
        }

        let level_overridden = self.level.is_some();
        let flush_overridden = self.flush_on.is_some();
        let level = self.level.unwrap_or(default_level);
        let flush_on = self.flush_on.unwrap_or(default_flush_on);
        let flush_level = Arc::new(AtomicU8::new(flush_on.repr()));

        let dispatch = match self.async_queue {
            Some((capacity, policy)) => Some(AsyncDispatch::spawn(
                &self.name,
                self.sinks.clone(),
                Arc::clone(&flush_level),
                capacity,
                policy,
                self.flush_on_shutdown,
            )?),
            None => None,
        };

        Ok(Logger::from_parts(
            self.name,
            level,
            level_overridden,
            flush_level,
            flush_overridden,
            self.sinks,
            dispatch,
        ))
    }
}
