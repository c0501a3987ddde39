//! Process-wide mapping from logger name to logger instance.
//!
//! The registry is the crate's single piece of global mutable state; all
//! mutating operations go through one registry-wide lock. A `Registry` is an
//! ordinary value, so tests build their own instead of touching the global.

use crate::error::Error;
use crate::internal;
use crate::level::Level;
use crate::logger::{Logger, LoggerBuilder};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

struct Inner {
    loggers: HashMap<String, Arc<Logger>>,
    default_level: Level,
    default_flush_on: Level,
}

pub struct Registry {
    inner: Mutex<Inner>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                loggers: HashMap::new(),
                default_level: Level::Info,
                default_flush_on: Level::Off,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the logger registered under `name`, or builds and registers a
    /// new one. When the name is taken the `configure` closure is never
    /// called: construction is not a reconfiguration call.
    ///
    /// # Errors
    /// Whatever `configure` or the build raises for a new logger.
    pub fn get_or_create<F>(&self, name: &str, configure: F) -> Result<Arc<Logger>, Error>
    where
        F: FnOnce(LoggerBuilder) -> Result<LoggerBuilder, Error>,
    {
        let mut inner = self.lock();
        if let Some(logger) = inner.loggers.get(name) {
            return Ok(Arc::clone(logger));
        }

        let builder = configure(Logger::builder(name))?;
        let logger = Arc::new(
            builder.build_with_defaults(inner.default_level, inner.default_flush_on)?,
        );
        inner.loggers.insert(name.to_string(), Arc::clone(&logger));
        Ok(logger)
    }

    /// # Errors
    /// `Error::NotFound` when no logger is registered under `name`.
    pub fn get(&self, name: &str) -> Result<Arc<Logger>, Error> {
        self.lock()
            .loggers
            .get(name)
            .cloned()
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    /// Removes and finalizes the named logger; no-op if absent. Teardown
    /// never fails the caller, so flush errors are swallowed.
    pub fn drop(&self, name: &str) {
        let removed = self.lock().loggers.remove(name);
        if let Some(logger) = removed {
            // Flush outside the registry lock; an async drain can block.
            if let Err(e) = logger.flush() {
                internal::error("REGISTRY", &format!("flush on drop of '{name}': {e}"));
            }
        }
    }

    /// Drops every registered logger.
    pub fn drop_all(&self) {
        let drained: Vec<(String, Arc<Logger>)> = self.lock().loggers.drain().collect();
        for (name, logger) in drained {
            if let Err(e) = logger.flush() {
                internal::error("REGISTRY", &format!("flush on drop of '{name}': {e}"));
            }
        }
    }

    /// Default threshold for loggers created later, also re-stamped onto
    /// every registered logger that has not set its own level.
    pub fn set_default_level(&self, level: Level) {
        let inner = &mut *self.lock();
        inner.default_level = level;
        for logger in inner.loggers.values() {
            logger.apply_default_level(level);
        }
    }

    /// Default flush-on threshold, with the same override semantics as
    /// `set_default_level`.
    pub fn set_flush_on(&self, level: Level) {
        let inner = &mut *self.lock();
        inner.default_flush_on = level;
        for logger in inner.loggers.values() {
            logger.apply_default_flush_on(level);
        }
    }

    #[must_use]
    pub fn default_level(&self) -> Level {
        self.lock().default_level
    }

    #[must_use]
    pub fn default_flush_on(&self) -> Level {
        self.lock().default_flush_on
    }

    /// Number of registered loggers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().loggers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().loggers.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// The process-wide registry, lazily initialized at first use.
pub fn global() -> &'static Registry {
    GLOBAL.get_or_init(Registry::new)
}
