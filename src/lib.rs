#![forbid(unsafe_code)]

//! `rotolog` - structured logging with named loggers, size-rotated files and
//! async dispatch.
//!
//! Named loggers format leveled records and emit them to one or more sinks
//! (console, size-rotated files), optionally through a bounded queue and
//! background worker so producing threads never block on slow I/O.
//!
//! # Example
//!
//! ```no_run
//! use rotolog::Level;
//!
//! let logger = rotolog::rotating("app", "/tmp/app.log", 1024 * 1024, 3)?;
//! logger.set_level(Level::Debug);
//! logger.info("application started")?;
//! logger.error("connection failed")?;
//! logger.flush()?;
//! rotolog::drop("app");
//! # Ok::<(), rotolog::Error>(())
//! ```
//!
//! Loggers live in a process-wide registry; `rotating("app", ...)` called
//! twice returns the same logger and never opens a duplicate file handle.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod fmt;
mod internal;
pub mod level;
pub mod logger;
pub mod registry;
pub mod sink;

pub use config::Config;
pub use dispatch::{AsyncDispatch, DEFAULT_QUEUE_CAPACITY, OverflowPolicy};
pub use error::Error;
pub use fmt::{FormatTemplate, Formatter};
pub use level::Level;
pub use logger::{Logger, LoggerBuilder};
pub use registry::Registry;
pub use sink::{ConsoleSink, LogRecord, RotatingFileSink, Sink};

use std::sync::Arc;

/// Gets or creates a synchronous console logger in the global registry.
///
/// # Errors
/// `Error::InvalidArgument` for an empty name.
pub fn console(name: &str) -> Result<Arc<Logger>, Error> {
    registry::global().get_or_create(name, |builder| Ok(builder.console()))
}

/// Gets or creates a synchronous rotating-file logger in the global registry.
/// When `name` is already registered the existing logger is returned and the
/// file parameters are ignored.
///
/// # Errors
/// `Error::InvalidArgument` for bad parameters, `Error::Io` when the file
/// cannot be opened.
pub fn rotating(
    name: &str,
    path: &str,
    max_size: u64,
    max_files: usize,
) -> Result<Arc<Logger>, Error> {
    registry::global().get_or_create(name, |builder| {
        builder.rotating_file(path, max_size, max_files)
    })
}

/// Like [`rotating`], but records travel through a bounded queue to a
/// background worker instead of being written on the calling thread.
///
/// # Errors
/// See [`rotating`].
pub fn rotating_async(
    name: &str,
    path: &str,
    max_size: u64,
    max_files: usize,
) -> Result<Arc<Logger>, Error> {
    registry::global().get_or_create(name, |builder| {
        Ok(builder
            .rotating_file(path, max_size, max_files)?
            .async_dispatch(DEFAULT_QUEUE_CAPACITY, OverflowPolicy::Block))
    })
}

/// Looks up a logger in the global registry.
///
/// # Errors
/// `Error::NotFound` when the name is unregistered.
pub fn get(name: &str) -> Result<Arc<Logger>, Error> {
    registry::global().get(name)
}

/// Removes and finalizes the named logger; idempotent, never fails.
pub fn drop(name: &str) {
    registry::global().drop(name);
}

/// Removes and finalizes every logger in the global registry.
pub fn drop_all() {
    registry::global().drop_all();
}

/// Sets the global default level; consulted by loggers created later and
/// re-stamped onto existing loggers without their own override.
pub fn set_global_level(level: Level) {
    registry::global().set_default_level(level);
}

/// Numeric-surface form of [`set_global_level`].
///
/// # Errors
/// `Error::InvalidLevel` when `value` is out of range; nothing changes.
pub fn set_global_level_index(value: i64) -> Result<(), Error> {
    registry::global().set_default_level(Level::from_index(value)?);
    Ok(())
}

/// Sets the global flush-on threshold, with the same override semantics as
/// [`set_global_level`].
pub fn set_flush_on(level: Level) {
    registry::global().set_flush_on(level);
}

/// Numeric-surface form of [`set_flush_on`].
///
/// # Errors
/// `Error::InvalidLevel` when `value` is out of range; nothing changes.
pub fn set_flush_on_index(value: i64) -> Result<(), Error> {
    registry::global().set_flush_on(Level::from_index(value)?);
    Ok(())
}

/// Applies a TOML configuration document to the global registry.
///
/// # Errors
/// See [`Config::apply`].
pub fn init_from_str(source: &str) -> Result<Vec<Arc<Logger>>, Error> {
    Config::parse(source)?.apply(registry::global())
}

/// Applies a TOML configuration file to the global registry.
///
/// # Errors
/// See [`Config::apply`].
pub fn init_from_file(path: impl AsRef<std::path::Path>) -> Result<Vec<Arc<Logger>>, Error> {
    Config::load(path)?.apply(registry::global())
}
