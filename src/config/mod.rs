//! Declarative registry setup from TOML.
//!
//! ```toml
//! [registry]
//! level = "info"
//! flush_on = "error"
//!
//! [[logger]]
//! name = "app"
//! kind = "rotating_async"
//! file = "~/logs/app.log"
//! max_size = "1MB"
//! max_files = 3
//! ```

use crate::dispatch::{DEFAULT_QUEUE_CAPACITY, OverflowPolicy};
use crate::error::Error;
use crate::internal;
use crate::level::Level;
use crate::logger::Logger;
use crate::registry::Registry;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

/// Registry-wide defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Default level for loggers without their own override.
    pub level: String,
    /// Default flush-on threshold.
    pub flush_on: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            flush_on: "off".to_string(),
        }
    }
}

/// One logger declaration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub name: String,
    /// `console`, `rotating`, or `rotating_async`.
    pub kind: String,
    /// Target path for rotating kinds.
    pub file: Option<String>,
    /// Human-readable size ("1024", "512K", "10MB") for rotating kinds.
    pub max_size: Option<String>,
    pub max_files: Option<usize>,
    /// Queue depth for `rotating_async`.
    pub queue_capacity: usize,
    /// `block` or `drop_oldest`.
    pub overflow: String,
    pub pattern: Option<String>,
    /// Per-logger level override.
    pub level: Option<String>,
    pub flush_on_shutdown: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: "console".to_string(),
            file: None,
            max_size: None,
            max_files: None,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            overflow: "block".to_string(),
            pattern: None,
            level: None,
            flush_on_shutdown: true,
        }
    }
}

/// Full configuration document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub registry: RegistryConfig,
    #[serde(rename = "logger")]
    pub loggers: Vec<LoggerConfig>,
}

impl Config {
    /// Parses a TOML document.
    ///
    /// # Errors
    /// `Error::ConfigParse` on malformed TOML.
    pub fn parse(source: &str) -> Result<Self, Error> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    /// `Error::Io` when the file cannot be read, `Error::ConfigParse` on
    /// malformed TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let source = std::fs::read_to_string(path)?;
        Self::parse(&source)
    }

    /// Applies the document to a registry: sets the defaults, then creates
    /// every declared logger. Per-kind parameters are validated before any
    /// logger is touched.
    ///
    /// # Errors
    /// `Error::InvalidArgument` for missing per-kind parameters or unknown
    /// kind/overflow values, plus anything logger construction raises.
    pub fn apply(&self, registry: &Registry) -> Result<Vec<Arc<Logger>>, Error> {
        let default_level: Level = self.registry.level.parse()?;
        let default_flush_on: Level = self.registry.flush_on.parse()?;
        registry.set_default_level(default_level);
        registry.set_flush_on(default_flush_on);

        let mut loggers = Vec::with_capacity(self.loggers.len());
        for cfg in &self.loggers {
            loggers.push(Self::apply_logger(registry, cfg)?);
        }
        internal::debug("CONFIG", &format!("applied {} logger(s)", loggers.len()));
        Ok(loggers)
    }

    fn apply_logger(registry: &Registry, cfg: &LoggerConfig) -> Result<Arc<Logger>, Error> {
        let level = cfg
            .level
            .as_deref()
            .map(str::parse::<Level>)
            .transpose()?;

        registry.get_or_create(&cfg.name, |mut builder| {
            builder = match cfg.kind.as_str() {
                "console" => builder.console(),
                "rotating" | "rotating_async" => {
                    let file = cfg.file.as_deref().ok_or_else(|| {
                        Error::InvalidArgument(format!("logger '{}' needs a file", cfg.name))
                    })?;
                    let max_size_text = cfg.max_size.as_deref().ok_or_else(|| {
                        Error::InvalidArgument(format!("logger '{}' needs a max size", cfg.name))
                    })?;
                    let max_size = parse_size(max_size_text).ok_or_else(|| {
                        Error::InvalidArgument(format!("unparseable size: '{max_size_text}'"))
                    })?;
                    let max_files = cfg.max_files.ok_or_else(|| {
                        Error::InvalidArgument(format!("logger '{}' needs max files", cfg.name))
                    })?;

                    let mut b = builder.rotating_file(file, max_size, max_files)?;
                    if cfg.kind == "rotating_async" {
                        let policy = match cfg.overflow.as_str() {
                            "block" => OverflowPolicy::Block,
                            "drop_oldest" => OverflowPolicy::DropOldest,
                            other => {
                                return Err(Error::InvalidArgument(format!(
                                    "unknown overflow policy: '{other}'"
                                )));
                            }
                        };
                        b = b
                            .async_dispatch(cfg.queue_capacity, policy)
                            .flush_on_shutdown(cfg.flush_on_shutdown);
                    }
                    b
                }
                other => {
                    return Err(Error::InvalidArgument(format!(
                        "unknown logger kind: '{other}'"
                    )));
                }
            };

            if let Some(pattern) = cfg.pattern.as_deref() {
                builder = builder.pattern(pattern)?;
            }
            if let Some(level) = level {
                builder = builder.level(level);
            }
            Ok(builder)
        })
    }
}

/// Config files use "500K"/"10MB" notation, not raw byte counts.
#[must_use]
pub fn parse_size(s: &str) -> Option<u64> {
    let s = s.trim().to_uppercase();
    let (num_str, multiplier): (&str, f64) = if s.ends_with("GB") || s.ends_with('G') {
        (
            s.trim_end_matches("GB").trim_end_matches('G'),
            1024.0 * 1024.0 * 1024.0,
        )
    } else if s.ends_with("MB") || s.ends_with('M') {
        (
            s.trim_end_matches("MB").trim_end_matches('M'),
            1024.0 * 1024.0,
        )
    } else if s.ends_with("KB") || s.ends_with('K') {
        (s.trim_end_matches("KB").trim_end_matches('K'), 1024.0)
    } else {
        (s.as_str(), 1.0)
    };

    num_str.trim().parse::<f64>().ok().map(|n| {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let result = (n * multiplier) as u64;
        result
    })
}

/// Raw byte counts are unreadable in diagnostics.
#[must_use]
pub fn format_size(bytes: u64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let bytes_f = bytes as f64;

    if bytes >= 1024 * 1024 * 1024 {
        format!("{:.2} GB", bytes_f / (1024.0 * 1024.0 * 1024.0))
    } else if bytes >= 1024 * 1024 {
        format!("{:.2} MB", bytes_f / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.2} KB", bytes_f / 1024.0)
    } else {
        format!("{bytes} B")
    }
}
