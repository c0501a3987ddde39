//! Severity levels that gate which records reach which sinks.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Derives `Ord` so loggers and sinks can compare a record's level against their threshold.
///
/// `Off` sits above every real severity; setting it as a threshold silences the
/// logger without removing any sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    /// High-volume instrumentation that would be too noisy outside of development.
    Trace = 0,
    /// Startup, teardown, and state-change details useful for diagnosing issues.
    Debug = 1,
    /// Normal operational milestones.
    #[default]
    Info = 2,
    /// Non-fatal anomalies that may need attention.
    Warn = 3,
    /// Failures that prevent an operation from completing.
    Error = 4,
    /// Failures that require immediate attention; typically paired with flush-on.
    Critical = 5,
    /// Threshold-only value; no record carries this level.
    Off = 6,
}

impl Level {
    /// Lowercase because config files and patterns use lowercase level strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Critical => "critical",
            Self::Off => "off",
        }
    }

    /// Convenience for iteration in tests and validation code.
    #[must_use]
    pub const fn all() -> [Self; 7] {
        [
            Self::Trace,
            Self::Debug,
            Self::Info,
            Self::Warn,
            Self::Error,
            Self::Critical,
            Self::Off,
        ]
    }

    /// Numeric form used by the host-facing surface.
    #[must_use]
    pub const fn index(self) -> i64 {
        self as i64
    }

    /// Converts a host-supplied integer, validating before any state mutation.
    ///
    /// # Errors
    /// `Error::InvalidLevel` when `value` is outside `trace..=off` (0..=6).
    pub fn from_index(value: i64) -> Result<Self, Error> {
        match value {
            0 => Ok(Self::Trace),
            1 => Ok(Self::Debug),
            2 => Ok(Self::Info),
            3 => Ok(Self::Warn),
            4 => Ok(Self::Error),
            5 => Ok(Self::Critical),
            6 => Ok(Self::Off),
            _ => Err(Error::InvalidLevel(value)),
        }
    }

    /// Compact form stored in atomics.
    pub(crate) const fn repr(self) -> u8 {
        self as u8
    }

    /// Lossless for values written by `repr()`; anything else clamps to `Off`.
    /// Used to read levels back out of atomics.
    pub(crate) const fn from_repr(value: u8) -> Self {
        match value {
            0 => Self::Trace,
            1 => Self::Debug,
            2 => Self::Info,
            3 => Self::Warn,
            4 => Self::Error,
            5 => Self::Critical,
            _ => Self::Off,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by `FromStr` so callers can distinguish "unknown level" from other parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: '{}'", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" | "err" => Ok(Self::Error),
            "critical" | "crit" => Ok(Self::Critical),
            "off" => Ok(Self::Off),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}
