//! Unified error type for all rotolog operations.

/// Error type for rotolog operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error from a file sink or the console.
    Io(std::io::Error),
    /// Missing or malformed parameter at a public boundary.
    InvalidArgument(String),
    /// Numeric level outside the `trace..=off` range.
    InvalidLevel(i64),
    /// Pattern contains an unknown `{placeholder}`.
    InvalidPattern(String),
    /// Registry lookup miss.
    NotFound(String),
    /// Bounded queue is full and the enqueue was non-blocking.
    QueueFull,
    /// The async worker has shut down; no further records are accepted.
    Shutdown,
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidArgument(s) => write!(f, "invalid argument: {s}"),
            Self::InvalidLevel(n) => write!(f, "invalid level: {n}"),
            Self::InvalidPattern(s) => write!(f, "invalid pattern placeholder: '{{{s}}}'"),
            Self::NotFound(name) => write!(f, "logger not found: {name}"),
            Self::QueueFull => write!(f, "async queue is full"),
            Self::Shutdown => write!(f, "async worker has shut down"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}

impl From<crate::level::ParseLevelError> for Error {
    fn from(e: crate::level::ParseLevelError) -> Self {
        Self::InvalidArgument(e.to_string())
    }
}
