//! Pattern templates that turn a log record into one line of text.
//!
//! A pattern is parsed once into a segment list; rendering substitutes the
//! record's fields into the pre-parsed segments, so the hot path never scans
//! the pattern string again.

use crate::error::Error;
use crate::sink::LogRecord;

/// Default pattern applied to every sink until `set_pattern` replaces it.
pub const DEFAULT_PATTERN: &str = "[{timestamp}] [{logger}] [{level}] {msg}";

/// strftime format used by the `{timestamp}` placeholder.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Closed set of known substitution tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Timestamp,
    Level,
    Logger,
    Msg,
}

impl Placeholder {
    /// Template parsing matches brace-delimited names against known placeholders.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::Level => "level",
            Self::Logger => "logger",
            Self::Msg => "msg",
        }
    }

    pub const ALL: &'static [Self] = &[Self::Timestamp, Self::Level, Self::Logger, Self::Msg];
}

/// One piece of a parsed pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatSegment {
    /// Whitespace, separators, and unmatched braces pass through untouched.
    Literal(String),
    /// Known tokens are substituted with record fields at render time.
    Placeholder(Placeholder),
}

/// Pre-parsed pattern plus the strftime format its `{timestamp}` uses.
#[derive(Debug, Clone)]
pub struct FormatTemplate {
    segments: Vec<FormatSegment>,
    timestamp_format: String,
}

impl FormatTemplate {
    /// One-time parse of `"[{timestamp}] {msg}"` style patterns.
    ///
    /// Unknown `{names}` are rejected here rather than at render time, so a
    /// bad pattern never reaches a sink.
    ///
    /// # Errors
    /// `Error::InvalidPattern` naming the offending placeholder.
    pub fn parse(pattern: &str) -> Result<Self, Error> {
        let mut segments = Vec::new();
        let mut current = String::new();
        let chars: Vec<char> = pattern.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            if chars[i] == '{' {
                if let Some(end) = chars[i..].iter().position(|&c| c == '}') {
                    let end = i + end;
                    let name: String = chars[i + 1..end].iter().collect();

                    if !current.is_empty() {
                        segments.push(FormatSegment::Literal(current.clone()));
                        current.clear();
                    }

                    match Self::match_placeholder(&name) {
                        Some(ph) => segments.push(FormatSegment::Placeholder(ph)),
                        None => return Err(Error::InvalidPattern(name)),
                    }

                    i = end + 1;
                    continue;
                }
            }

            current.push(chars[i]);
            i += 1;
        }

        if !current.is_empty() {
            segments.push(FormatSegment::Literal(current));
        }

        Ok(Self {
            segments,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        })
    }

    fn match_placeholder(name: &str) -> Option<Placeholder> {
        Placeholder::ALL.iter().find(|ph| ph.as_str() == name).copied()
    }

    /// Replaces the strftime format used for `{timestamp}`.
    #[must_use]
    pub fn timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    /// Tests and downstream code need direct access to verify parse results.
    #[must_use]
    pub fn segments(&self) -> &[FormatSegment] {
        &self.segments
    }

    /// Substitutes record fields into the pre-parsed segments.
    #[must_use]
    pub fn render(&self, record: &LogRecord) -> String {
        let mut result = String::new();

        for segment in &self.segments {
            match segment {
                FormatSegment::Literal(s) => result.push_str(s),
                FormatSegment::Placeholder(ph) => match ph {
                    Placeholder::Timestamp => {
                        result
                            .push_str(&record.timestamp.format(&self.timestamp_format).to_string());
                    }
                    Placeholder::Level => result.push_str(record.level.as_str()),
                    Placeholder::Logger => result.push_str(&record.logger),
                    Placeholder::Msg => result.push_str(&record.message),
                },
            }
        }

        result
    }
}

impl Default for FormatTemplate {
    fn default() -> Self {
        // DEFAULT_PATTERN only uses known placeholders, so parsing cannot fail.
        Self::parse(DEFAULT_PATTERN).unwrap_or(Self {
            segments: Vec::new(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        })
    }
}

/// A sink's active formatter. Exactly one is installed per sink at any time.
#[derive(Debug, Clone)]
pub enum Formatter {
    /// Renders through a parsed pattern template.
    Pattern(FormatTemplate),
    /// Renders nothing; silences a sink without removing it.
    Void,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::Pattern(FormatTemplate::default())
    }
}

impl Formatter {
    /// Parses `pattern` into a template formatter, failing fast on unknown placeholders.
    ///
    /// # Errors
    /// `Error::InvalidPattern` from the template parse.
    pub fn pattern(pattern: &str) -> Result<Self, Error> {
        Ok(Self::Pattern(FormatTemplate::parse(pattern)?))
    }

    /// The void formatter; renders every record to nothing.
    #[must_use]
    pub const fn void() -> Self {
        Self::Void
    }

    /// Renders one record, `None` for the void formatter.
    #[must_use]
    pub fn render(&self, record: &LogRecord) -> Option<String> {
        match self {
            Self::Pattern(template) => Some(template.render(record)),
            Self::Void => None,
        }
    }
}
