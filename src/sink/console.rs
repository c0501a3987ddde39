//! Console sink. One formatted line per record on stdout.

use super::{LogRecord, Sink, SinkCore};
use crate::error::Error;
use crate::fmt::Formatter;
use crate::level::Level;
use std::io::{self, Write};

pub struct ConsoleSink {
    core: SinkCore,
}

impl ConsoleSink {
    #[must_use]
    pub fn new() -> Self {
        Self {
            core: SinkCore::new(),
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        if !self.core.enabled(record.level) {
            return Ok(());
        }
        let Some(mut line) = self.core.format(record) else {
            return Ok(());
        };
        line.push('\n');

        // Single write_all so concurrent loggers don't interleave mid-line.
        let mut out = io::stdout().lock();
        out.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<(), Error> {
        io::stdout().lock().flush()?;
        Ok(())
    }

    fn level(&self) -> Level {
        self.core.level()
    }

    fn set_level(&self, level: Level) {
        self.core.set_level(level);
    }

    fn set_formatter(&self, formatter: Formatter) {
        self.core.set_formatter(formatter);
    }
}
