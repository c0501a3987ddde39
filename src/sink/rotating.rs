//! Size-rotated file sink.
//!
//! The active file is always the base path; rotation shifts history to
//! numbered siblings (`app.log` -> `app.log.1` -> `app.log.2`), deleting the
//! oldest once `max_files` is reached.

use super::{LogRecord, Sink, SinkCore};
use crate::error::Error;
use crate::fmt::Formatter;
use crate::internal;
use crate::level::Level;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

/// Upper bound on the rotation history depth.
pub const MAX_FILES_CAP: usize = 200_000;

struct Inner {
    file: File,
    current_size: u64,
}

pub struct RotatingFileSink {
    core: SinkCore,
    base_path: PathBuf,
    max_size: u64,
    max_files: usize,
    /// Guards the size-check + rotate + write critical section.
    inner: Mutex<Inner>,
}

impl RotatingFileSink {
    /// Opens (or creates) the base file in append mode. The size counter
    /// starts from the existing file length, so reopening a grown log rotates
    /// at the right boundary.
    ///
    /// # Errors
    /// `Error::InvalidArgument` for a zero `max_size` or an oversized
    /// `max_files`; `Error::Io` when the path cannot be opened.
    pub fn new(path: &str, max_size: u64, max_files: usize) -> Result<Self, Error> {
        if max_size == 0 {
            return Err(Error::InvalidArgument(
                "rotating sink needs a non-zero max size".to_string(),
            ));
        }
        if max_files > MAX_FILES_CAP {
            return Err(Error::InvalidArgument(format!(
                "max_files {max_files} exceeds cap {MAX_FILES_CAP}"
            )));
        }

        let base_path = PathBuf::from(shellexpand::tilde(path).into_owned());
        if let Some(parent) = base_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(&base_path)?;
        let current_size = file.metadata()?.len();

        Ok(Self {
            core: SinkCore::new(),
            base_path,
            max_size,
            max_files,
            inner: Mutex::new(Inner { file, current_size }),
        })
    }

    /// Path of the active log file.
    #[must_use]
    pub fn base_path(&self) -> &std::path::Path {
        &self.base_path
    }

    /// Index 0 is the base path itself; history files carry a numeric suffix.
    fn indexed_path(&self, index: usize) -> PathBuf {
        if index == 0 {
            self.base_path.clone()
        } else {
            let mut name = self.base_path.as_os_str().to_owned();
            name.push(format!(".{index}"));
            PathBuf::from(name)
        }
    }

    /// Shifts history up one index, deletes the overflow file, and reopens
    /// the base path truncated. Caller holds the inner lock.
    fn rotate(&self, inner: &mut Inner) -> Result<(), Error> {
        inner.file.flush()?;

        for index in (1..=self.max_files).rev() {
            let src = self.indexed_path(index - 1);
            if !src.exists() {
                continue;
            }
            let dst = self.indexed_path(index);
            if dst.exists() {
                fs::remove_file(&dst)?;
            }
            fs::rename(&src, &dst)?;
        }

        inner.file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.base_path)?;
        inner.current_size = 0;
        internal::debug(
            "ROTATE",
            &format!("rotated {}", self.base_path.display()),
        );
        Ok(())
    }
}

impl Sink for RotatingFileSink {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        if !self.core.enabled(record.level) {
            return Ok(());
        }
        let Some(mut line) = self.core.format(record) else {
            return Ok(());
        };
        line.push('\n');
        let length = line.len() as u64;

        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if inner.current_size + length > self.max_size && inner.current_size > 0 {
            // A failed rotation loses this record but leaves the sink usable.
            // An empty file is never rotated; an oversized record is written
            // whole rather than dropped.
            self.rotate(&mut inner)?;
        }
        inner.file.write_all(line.as_bytes())?;
        inner.current_size += length;
        Ok(())
    }

    fn flush(&self) -> Result<(), Error> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.file.flush()?;
        inner.file.sync_data()?;
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
