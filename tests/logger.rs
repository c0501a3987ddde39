//! Tests for logger-level gating, flush-on, and formatter management.

use rotolog::{Error, Formatter, Level, LogRecord, Logger, Sink};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

struct CollectSink {
    level: Mutex<Level>,
    formatter: Mutex<Formatter>,
    lines: Mutex<Vec<String>>,
    flushes: AtomicUsize,
}

impl CollectSink {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            level: Mutex::new(Level::Trace),
            formatter: Mutex::new(Formatter::default()),
            lines: Mutex::new(Vec::new()),
            flushes: AtomicUsize::new(0),
        })
    }

    fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl Sink for CollectSink {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        if record.level < *self.level.lock().unwrap() {
            return Ok(());
        }
        if let Some(line) = self.formatter.lock().unwrap().render(record) {
            self.lines.lock().unwrap().push(line);
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), Error> {
        self.flushes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn level(&self) -> Level {
        *self.level.lock().unwrap()
    }

    fn set_level(&self, level: Level) {
        *self.level.lock().unwrap() = level;
    }

    fn set_formatter(&self, formatter: Formatter) {
        *self.formatter.lock().unwrap() = formatter;
    }
}

fn collect_logger(name: &str) -> (Arc<CollectSink>, Logger) {
    let sink = CollectSink::new();
    let logger = Logger::builder(name)
        .sink(sink.clone())
        .pattern("{msg}")
        .unwrap()
        .build()
        .unwrap();
    (sink, logger)
}

#[test]
fn records_below_the_logger_level_vanish() {
    let (sink, logger) = collect_logger("gate");
    logger.set_level(Level::Warn);

    logger.info("x").unwrap();
    logger.error("y").unwrap();

    assert_eq!(sink.lines(), vec!["y"]);
}

#[test]
fn off_silences_everything() {
    let (sink, logger) = collect_logger("off");
    logger.set_level(Level::Off);

    logger.critical("even this").unwrap();

    assert!(sink.lines().is_empty());
}

#[test]
fn set_level_round_trips_every_level() {
    let (_sink, logger) = collect_logger("roundtrip");

    for level in Level::all() {
        logger.set_level(level);
        assert_eq!(logger.level(), level);
        assert_eq!(logger.level_index(), level.index());
    }
}

#[test]
fn invalid_level_index_leaves_the_level_unchanged() {
    let (_sink, logger) = collect_logger("invalid");
    logger.set_level(Level::Warn);

    for value in [-1, 7, 100] {
        assert!(matches!(
            logger.set_level_index(value),
            Err(Error::InvalidLevel(_))
        ));
    }

    assert_eq!(logger.level(), Level::Warn);
}

#[test]
fn every_emit_operation_is_gated_independently() {
    let (sink, logger) = collect_logger("emits");
    logger.set_level(Level::Trace);

    logger.trace("t").unwrap();
    logger.debug("d").unwrap();
    logger.info("i").unwrap();
    logger.warn("w").unwrap();
    logger.error("e").unwrap();
    logger.critical("c").unwrap();

    assert_eq!(sink.lines(), vec!["t", "d", "i", "w", "e", "c"]);
}

#[test]
fn flush_on_threshold_flushes_immediately() {
    let sink = CollectSink::new();
    let logger = Logger::builder("flushon")
        .sink(sink.clone())
        .pattern("{msg}")
        .unwrap()
        .flush_on(Level::Error)
        .build()
        .unwrap();

    logger.info("calm").unwrap();
    assert_eq!(sink.flushes.load(Ordering::SeqCst), 0);

    logger.error("alarm").unwrap();
    assert_eq!(sink.flushes.load(Ordering::SeqCst), 1);
}

#[test]
fn clear_formatters_silences_without_removing_sinks() {
    let (sink, logger) = collect_logger("voided");

    logger.info("before").unwrap();
    logger.clear_formatters();
    logger.info("during").unwrap();
    logger.set_pattern("{msg}").unwrap();
    logger.info("after").unwrap();

    assert_eq!(sink.lines(), vec!["before", "after"]);
}

#[test]
fn set_pattern_applies_to_every_sink() {
    let first = CollectSink::new();
    let second = CollectSink::new();
    let logger = Logger::builder("multi")
        .sink(first.clone())
        .sink(second.clone())
        .pattern("{msg}")
        .unwrap()
        .build()
        .unwrap();

    logger.set_pattern("{level}:{msg}").unwrap();
    logger.info("x").unwrap();

    assert_eq!(first.lines(), vec!["info:x"]);
    assert_eq!(second.lines(), vec!["info:x"]);
}

#[test]
fn set_pattern_rejects_unknown_placeholders_atomically() {
    let (sink, logger) = collect_logger("atomic");

    assert!(matches!(
        logger.set_pattern("{msg} {mystery}"),
        Err(Error::InvalidPattern(_))
    ));

    // The old pattern is still active.
    logger.info("still works").unwrap();
    assert_eq!(sink.lines(), vec!["still works"]);
}

#[test]
fn one_sink_is_shared_between_two_loggers() {
    let sink = CollectSink::new();
    let first = Logger::builder("alpha")
        .sink(sink.clone())
        .pattern("{logger}:{msg}")
        .unwrap()
        .build()
        .unwrap();
    let second = Logger::builder("beta")
        .sink(sink.clone())
        .pattern("{logger}:{msg}")
        .unwrap()
        .build()
        .unwrap();

    first.info("one").unwrap();
    second.info("two").unwrap();

    assert_eq!(sink.lines(), vec!["alpha:one", "beta:two"]);
}

#[test]
fn empty_name_is_rejected() {
    let result = Logger::builder("").console().build();

    assert!(matches!(result, Err(Error::InvalidArgument(_))));
}

#[test]
fn sinkless_logger_is_rejected() {
    let result = Logger::builder("bare").build();

    assert!(matches!(result, Err(Error::InvalidArgument(_))));
}
