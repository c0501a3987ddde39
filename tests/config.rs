//! Tests for TOML configuration and the size notation helpers.

use rotolog::config::{format_size, parse_size};
use rotolog::{Config, Error, Level, Registry};
use std::fs;
use tempfile::TempDir;

#[test]
fn applies_defaults_and_creates_loggers() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("app.log");
    let source = format!(
        r#"
[registry]
level = "warn"
flush_on = "critical"

[[logger]]
name = "app"
kind = "rotating"
file = "{}"
max_size = "1K"
max_files = 2

[[logger]]
name = "cli"
kind = "console"
"#,
        path.display()
    );

    let registry = Registry::new();
    let loggers = Config::parse(&source).unwrap().apply(&registry).unwrap();

    assert_eq!(loggers.len(), 2);
    assert_eq!(registry.default_level(), Level::Warn);
    assert_eq!(registry.default_flush_on(), Level::Critical);

    let app = registry.get("app").unwrap();
    assert_eq!(app.level(), Level::Warn);
    assert!(path.exists());
}

#[test]
fn per_logger_level_overrides_the_default() {
    let source = r#"
[registry]
level = "warn"

[[logger]]
name = "chatty"
kind = "console"
level = "debug"
"#;

    let registry = Registry::new();
    Config::parse(source).unwrap().apply(&registry).unwrap();
    let logger = registry.get("chatty").unwrap();

    assert_eq!(logger.level(), Level::Debug);

    // An override from config behaves like an explicit set_level call.
    registry.set_default_level(Level::Error);
    assert_eq!(logger.level(), Level::Debug);
}

#[test]
fn rotating_async_logger_writes_through_the_queue() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("async.log");
    let source = format!(
        r#"
[[logger]]
name = "async"
kind = "rotating_async"
file = "{}"
max_size = "1K"
max_files = 1
queue_capacity = 16
overflow = "block"
pattern = "{{msg}}"
"#,
        path.display()
    );

    let registry = Registry::new();
    Config::parse(&source).unwrap().apply(&registry).unwrap();
    let logger = registry.get("async").unwrap();

    logger.info("queued").unwrap();
    logger.flush().unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "queued\n");
}

#[test]
fn rotating_kind_requires_file_parameters() {
    let source = r#"
[[logger]]
name = "broken"
kind = "rotating"
"#;

    let registry = Registry::new();
    let result = Config::parse(source).unwrap().apply(&registry);

    assert!(matches!(result, Err(Error::InvalidArgument(_))));
    assert!(registry.get("broken").is_err());
}

#[test]
fn unknown_kind_is_rejected() {
    let source = r#"
[[logger]]
name = "weird"
kind = "smoke_signals"
"#;

    let registry = Registry::new();
    let result = Config::parse(source).unwrap().apply(&registry);

    assert!(matches!(result, Err(Error::InvalidArgument(_))));
}

#[test]
fn unparseable_size_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let source = format!(
        r#"
[[logger]]
name = "sized"
kind = "rotating"
file = "{}"
max_size = "many bytes"
max_files = 1
"#,
        tmp.path().join("sized.log").display()
    );

    let registry = Registry::new();
    let result = Config::parse(&source).unwrap().apply(&registry);

    assert!(matches!(result, Err(Error::InvalidArgument(_))));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    assert!(matches!(
        Config::parse("not = [valid"),
        Err(Error::ConfigParse(_))
    ));
}

#[test]
fn parse_size_notation() {
    assert_eq!(parse_size("1024"), Some(1024));
    assert_eq!(parse_size("1K"), Some(1024));
    assert_eq!(parse_size("512KB"), Some(512 * 1024));
    assert_eq!(parse_size("10MB"), Some(10 * 1024 * 1024));
    assert_eq!(parse_size("1G"), Some(1024 * 1024 * 1024));
    assert_eq!(parse_size("  2M "), Some(2 * 1024 * 1024));
    assert_eq!(parse_size("garbage"), None);
}

#[test]
fn format_size_is_readable() {
    assert_eq!(format_size(512), "512 B");
    assert_eq!(format_size(2048), "2.00 KB");
    assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
}
