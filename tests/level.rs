//! Tests for the severity scale.

use rotolog::{Error, Level};

#[test]
fn level_ordering() {
    assert!(Level::Trace < Level::Debug);
    assert!(Level::Debug < Level::Info);
    assert!(Level::Info < Level::Warn);
    assert!(Level::Warn < Level::Error);
    assert!(Level::Error < Level::Critical);
    assert!(Level::Critical < Level::Off);
}

#[test]
fn level_display() {
    assert_eq!(Level::Trace.to_string(), "trace");
    assert_eq!(Level::Debug.to_string(), "debug");
    assert_eq!(Level::Info.to_string(), "info");
    assert_eq!(Level::Warn.to_string(), "warn");
    assert_eq!(Level::Error.to_string(), "error");
    assert_eq!(Level::Critical.to_string(), "critical");
    assert_eq!(Level::Off.to_string(), "off");
}

#[test]
fn level_from_str() {
    assert_eq!("trace".parse::<Level>().unwrap(), Level::Trace);
    assert_eq!("DEBUG".parse::<Level>().unwrap(), Level::Debug);
    assert_eq!("Info".parse::<Level>().unwrap(), Level::Info);
    assert_eq!("warning".parse::<Level>().unwrap(), Level::Warn);
    assert_eq!("err".parse::<Level>().unwrap(), Level::Error);
    assert_eq!("crit".parse::<Level>().unwrap(), Level::Critical);
    assert_eq!("off".parse::<Level>().unwrap(), Level::Off);
}

#[test]
fn level_from_str_invalid() {
    assert!("invalid".parse::<Level>().is_err());
}

#[test]
fn level_index_round_trip() {
    for level in Level::all() {
        assert_eq!(Level::from_index(level.index()).unwrap(), level);
    }
}

#[test]
fn level_from_index_rejects_out_of_range() {
    for value in [-1, 7, 42, i64::MIN, i64::MAX] {
        match Level::from_index(value) {
            Err(Error::InvalidLevel(n)) => assert_eq!(n, value),
            other => panic!("expected InvalidLevel for {value}, got {other:?}"),
        }
    }
}

#[test]
fn level_default() {
    assert_eq!(Level::default(), Level::Info);
}
