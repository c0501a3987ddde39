//! rotolog's own diagnostics.
//!
//! The library must never report its own lifecycle through the user's sinks,
//! and teardown paths must never fail the caller, so rotation events, worker
//! lifecycle, and swallowed errors go to stderr instead, gated behind the
//! `ROTOLOG_DEBUG` environment variable.

use std::sync::OnceLock;

static ENABLED: OnceLock<bool> = OnceLock::new();

fn enabled() -> bool {
    *ENABLED.get_or_init(|| std::env::var_os("ROTOLOG_DEBUG").is_some())
}

pub(crate) fn debug(scope: &str, msg: &str) {
    if enabled() {
        eprintln!("[rotolog::{scope}] {msg}");
    }
}

/// Swallowed errors still leave a trace for whoever turns diagnostics on.
pub(crate) fn error(scope: &str, msg: &str) {
    if enabled() {
        eprintln!("[rotolog::{scope}] ERROR {msg}");
    }
}
