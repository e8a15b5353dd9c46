// wordmask/src/logger.rs
//! Logger setup for the wordmask binary.
//!
//! `RUST_LOG` is honoured unless an explicit level is passed, in which case
//! the explicit level wins. Log lines go to stderr so they never mix with
//! sanitized output on stdout.
//! License: MIT OR APACHE 2.0

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Initializes the global logger. Safe to call more than once; later calls
/// are ignored.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.target(Target::Stderr).format_timestamp(None);

    if builder.try_init().is_err() {
        log::debug!("Logger already initialized.");
    }
}

/// Maps the `--quiet` / `--debug` flags to an explicit level.
pub fn level_from_flags(quiet: bool, debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}
