//! Logging setup
//!
//! statprint's libraries emit `tracing` events: statistics fitting at
//! `debug`, per-record encoding at `trace`, degenerate scaling parameters at
//! `warn`. These helpers install a formatting subscriber for applications and
//! tests that don't bring their own.

use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

pub use tracing::subscriber::SetGlobalDefaultError;

/// Parse a level name; unknown names fall back to `info`
pub fn parse_level(level: &str) -> Level {
    match level.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Install a global subscriber with the given max level
pub fn try_init(level: &str) -> Result<(), SetGlobalDefaultError> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(level))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
}

/// Install a global subscriber filtered by `RUST_LOG`, defaulting to
/// `fallback` when the variable is unset or invalid
pub fn try_init_from_env(fallback: &str) -> Result<(), SetGlobalDefaultError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(parse_level(fallback).as_str().to_ascii_lowercase()));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
}

/// Like [`try_init`], ignoring an already installed subscriber
pub fn init(level: &str) {
    let _ = try_init(level);
}
