//! `tracing` subscriber setup for the binaries.
//!
//! The interactive binary owns the terminal, so it only logs to a file. The
//! autoplay binary logs to stderr and keeps stdout for its JSON lines.
//! `RUST_LOG` overrides the default `info` filter in both cases.

use std::fs::File;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Send log records to `path` (truncated), without ANSI colours.
pub fn init_file(path: &str) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create log file {path}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("install log subscriber: {e}"))
}

/// Send log records to stderr.
pub fn init_stderr() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("install log subscriber: {e}"))
}
