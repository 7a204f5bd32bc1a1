//! Logging init: file under XDG state dir, or graceful fallback to stderr.
//!
//! Failed requests are reported here with `tracing::error!` before the user
//! sees a generic error status.

use anyhow::Result;
use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,ttdl=debug";

/// Where diagnostics ended up after [`init_logging`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    File(PathBuf),
    Stderr,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Opens (append) `~/.local/state/ttdl/ttdl.log`, creating the directory.
pub fn open_log_file() -> Result<(File, PathBuf)> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ttdl")?;
    let path = xdg_dirs.place_state_file("ttdl.log")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((file, path))
}

/// Initialize structured logging to the state-dir log file.
///
/// Terminal output belongs to the status line, so the file is preferred; when
/// it cannot be opened (e.g. read-only home) logs go to stderr instead.
/// Must be called at most once per process.
pub fn init_logging() -> LogDestination {
    match open_log_file() {
        Ok((file, path)) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
            tracing::info!("ttdl logging initialized at {}", path.display());
            LogDestination::File(path)
        }
        Err(err) => {
            init_logging_stderr();
            tracing::warn!("log file unavailable ({err:#}); logging to stderr");
            LogDestination::Stderr
        }
    }
}

/// Initialize logging to stderr only (no file).
pub fn init_logging_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
