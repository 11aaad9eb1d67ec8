//! Logging init: file under XDG state dir, or graceful fallback to stderr.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor an explicit level is given.
const DEFAULT_FILTER: &str = "info,bootget_core=debug,bootget=debug";

/// Picks the filter: explicit `level` (e.g. from `--log-level`) first, then
/// `RUST_LOG`, then the built-in default.
fn build_filter(level: Option<&str>) -> EnvFilter {
    match level {
        Some(directives) => EnvFilter::try_new(directives)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    }
}

/// `~/.local/state/bootget/bootget.log`.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("bootget")?;
    Ok(xdg_dirs.get_state_home().join("bootget").join("bootget.log"))
}

/// Initialize structured logging to the log file and return its path.
/// On failure (e.g. log dir unwritable), returns Err so the caller can fall back to stderr.
pub fn init_logging(level: Option<&str>) -> Result<PathBuf> {
    let log_file_path = log_file_path()?;
    if let Some(dir) = log_file_path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("cannot create log dir {}", dir.display()))?;
    }

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)
        .with_context(|| format!("cannot open log file {}", log_file_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!("bootget logging initialized at {}", log_file_path.display());

    Ok(log_file_path)
}

/// Initialize logging to stderr only (no file). Use when init_logging() fails so a download still runs.
pub fn init_logging_stderr(level: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_level_wins() {
        assert_eq!(build_filter(Some("warn")).to_string(), "warn");
    }
}
