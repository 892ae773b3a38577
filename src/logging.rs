//! File-backed `tracing` setup.
//!
//! The terminal is owned by the editor, so logs only ever go to a file.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{EditorConfig, DEFAULT_LOG_FILTER};
use crate::error::BentoError;

/// Install a global subscriber writing to `config.log_path`.
///
/// Returns `Ok(false)` when no log path is configured or another subscriber
/// is already installed.
pub fn init(config: &EditorConfig) -> Result<bool, BentoError> {
    let Some(path) = config.log_path.as_deref() else {
        return Ok(false);
    };
    init_file(path, &config.log_filter)
}

fn init_file(path: &Path, filter: &str) -> Result<bool, BentoError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| BentoError::log_file(path, err))?;

    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .try_init()
        .is_ok();
    Ok(installed)
}
