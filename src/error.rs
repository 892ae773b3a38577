use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BentoError {
    #[error("failed to switch terminal to raw mode: {0}")]
    RawMode(#[source] std::io::Error),

    #[error("failed to restore terminal mode: {0}")]
    RestoreMode(#[source] std::io::Error),

    #[error("failed to read from terminal: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to write to terminal: {0}")]
    Write(#[source] std::io::Error),

    #[error("failed to register handler for signal {signal}: {source}")]
    Signal {
        signal: i32,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to set up signal wake pipe: {0}")]
    WakePipe(#[source] std::io::Error),

    #[error("failed to save buffer to {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BentoError {
    #[must_use]
    pub fn save(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Save {
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn log_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::LogFile {
            path: path.into(),
            source,
        }
    }
}
