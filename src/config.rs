//! Environment configuration for the `bento` binary.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_OUTPUT: &str = "output.txt";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Where the buffer is written on exit.
    pub output_path: PathBuf,
    /// Log file; logging is off when unset.
    pub log_path: Option<PathBuf>,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            log_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl EditorConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            output_path: env_string_opt("BENTO_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_path),
            log_path: env_string_opt("BENTO_LOG").map(PathBuf::from),
            log_filter: env_string_opt("BENTO_LOG_FILTER").unwrap_or(defaults.log_filter),
        }
    }
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}
