//! Error types for the application crate

use std::path::PathBuf;

/// Failure to load, write or validate the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize default config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Failure while replaying a recorded trace.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("Failed to read trace: {0}")]
    Io(#[from] std::io::Error),

    #[error("Trace line {line} is not a valid call site record: {source}")]
    Record {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
