//! Configuration error types.

use std::path::PathBuf;

/// Errors that can occur when loading, saving, or parsing the runtime
/// configuration. Filesystem and parse failures carry the offending path so
/// a startup failure names the exact `config.ron` involved.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a config file from disk.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a config file (or create its directory) on disk.
    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file did not parse as a runtime configuration.
    #[error("invalid runtime config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    /// Failed to serialize the configuration to RON.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] ron::Error),
}
