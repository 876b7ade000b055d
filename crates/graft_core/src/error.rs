//! Error types for configuration loading.

use std::path::PathBuf;

/// Error loading or applying a graft configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config `{}`: {source}", path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid JSON for the expected shape.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A tracing filter string does not parse.
    #[error("invalid tracing filter `{filter}`: {reason}")]
    InvalidFilter {
        /// The filter as given.
        filter: String,
        /// Parser message.
        reason: String,
    },

    /// A tracing level name is not recognized.
    #[error("unknown tracing level `{level}`")]
    InvalidLevel {
        /// The level as given.
        level: String,
    },
}
