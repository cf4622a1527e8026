//! Errors raised while reading or writing `config.ron`.

use std::path::PathBuf;

use thiserror::Error;

/// A config file could not be read, parsed, or written.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config directory or file could not be written.
    #[error("cannot write {}: {source}", path.display())]
    Write {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid RON for [`Config`](crate::Config).
    #[error("invalid config in {}: {source}", path.display())]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Position and cause reported by `ron`.
        source: ron::error::SpannedError,
    },

    /// The in-memory config could not be turned into RON.
    #[error("cannot serialize config: {0}")]
    Serialize(#[from] ron::Error),
}
