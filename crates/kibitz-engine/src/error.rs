//! Errors raised while loading tuned parameters from disk.

use std::path::PathBuf;

/// Failure to read or decode a JSON parameter file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not valid JSON for the expected shape.
    #[error("malformed parameters in {}: {source}", path.display())]
    Parse {
        /// Path that was parsed.
        path: PathBuf,
        /// Decoder error, including line and column.
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// Whether the error means the file simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
