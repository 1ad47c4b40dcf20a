//! JSON loading shared by [`EvalWeights`](crate::EvalWeights) and
//! [`SearchParams`](crate::SearchParams).

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::ConfigError;

/// Read and decode a JSON parameter file.
pub(crate) fn from_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode `path`, falling back to `T::default()` when it is missing or bad.
pub(crate) fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match from_json_file(path) {
        Ok(value) => {
            debug!(path = %path.display(), "loaded tuned parameters");
            value
        }
        Err(e) if e.is_not_found() => {
            debug!(path = %path.display(), "no parameter file, using defaults");
            T::default()
        }
        Err(e) => {
            warn!(error = %e, "ignoring parameter file, using defaults");
            T::default()
        }
    }
}
