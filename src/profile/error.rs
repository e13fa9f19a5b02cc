//! Profile store error types.

use std::path::PathBuf;

/// Errors that can occur while loading or persisting the profile store.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// Failed to read the store document.
    #[error("Failed to read profile store {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store document is not valid JSON or has the wrong shape.
    #[error("Failed to parse profile store {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to write or replace the store document.
    #[error("Failed to write profile store {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the store.
    #[error("Failed to serialize profile store: {0}")]
    Serialize(#[from] serde_json::Error),
}
