//! Storage errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by [`KeyValueStore`](crate::KeyValueStore) backends and the
/// draft adapter.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The key contains characters the backend cannot map to a slot.
    #[error("invalid storage key {0:?}: only ASCII letters, digits, '_' and '-' are allowed")]
    InvalidKey(String),

    /// Filesystem failure.
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stored value is not a valid record.
    #[error("stored draft is corrupt: {0}")]
    Parse(#[source] serde_json::Error),

    /// A record could not be encoded.
    #[error("failed to encode draft: {0}")]
    Serialize(#[source] serde_json::Error),
}
