//! Error types for the patcher and the icon generator

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for legalkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while patching sources or generating icons
#[derive(Error, Debug)]
pub enum Error {
    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An anchor expected by a splice is not present in the document
    #[error("Anchor for splice `{splice}` not found: {anchor:?}")]
    AnchorNotFound { splice: String, anchor: String },

    /// An anchor matches more than once, so the insertion point is ambiguous
    #[error("Anchor for splice `{splice}` found {count} times (expected exactly once): {anchor:?}")]
    AnchorAmbiguous {
        splice: String,
        anchor: String,
        count: usize,
    },

    /// A canvas could not be allocated at the requested size
    #[error("Invalid icon size: {0}px")]
    InvalidSize(u32),

    /// PNG serialization failed
    #[error("PNG encoding failed: {0}")]
    Encode(String),

    /// Invalid configuration or patch plan
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigError(err.to_string())
    }
}
