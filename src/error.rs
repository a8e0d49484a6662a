//! Error types shared by every store operation

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A file passed to a strict loader does not exist.
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// No decoder/encoder is registered for the format.
    #[error("no decoder or encoder registered for format '{0}'")]
    UnsupportedFormat(String),

    #[error("failed to decode {format} source: {message}")]
    Decode { format: String, message: String },

    #[error("failed to encode tree as {format}: {message}")]
    Encode { format: String, message: String },

    #[error("cannot merge: {0}")]
    Merge(String),

    #[error("config store '{0}' is readonly")]
    Readonly(String),

    #[error("cannot assign '{path}': {reason}")]
    PathConflict { path: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn decode(format: &str, err: impl std::fmt::Display) -> Self {
        Self::Decode { format: format.to_string(), message: err.to_string() }
    }

    pub(crate) fn encode(format: &str, err: impl std::fmt::Display) -> Self {
        Self::Encode { format: format.to_string(), message: err.to_string() }
    }
}
