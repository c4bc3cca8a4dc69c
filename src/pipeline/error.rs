//! Per-item error type wrapping each pipeline stage.

use std::path::PathBuf;

use thiserror::Error;

use crate::download::{DownloadError, FailureType, classify_error};
use crate::media::MediaError;
use crate::resolver::ResolveError;
use crate::select::SelectError;

/// Why one item (or one playlist input) failed.
#[derive(Debug, Error)]
pub enum ItemError {
    /// URL or playlist resolution failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// No stream matched the request.
    #[error(transparent)]
    Select(#[from] SelectError),

    /// The stream transfer failed.
    #[error(transparent)]
    Transfer(#[from] DownloadError),

    /// The destination folder could not be created.
    #[error("failed to create destination folder {path}: {source}")]
    Io {
        /// Folder that was being created.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl From<MediaError> for ItemError {
    fn from(error: MediaError) -> Self {
        Self::Resolve(ResolveError::Media(error))
    }
}

impl ItemError {
    /// Pipeline stage that produced the error.
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Resolve(_) => "resolve",
            Self::Select(_) => "select",
            Self::Transfer(_) | Self::Io { .. } => "transfer",
        }
    }

    /// Only transient transfer failures are worth another whole-item attempt.
    #[must_use]
    pub fn failure_type(&self) -> FailureType {
        match self {
            Self::Transfer(error) => classify_error(error),
            _ => FailureType::Permanent,
        }
    }
}
