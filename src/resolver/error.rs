//! Error types for input resolution.
//!
//! Messages follow the What/Why/Fix pattern used across the project.

use std::path::PathBuf;

use thiserror::Error;

use crate::media::MediaError;

/// Errors that can occur while resolving an input URL.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The developer API key file is absent or empty.
    #[error(
        "API key file not found or empty at {}\n  Suggestion: write a YouTube Data API key to that file, pass --api-key-file, or use --title-source metadata",
        path.display()
    )]
    MissingCredentials {
        /// Path that was read.
        path: PathBuf,
    },

    /// The playlist title could not be obtained.
    #[error("unable to retrieve playlist title for '{playlist}': {reason}")]
    MetadataLookupFailed {
        /// Playlist URL or id.
        playlist: String,
        /// Why the lookup failed.
        reason: String,
    },

    /// The metadata HTTP client could not be constructed.
    #[error("failed to build metadata HTTP client: {source}")]
    ClientBuild {
        /// Underlying builder error.
        #[source]
        source: reqwest::Error,
    },

    /// The media source could not resolve the URL.
    #[error(transparent)]
    Media(#[from] MediaError),
}

impl ResolveError {
    /// Creates a `MetadataLookupFailed` error.
    #[must_use]
    pub fn metadata_lookup_failed(playlist: &str, reason: impl Into<String>) -> Self {
        Self::MetadataLookupFailed {
            playlist: playlist.to_string(),
            reason: reason.into(),
        }
    }

    /// Creates a `MissingCredentials` error.
    #[must_use]
    pub fn missing_credentials(path: impl Into<PathBuf>) -> Self {
        Self::MissingCredentials { path: path.into() }
    }
}
