//! Explicit configuration passed through the pipeline.

use std::path::PathBuf;

use crate::download::{DEFAULT_TRANSFER_ATTEMPTS, DEFAULT_TRANSFER_RETRY_DELAY, RetryPolicy};
use crate::select::{DEFAULT_RESOLUTION, FALLBACK_RESOLUTION};

/// Settings shared by every item of one run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Destination folder; playlists default to their title when unset.
    pub folder: Option<PathBuf>,
    /// Requested quality descriptor.
    pub resolution: String,
    /// Single fallback quality descriptor.
    pub fallback_resolution: String,
    /// Keep only the audio stream.
    pub audio_only: bool,
    /// Whole-item retry loop for playlist members.
    pub member_retry: RetryPolicy,
    /// Retry loop around a single stream transfer.
    pub transfer_retry: RetryPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            folder: None,
            resolution: DEFAULT_RESOLUTION.to_string(),
            fallback_resolution: FALLBACK_RESOLUTION.to_string(),
            audio_only: false,
            member_retry: RetryPolicy::default(),
            transfer_retry: RetryPolicy::fixed(
                DEFAULT_TRANSFER_ATTEMPTS,
                DEFAULT_TRANSFER_RETRY_DELAY,
            ),
        }
    }
}

/// One item to download.
///
/// Playlist members inherit folder, quality and audio flag from the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    /// Watch URL.
    pub url: String,
    /// Destination folder, current directory when `None`.
    pub folder: Option<PathBuf>,
    /// Requested quality descriptor.
    pub quality: String,
    /// Keep only the audio stream.
    pub audio_only: bool,
}

impl DownloadRequest {
    /// Builds a request for `url` from run-wide settings and a folder.
    #[must_use]
    pub fn new(url: impl Into<String>, folder: Option<PathBuf>, config: &PipelineConfig) -> Self {
        Self {
            url: url.into(),
            folder,
            quality: config.resolution.clone(),
            audio_only: config.audio_only,
        }
    }
}
