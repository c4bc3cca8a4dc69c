//! Media-resolution collaborator: stream lists and playlist members.
//!
//! The platform protocol itself is not implemented here. A [`MediaSource`]
//! turns a watch URL into a [`VideoInfo`] (title plus ordered stream list)
//! and a playlist URL into a [`PlaylistInfo`]. The production source drives
//! the `yt-dlp` executable ([`YtDlp`]); tests substitute in-memory stubs.
//!
//! # Object Safety
//!
//! This trait uses `async_trait` so the pipeline can hold a
//! `Box<dyn MediaSource>`.

mod error;
mod ytdlp;

pub use error::MediaError;
pub use ytdlp::{DEFAULT_YT_DLP_PROGRAM, YtDlp};

use async_trait::async_trait;

/// A selectable media stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamHandle {
    /// Resolved byte-source URL.
    pub url: String,
    /// Quality descriptor such as `1080p`, when the source reports one.
    pub quality: Option<String>,
    /// Container extension such as `mp4` or `webm`.
    pub container: String,
    /// Stream carries an audio track.
    pub has_audio: bool,
    /// Stream carries a video track.
    pub has_video: bool,
}

impl StreamHandle {
    /// Audio and video multiplexed together.
    #[must_use]
    pub fn is_progressive(&self) -> bool {
        self.has_audio && self.has_video
    }

    /// Audio without video.
    #[must_use]
    pub fn is_audio_only(&self) -> bool {
        self.has_audio && !self.has_video
    }

    /// Compares the quality descriptor, ignoring ASCII case and surrounding whitespace.
    #[must_use]
    pub fn has_quality(&self, descriptor: &str) -> bool {
        self.quality
            .as_deref()
            .is_some_and(|quality| quality.trim().eq_ignore_ascii_case(descriptor.trim()))
    }

    /// Compares the container extension, ignoring ASCII case.
    #[must_use]
    pub fn has_container(&self, container: &str) -> bool {
        self.container.eq_ignore_ascii_case(container)
    }
}

/// Title and streams of a single item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoInfo {
    /// Display title, unsanitized.
    pub title: String,
    /// Streams in the order the source lists them.
    pub streams: Vec<StreamHandle>,
}

/// Members of a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaylistInfo {
    /// Platform playlist id, when known.
    pub id: Option<String>,
    /// Display title from playlist metadata, when known.
    pub title: Option<String>,
    /// Member watch URLs in playlist order.
    pub entries: Vec<String>,
}

/// Resolves URLs into stream lists and playlist members.
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Returns the source's name for logging (e.g., "yt-dlp").
    fn name(&self) -> &str;

    /// Fetches title and streams for one item.
    async fn fetch_video(&self, url: &str) -> Result<VideoInfo, MediaError>;

    /// Enumerates playlist members without resolving their streams.
    async fn fetch_playlist(&self, url: &str) -> Result<PlaylistInfo, MediaError>;
}
