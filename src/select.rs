//! Stream selection by kind, container and quality with one fallback.
//!
//! Audio-only requests take the first audio-only stream. Video requests take
//! the first progressive `mp4` stream at the requested quality, then retry
//! once against the fallback quality. The quality actually used is carried
//! in the [`Selection`] so messages and filenames report what was fetched.

use std::fmt;

use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::media::{StreamHandle, VideoInfo};

/// Quality requested when the caller does not choose one.
pub const DEFAULT_RESOLUTION: &str = "1080p";

/// The single fallback quality tried when the requested one is missing.
pub const FALLBACK_RESOLUTION: &str = "720p";

/// Container required for progressive video streams.
pub const VIDEO_CONTAINER: &str = "mp4";

/// What kind of stream a failed selection was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    /// Audio without video.
    Audio,
    /// Progressive audio+video.
    Video,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Audio => f.write_str("audio"),
            Self::Video => f.write_str("video"),
        }
    }
}

/// Selection failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectError {
    /// Neither the requested nor the fallback quality is available.
    #[error("no suitable {kind} stream found (requested {requested}{})", fallback_note(.fallback.as_deref()))]
    NoMatchingStream {
        /// Kind of stream that was looked for.
        kind: StreamKind,
        /// Quality originally requested.
        requested: String,
        /// Fallback quality that was also tried, if any.
        fallback: Option<String>,
    },
}

fn fallback_note(fallback: Option<&str>) -> String {
    fallback
        .map(|quality| format!(", fallback {quality}"))
        .unwrap_or_default()
}

/// The stream to transfer and the quality that goes into messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Chosen stream.
    pub stream: StreamHandle,
    /// Quality descriptor actually used.
    pub quality: String,
    /// Whether the fallback quality was needed.
    pub used_fallback: bool,
}

/// Picks a stream from `info`.
///
/// `fallback` is the single lower-quality descriptor tried when `quality`
/// is missing. It is skipped for audio-only requests and when it equals
/// `quality`.
///
/// # Errors
///
/// Returns [`SelectError::NoMatchingStream`] when no stream qualifies.
#[instrument(skip(info), fields(title = %info.title, streams = info.streams.len()))]
pub fn select_stream(
    info: &VideoInfo,
    quality: &str,
    audio_only: bool,
    fallback: &str,
) -> Result<Selection, SelectError> {
    if audio_only {
        return info
            .streams
            .iter()
            .find(|stream| stream.is_audio_only())
            .map(|stream| Selection {
                quality: stream
                    .quality
                    .clone()
                    .unwrap_or_else(|| quality.to_string()),
                stream: stream.clone(),
                used_fallback: false,
            })
            .ok_or_else(|| SelectError::NoMatchingStream {
                kind: StreamKind::Audio,
                requested: quality.to_string(),
                fallback: None,
            });
    }

    if let Some(stream) = find_progressive(info, quality) {
        debug!(quality, "requested quality available");
        return Ok(Selection {
            stream: stream.clone(),
            quality: quality.to_string(),
            used_fallback: false,
        });
    }

    if fallback.trim().eq_ignore_ascii_case(quality.trim()) {
        return Err(SelectError::NoMatchingStream {
            kind: StreamKind::Video,
            requested: quality.to_string(),
            fallback: None,
        });
    }

    warn!(
        requested = quality,
        fallback, "requested quality not available, using fallback"
    );

    find_progressive(info, fallback)
        .map(|stream| Selection {
            stream: stream.clone(),
            quality: fallback.to_string(),
            used_fallback: true,
        })
        .ok_or_else(|| SelectError::NoMatchingStream {
            kind: StreamKind::Video,
            requested: quality.to_string(),
            fallback: Some(fallback.to_string()),
        })
}

fn find_progressive<'a>(info: &'a VideoInfo, quality: &str) -> Option<&'a StreamHandle> {
    info.streams.iter().find(|stream| {
        stream.is_progressive() && stream.has_container(VIDEO_CONTAINER) && stream.has_quality(quality)
    })
}
