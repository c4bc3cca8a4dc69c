//! In-memory media source for driving the pipeline without yt-dlp.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tubefetch_core::{MediaError, MediaSource, PlaylistInfo, StreamHandle, VideoInfo};

/// Serves canned videos and playlists and records every lookup.
#[derive(Debug, Default, Clone)]
pub struct StubMediaSource {
    videos: HashMap<String, VideoInfo>,
    playlists: HashMap<String, PlaylistInfo>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl StubMediaSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_video(mut self, url: &str, info: VideoInfo) -> Self {
        self.videos.insert(url.to_string(), info);
        self
    }

    pub fn with_playlist(mut self, url: &str, playlist: PlaylistInfo) -> Self {
        self.playlists.insert(url.to_string(), playlist);
        self
    }

    /// URLs passed to `fetch_video`, in call order.
    pub fn video_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn video_call_count(&self, url: &str) -> usize {
        self.video_calls().iter().filter(|call| *call == url).count()
    }
}

#[async_trait]
impl MediaSource for StubMediaSource {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn fetch_video(&self, url: &str) -> Result<VideoInfo, MediaError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.videos
            .get(url)
            .cloned()
            .ok_or_else(|| MediaError::tool_failed(url, Some(1), b"ERROR: Video unavailable"))
    }

    async fn fetch_playlist(&self, url: &str) -> Result<PlaylistInfo, MediaError> {
        self.playlists
            .get(url)
            .cloned()
            .ok_or_else(|| MediaError::tool_failed(url, Some(1), b"ERROR: playlist does not exist"))
    }
}

/// Progressive mp4 stream at `quality`, served from `url`.
pub fn progressive(url: String, quality: &str) -> StreamHandle {
    StreamHandle {
        url,
        quality: Some(quality.to_string()),
        container: "mp4".to_string(),
        has_audio: true,
        has_video: true,
    }
}

/// Audio-only stream served from `url`.
pub fn audio_only(url: String, bitrate: &str) -> StreamHandle {
    StreamHandle {
        url,
        quality: Some(bitrate.to_string()),
        container: "m4a".to_string(),
        has_audio: true,
        has_video: false,
    }
}

pub fn video(title: &str, streams: Vec<StreamHandle>) -> VideoInfo {
    VideoInfo {
        title: title.to_string(),
        streams,
    }
}
