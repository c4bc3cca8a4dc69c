//! `yt-dlp` backed media source.
//!
//! Metadata is read from `yt-dlp --dump-single-json`; no media is downloaded
//! by the executable itself. Stream bytes are fetched by the transfer engine
//! from the direct URLs listed in the JSON.

use std::io::ErrorKind;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::process::Command;
use tracing::{debug, instrument};

use super::{MediaError, MediaSource, PlaylistInfo, StreamHandle, VideoInfo};

/// Executable looked up on `PATH` when no explicit path is configured.
pub const DEFAULT_YT_DLP_PROGRAM: &str = "yt-dlp";

/// Watch URL prefix for flat playlist entries that only carry an id.
const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// Media source that shells out to `yt-dlp`.
#[derive(Debug, Clone)]
pub struct YtDlp {
    program: String,
}

impl YtDlp {
    /// Creates a source that runs `program`.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    async fn run_json<T: DeserializeOwned>(&self, args: &[&str], url: &str) -> Result<T, MediaError> {
        debug!(program = %self.program, ?args, "running media source");

        let output = Command::new(&self.program)
            .args(args)
            .arg(url)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| {
                if source.kind() == ErrorKind::NotFound {
                    MediaError::ToolNotFound {
                        program: self.program.clone(),
                    }
                } else {
                    MediaError::Spawn {
                        program: self.program.clone(),
                        source,
                    }
                }
            })?;

        if !output.status.success() {
            return Err(MediaError::tool_failed(
                url,
                output.status.code(),
                &output.stderr,
            ));
        }

        serde_json::from_slice(&output.stdout).map_err(|source| MediaError::Parse {
            url: url.to_string(),
            source,
        })
    }
}

impl Default for YtDlp {
    fn default() -> Self {
        Self::new(DEFAULT_YT_DLP_PROGRAM)
    }
}

#[async_trait]
impl MediaSource for YtDlp {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    #[instrument(skip(self), fields(source = "yt-dlp"))]
    async fn fetch_video(&self, url: &str) -> Result<VideoInfo, MediaError> {
        let raw: RawVideo = self
            .run_json(
                &["--dump-single-json", "--no-playlist", "--no-warnings"],
                url,
            )
            .await?;
        Ok(raw.into_video_info())
    }

    #[instrument(skip(self), fields(source = "yt-dlp"))]
    async fn fetch_playlist(&self, url: &str) -> Result<PlaylistInfo, MediaError> {
        let raw: RawPlaylist = self
            .run_json(
                &["--dump-single-json", "--flat-playlist", "--no-warnings"],
                url,
            )
            .await?;
        Ok(raw.into_playlist_info())
    }
}

#[derive(Debug, Deserialize)]
struct RawVideo {
    #[serde(default)]
    title: String,
    #[serde(default)]
    formats: Vec<RawFormat>,
}

#[derive(Debug, Deserialize)]
struct RawFormat {
    url: Option<String>,
    ext: Option<String>,
    vcodec: Option<String>,
    acodec: Option<String>,
    height: Option<u32>,
    format_note: Option<String>,
    protocol: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPlaylist {
    id: Option<String>,
    title: Option<String>,
    #[serde(default)]
    entries: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    id: Option<String>,
    url: Option<String>,
}

impl RawVideo {
    fn into_video_info(self) -> VideoInfo {
        VideoInfo {
            title: self.title,
            streams: self
                .formats
                .into_iter()
                .filter_map(RawFormat::into_stream)
                .collect(),
        }
    }
}

impl RawFormat {
    /// Keeps only formats fetchable with a single GET.
    fn into_stream(self) -> Option<StreamHandle> {
        let url = self.url?;
        if !matches!(self.protocol.as_deref(), None | Some("http" | "https")) {
            return None;
        }
        let has_video = codec_present(self.vcodec.as_deref());
        let has_audio = codec_present(self.acodec.as_deref());
        let quality = if has_video {
            self.height.map(|height| format!("{height}p"))
        } else {
            self.format_note
        };
        Some(StreamHandle {
            url,
            quality,
            container: self.ext.unwrap_or_default(),
            has_audio,
            has_video,
        })
    }
}

fn codec_present(codec: Option<&str>) -> bool {
    codec.is_some_and(|codec| !codec.is_empty() && codec != "none")
}

impl RawPlaylist {
    fn into_playlist_info(self) -> PlaylistInfo {
        PlaylistInfo {
            id: self.id,
            title: self.title.filter(|title| !title.trim().is_empty()),
            entries: self
                .entries
                .into_iter()
                .filter_map(|entry| match (entry.url, entry.id) {
                    (Some(url), _) if url.starts_with("http") => Some(url),
                    (_, Some(id)) => Some(format!("{WATCH_URL_PREFIX}{id}")),
                    (Some(url), None) => Some(format!("{WATCH_URL_PREFIX}{url}")),
                    (None, None) => None,
                })
                .collect(),
        }
    }
}
