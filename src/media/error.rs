//! Error types for the media-resolution collaborator.

use thiserror::Error;

/// Errors raised while asking the media source for stream or playlist data.
#[derive(Debug, Error)]
pub enum MediaError {
    /// The media-source executable is not installed or not on `PATH`.
    #[error("media source executable '{program}' not found\n  Suggestion: install yt-dlp or pass --yt-dlp <PATH>")]
    ToolNotFound {
        /// Program that could not be started.
        program: String,
    },

    /// The executable exists but could not be started.
    #[error("failed to run '{program}': {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The executable ran but reported failure.
    #[error("media source failed for {url} (exit code {code:?}): {stderr}")]
    ToolFailed {
        /// URL that was being resolved.
        url: String,
        /// Exit code when the process exited normally.
        code: Option<i32>,
        /// Trimmed standard error output.
        stderr: String,
    },

    /// The executable's JSON output could not be parsed.
    #[error("unreadable media metadata for {url}: {source}")]
    Parse {
        /// URL that was being resolved.
        url: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl MediaError {
    /// Creates a `ToolFailed` error from raw stderr bytes.
    pub fn tool_failed(url: impl Into<String>, code: Option<i32>, stderr: &[u8]) -> Self {
        Self::ToolFailed {
            url: url.into(),
            code,
            stderr: String::from_utf8_lossy(stderr).trim().to_string(),
        }
    }
}
