//! Tubefetch Core Library
//!
//! This library provides the core functionality for the tubefetch tool,
//! which downloads single videos, audio tracks and whole playlists from a
//! video-hosting platform into local files.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`resolver`] - Input splitting, playlist detection and playlist titles
//! - [`media`] - Media-source abstraction backed by the `yt-dlp` executable
//! - [`select`] - Stream selection by quality with a single fallback
//! - [`download`] - Chunked HTTP transfer engine with progress and retry
//! - [`pipeline`] - Sequential per-item driver tying the stages together

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod download;
pub mod media;
pub mod pipeline;
pub mod resolver;
pub mod select;
#[cfg(test)]
pub mod test_support;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use download::{
    ConsoleProgress, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY, DownloadError, FailureType,
    HttpClient, NoProgress, ProgressFactory, RetryDecision, RetryPolicy, TransferProgress,
    classify_error,
};
pub use media::{
    DEFAULT_YT_DLP_PROGRAM, MediaError, MediaSource, PlaylistInfo, StreamHandle, VideoInfo, YtDlp,
};
pub use pipeline::{
    DownloadRequest, ItemError, ItemOutcome, ItemReport, ItemReporter, ItemState, NoReporter,
    Pipeline, PipelineConfig, RunSummary,
};
pub use resolver::{
    DEFAULT_API_BASE_URL, DEFAULT_API_KEY_PATH, DataApiTitleLookup, InputKind,
    MetadataTitleLookup, PlaylistTitleLookup, ResolveError, TitleSource, classify_input,
    split_inputs,
};
pub use select::{
    DEFAULT_RESOLUTION, FALLBACK_RESOLUTION, SelectError, Selection, StreamKind, select_stream,
};
