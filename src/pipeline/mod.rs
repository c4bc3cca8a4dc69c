//! Per-input driver: resolve, select, transfer, report.
//!
//! Inputs are processed strictly in order and one item at a time. A failure
//! in one item is reported and never stops the remaining items; a playlist
//! failure before member iteration counts as one failed item for the
//! playlist URL.

mod config;
mod error;
mod report;
mod reporter;

use std::path::{Path, PathBuf};

use tracing::{debug, error, info, instrument, warn};

use crate::download::filename::{output_path, sanitize_filename};
use crate::download::{
    FailureType, HttpClient, ProgressFactory, RetryDecision, download_with_retry,
};
use crate::media::MediaSource;
use crate::resolver::{InputKind, PlaylistTitleLookup, classify_input};
use crate::select::select_stream;

pub use config::{DownloadRequest, PipelineConfig};
pub use error::ItemError;
pub use report::{ItemOutcome, ItemReport, ItemState, RunSummary};
pub use reporter::{ItemReporter, NoReporter};

/// Sequential download pipeline wired to its collaborators.
pub struct Pipeline {
    media: Box<dyn MediaSource>,
    titles: Box<dyn PlaylistTitleLookup>,
    client: HttpClient,
    progress: Box<dyn ProgressFactory>,
    reporter: Box<dyn ItemReporter>,
    config: PipelineConfig,
}

impl Pipeline {
    /// Creates a pipeline from its collaborators and run-wide settings.
    #[must_use]
    pub fn new(
        media: Box<dyn MediaSource>,
        titles: Box<dyn PlaylistTitleLookup>,
        client: HttpClient,
        progress: Box<dyn ProgressFactory>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            media,
            titles,
            client,
            progress,
            reporter: Box::new(NoReporter),
            config,
        }
    }

    /// Sends per-item events to `reporter` as each item finishes.
    #[must_use]
    pub fn with_reporter(mut self, reporter: Box<dyn ItemReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Processes every input in order and collects one report per item.
    pub async fn run(&self, inputs: &[String]) -> RunSummary {
        let mut summary = RunSummary::default();
        for input in inputs {
            let reports = self.process_input(input).await;
            summary.extend(reports);
        }
        info!(
            completed = summary.completed(),
            failed = summary.failed(),
            "run finished"
        );
        summary
    }

    /// Processes one input URL, which may expand to many playlist members.
    #[instrument(skip(self))]
    pub async fn process_input(&self, url: &str) -> Vec<ItemReport> {
        info!("Getting info on {url}");
        self.reporter.input_started(url);
        match classify_input(url) {
            InputKind::Single => {
                let request = DownloadRequest::new(url, self.config.folder.clone(), &self.config);
                let outcome = self.download_item(&request, true).await;
                vec![self.finish(ItemReport::new(url, outcome))]
            }
            InputKind::Playlist => self.process_playlist(url).await,
        }
    }

    fn finish(&self, report: ItemReport) -> ItemReport {
        self.reporter.item_finished(&report);
        report
    }

    async fn process_playlist(&self, url: &str) -> Vec<ItemReport> {
        let (folder, entries) = match self.prepare_playlist(url).await {
            Ok(prepared) => prepared,
            Err(err) => {
                error!(url, stage = err.stage(), error = %err, "playlist failed");
                return vec![self.finish(ItemReport::new(url, Err(err)))];
            }
        };

        if entries.is_empty() {
            warn!(url, "playlist has no members");
            return Vec::new();
        }

        let mut reports = Vec::with_capacity(entries.len());
        for member in entries {
            let request = DownloadRequest::new(member.as_str(), Some(folder.clone()), &self.config);
            let outcome = self.download_member(&request).await;
            reports.push(self.finish(ItemReport::new(member, outcome)));
        }
        reports
    }

    /// Lists members, resolves the title and creates the folder exactly once.
    ///
    /// The title is resolved even when a folder was supplied, so a failed
    /// lookup fails the playlist either way.
    async fn prepare_playlist(&self, url: &str) -> Result<(PathBuf, Vec<String>), ItemError> {
        let playlist = self.media.fetch_playlist(url).await?;
        debug!(
            source = self.media.name(),
            members = playlist.entries.len(),
            "playlist members listed"
        );

        let title = self.titles.lookup(url, &playlist).await?;
        info!(lookup = self.titles.name(), "Playlist Title: {title}");
        self.reporter
            .playlist_resolved(url, &title, playlist.entries.len());

        let folder = self
            .config
            .folder
            .clone()
            .unwrap_or_else(|| PathBuf::from(sanitize_filename(&title)));

        create_folder(&folder).await?;
        info!(folder = %folder.display(), "playlist folder ready");
        Ok((folder, playlist.entries))
    }

    /// Runs the whole per-item pipeline again while failures stay transient.
    async fn download_member(&self, request: &DownloadRequest) -> Result<ItemOutcome, ItemError> {
        let policy = &self.config.member_retry;
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            let err = match self.download_item(request, false).await {
                Ok(outcome) => return Ok(outcome),
                Err(err) => err,
            };

            let failure = err.failure_type();
            match policy.should_retry(failure, attempt) {
                RetryDecision::Retry {
                    delay,
                    attempt: next_attempt,
                } => {
                    warn!(
                        url = %request.url,
                        attempt = next_attempt,
                        max_attempts = policy.max_attempts(),
                        error = %err,
                        "Error downloading video. Retrying..."
                    );
                    tokio::time::sleep(delay).await;
                }
                RetryDecision::DoNotRetry { reason } => {
                    if failure == FailureType::Transient {
                        error!(url = %request.url, error = %err, "max retries reached, unable to download");
                    } else {
                        debug!(%reason, "not retrying member");
                    }
                    return Err(err);
                }
            }
        }
    }

    /// Resolves, selects and transfers one item.
    ///
    /// When `create_dir` is set the destination folder is created right
    /// before the transfer; playlist members rely on the playlist having
    /// created it.
    ///
    /// # Errors
    ///
    /// Returns the [`ItemError`] of the first stage that failed. Every
    /// failure is also logged at error level.
    #[instrument(skip(self, request), fields(url = %request.url))]
    pub async fn download_item(
        &self,
        request: &DownloadRequest,
        create_dir: bool,
    ) -> Result<ItemOutcome, ItemError> {
        let result = self.run_stages(request, create_dir).await;
        match &result {
            Ok(outcome) => {
                debug!(state = %ItemState::Done, "item state");
                info!(
                    path = %outcome.path.display(),
                    bytes = outcome.bytes_written,
                    quality = %outcome.quality,
                    "item downloaded"
                );
            }
            Err(err) => {
                debug!(state = %ItemState::Failed, "item state");
                error!(stage = err.stage(), error = %err, "download failed");
            }
        }
        result
    }

    async fn run_stages(
        &self,
        request: &DownloadRequest,
        create_dir: bool,
    ) -> Result<ItemOutcome, ItemError> {
        debug!(state = %ItemState::Pending, "item state");

        debug!(state = %ItemState::Resolving, "item state");
        let info = self.media.fetch_video(&request.url).await?;

        debug!(state = %ItemState::Selecting, "item state");
        let selection = select_stream(
            &info,
            &request.quality,
            request.audio_only,
            &self.config.fallback_resolution,
        )?;

        debug!(state = %ItemState::Transferring, "item state");
        if create_dir && let Some(folder) = &request.folder {
            create_folder(folder).await?;
        }

        let dest = output_path(request.folder.as_deref(), &info.title, request.audio_only);
        let label = format!("Downloading '{}' :: {}", info.title, selection.quality);
        let transfer = download_with_retry(
            &self.client,
            &selection.stream.url,
            &dest,
            &label,
            &self.config.transfer_retry,
            self.progress.as_ref(),
        )
        .await?;

        Ok(ItemOutcome {
            title: info.title,
            path: transfer.path,
            quality: selection.quality,
            audio_only: request.audio_only,
            used_fallback: selection.used_fallback,
            bytes_written: transfer.bytes_written,
            attempts: transfer.attempts,
        })
    }
}

async fn create_folder(folder: &Path) -> Result<(), ItemError> {
    tokio::fs::create_dir_all(folder)
        .await
        .map_err(|source| ItemError::Io {
            path: folder.to_path_buf(),
            source,
        })
}
