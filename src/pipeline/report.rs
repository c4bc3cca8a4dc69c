//! Item states, outcomes and the run summary.

use std::fmt;
use std::path::PathBuf;

use super::ItemError;

/// Per-item lifecycle, logged as the item moves through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    Pending,
    Resolving,
    Selecting,
    Transferring,
    Done,
    Failed,
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Resolving => "resolving",
            Self::Selecting => "selecting",
            Self::Transferring => "transferring",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// A successfully downloaded item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    pub title: String,
    pub path: PathBuf,
    /// Quality actually downloaded, which is the fallback when one was used.
    pub quality: String,
    pub audio_only: bool,
    pub used_fallback: bool,
    pub bytes_written: u64,
    /// Transfer attempts for the final, successful item attempt.
    pub attempts: u32,
}

impl ItemOutcome {
    /// `Downloaded: <title> at <quality>`, suffixed with ` (MP3)` for audio.
    #[must_use]
    pub fn message(&self) -> String {
        let suffix = if self.audio_only { " (MP3)" } else { "" };
        format!("Downloaded: {} at {}{suffix}", self.title, self.quality)
    }
}

/// Result of one item, keyed by the URL it came from.
#[derive(Debug)]
pub struct ItemReport {
    pub url: String,
    pub outcome: Result<ItemOutcome, ItemError>,
}

impl ItemReport {
    #[must_use]
    pub fn new(url: impl Into<String>, outcome: Result<ItemOutcome, ItemError>) -> Self {
        Self {
            url: url.into(),
            outcome,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Every report of one run, in processing order.
#[derive(Debug, Default)]
pub struct RunSummary {
    reports: Vec<ItemReport>,
}

impl RunSummary {
    /// Appends reports in order.
    pub fn extend(&mut self, reports: impl IntoIterator<Item = ItemReport>) {
        self.reports.extend(reports);
    }

    #[must_use]
    pub fn reports(&self) -> &[ItemReport] {
        &self.reports
    }

    #[must_use]
    pub fn completed(&self) -> usize {
        self.reports.iter().filter(|r| r.is_success()).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.reports.len() - self.completed()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.reports.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::DownloadError;

    fn outcome(audio_only: bool) -> ItemOutcome {
        ItemOutcome {
            title: "Lecture 1".to_string(),
            path: PathBuf::from("Lecture 1.mp4"),
            quality: "720p".to_string(),
            audio_only,
            used_fallback: true,
            bytes_written: 10,
            attempts: 1,
        }
    }

    #[test]
    fn test_message_for_video() {
        assert_eq!(outcome(false).message(), "Downloaded: Lecture 1 at 720p");
    }

    #[test]
    fn test_message_for_audio_has_mp3_suffix() {
        assert_eq!(
            outcome(true).message(),
            "Downloaded: Lecture 1 at 720p (MP3)"
        );
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = RunSummary::default();
        summary.extend([
            ItemReport::new("a", Ok(outcome(false))),
            ItemReport::new(
                "b",
                Err(ItemError::from(DownloadError::timeout("https://cdn/b"))),
            ),
            ItemReport::new("c", Ok(outcome(true))),
        ]);
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.completed(), 2);
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.reports()[1].url, "b");
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ItemState::Transferring.to_string(), "transferring");
        assert_eq!(ItemState::Failed.to_string(), "failed");
    }
}
