//! Byte-count progress reporting for stream transfers.
//!
//! The transfer engine only talks to [`TransferProgress`]; the console bar
//! and the silent variant are interchangeable behind [`ProgressFactory`].

use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};

/// Receives byte counts as a single transfer advances.
pub trait TransferProgress: Send {
    /// Records `bytes` more bytes written to disk.
    fn advance(&mut self, bytes: u64);

    /// Marks the transfer as finished (successfully or not).
    fn finish(&mut self);
}

/// Creates one [`TransferProgress`] per transfer.
pub trait ProgressFactory: Send + Sync {
    /// Starts a progress indicator for a transfer of `total` bytes.
    ///
    /// `total` is 0 when the server did not declare a content length.
    fn start(&self, label: &str, total: u64) -> Box<dyn TransferProgress>;
}

/// Discards all progress updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl TransferProgress for NoProgress {
    fn advance(&mut self, _bytes: u64) {}

    fn finish(&mut self) {}
}

impl ProgressFactory for NoProgress {
    fn start(&self, _label: &str, _total: u64) -> Box<dyn TransferProgress> {
        Box::new(NoProgress)
    }
}

const BAR_TEMPLATE: &str =
    "{msg}: {percent:>3}%|{wide_bar}| {bytes}/{total_bytes} [{elapsed_precise}, {bytes_per_sec}]";
const SPINNER_TEMPLATE: &str = "{spinner} {msg}: {bytes} [{elapsed_precise}, {bytes_per_sec}]";

/// Console progress bar drawn on stderr with indicatif.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleProgress {
    enabled: bool,
}

impl ConsoleProgress {
    /// Creates a console progress factory.
    ///
    /// Bars are only drawn when `enabled` is true.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Draws bars only when stderr is an interactive terminal and output is not quiet.
    #[must_use]
    pub fn for_terminal(quiet: bool) -> Self {
        Self::new(!quiet && std::io::stderr().is_terminal())
    }
}

impl ProgressFactory for ConsoleProgress {
    fn start(&self, label: &str, total: u64) -> Box<dyn TransferProgress> {
        if !self.enabled {
            return Box::new(ConsoleBar {
                bar: ProgressBar::hidden(),
            });
        }

        let bar = if total > 0 {
            let bar = ProgressBar::new(total);
            bar.set_style(
                ProgressStyle::with_template(BAR_TEMPLATE)
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            bar
        } else {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::with_template(SPINNER_TEMPLATE)
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            bar
        };
        bar.set_message(label.to_string());
        Box::new(ConsoleBar { bar })
    }
}

struct ConsoleBar {
    bar: ProgressBar,
}

impl TransferProgress for ConsoleBar {
    fn advance(&mut self, bytes: u64) {
        self.bar.inc(bytes);
    }

    fn finish(&mut self) {
        self.bar.finish();
    }
}
