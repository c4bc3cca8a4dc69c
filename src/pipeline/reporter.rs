//! Per-item event sink, called as soon as each stage of a run completes.

use super::ItemReport;

/// Receives pipeline events in processing order.
///
/// Every input produces `input_started` first. Each finished item (or a
/// playlist that failed before its members ran) produces one
/// `item_finished` before the next item starts.
pub trait ItemReporter: Send + Sync {
    /// An input URL is about to be resolved.
    fn input_started(&self, url: &str);

    /// The title of the playlist at `url` was resolved.
    fn playlist_resolved(&self, url: &str, title: &str, members: usize);

    /// One item finished, successfully or not.
    fn item_finished(&self, report: &ItemReport);
}

/// Ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoReporter;

impl ItemReporter for NoReporter {
    fn input_started(&self, _url: &str) {}

    fn playlist_resolved(&self, _url: &str, _title: &str, _members: usize) {}

    fn item_finished(&self, _report: &ItemReport) {}
}
