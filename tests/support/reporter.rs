//! Item reporter that records events in order.

use std::sync::{Arc, Mutex};

use tubefetch_core::{ItemReport, ItemReporter};

#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    events: Arc<Mutex<Vec<String>>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl ItemReporter for RecordingReporter {
    fn input_started(&self, url: &str) {
        self.push(format!("start {url}"));
    }

    fn playlist_resolved(&self, _url: &str, title: &str, members: usize) {
        self.push(format!("playlist {title} ({members})"));
    }

    fn item_finished(&self, report: &ItemReport) {
        let status = if report.is_success() { "done" } else { "fail" };
        self.push(format!("{status} {}", report.url));
    }
}
