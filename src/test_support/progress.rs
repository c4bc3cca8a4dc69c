//! Progress factory that records every update for assertions.

use std::sync::{Arc, Mutex};

use crate::download::{ProgressFactory, TransferProgress};

#[derive(Debug, Default)]
struct Recorded {
    labels: Vec<String>,
    totals: Vec<u64>,
    advances: Vec<u64>,
    finished: usize,
}

/// Records labels, declared totals and advances across all transfers it starts.
#[derive(Debug, Default, Clone)]
pub struct RecordingProgress {
    inner: Arc<Mutex<Recorded>>,
}

#[allow(clippy::unwrap_used)]
impl RecordingProgress {
    pub fn labels(&self) -> Vec<String> {
        self.inner.lock().unwrap().labels.clone()
    }

    pub fn totals(&self) -> Vec<u64> {
        self.inner.lock().unwrap().totals.clone()
    }

    pub fn advances(&self) -> Vec<u64> {
        self.inner.lock().unwrap().advances.clone()
    }

    pub fn total_advanced(&self) -> u64 {
        self.inner.lock().unwrap().advances.iter().sum()
    }

    pub fn finished_count(&self) -> usize {
        self.inner.lock().unwrap().finished
    }
}

#[allow(clippy::unwrap_used)]
impl ProgressFactory for RecordingProgress {
    fn start(&self, label: &str, total: u64) -> Box<dyn TransferProgress> {
        {
            let mut recorded = self.inner.lock().unwrap();
            recorded.labels.push(label.to_string());
            recorded.totals.push(total);
        }
        Box::new(RecordingHandle {
            inner: Arc::clone(&self.inner),
        })
    }
}

struct RecordingHandle {
    inner: Arc<Mutex<Recorded>>,
}

#[allow(clippy::unwrap_used)]
impl TransferProgress for RecordingHandle {
    fn advance(&mut self, bytes: u64) {
        self.inner.lock().unwrap().advances.push(bytes);
    }

    fn finish(&mut self) {
        self.inner.lock().unwrap().finished += 1;
    }
}
