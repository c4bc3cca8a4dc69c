//! Progress factory that records every update for assertions.

use std::sync::{Arc, Mutex};

use tubefetch_core::{ProgressFactory, TransferProgress};

#[derive(Debug, Default)]
struct Recorded {
    labels: Vec<String>,
    totals: Vec<u64>,
    advances: Vec<u64>,
}

/// Shared handle; clone it before boxing it into a pipeline.
#[derive(Debug, Default, Clone)]
pub struct RecordingProgress {
    inner: Arc<Mutex<Recorded>>,
}

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
}

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

impl TransferProgress for RecordingHandle {
    fn advance(&mut self, bytes: u64) {
        self.inner.lock().unwrap().advances.push(bytes);
    }

    fn finish(&mut self) {}
}
