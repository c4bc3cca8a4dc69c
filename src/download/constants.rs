//! Constants for the download module (timeouts, chunking, retry defaults).

use std::time::Duration;

/// Default HTTP connect timeout for stream transfers (10 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default HTTP read timeout for stream transfers (10 seconds).
pub const READ_TIMEOUT_SECS: u64 = 10;

/// Size of each chunk written to disk before the progress indicator advances.
pub const CHUNK_SIZE: usize = 1024;

/// Attempts for a single stream transfer (the first try plus one retry).
pub const DEFAULT_TRANSFER_ATTEMPTS: u32 = 2;

/// Fixed delay between single-transfer retry attempts.
pub const DEFAULT_TRANSFER_RETRY_DELAY: Duration = Duration::from_secs(1);
