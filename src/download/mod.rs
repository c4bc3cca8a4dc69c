//! Transfer engine for streaming media files to disk.
//!
//! This module downloads a resolved stream URL into a local file with
//! fixed-size chunked writes, a byte-count progress indicator and a
//! bounded retry around transient failures.
//!
//! # Features
//!
//! - Streaming downloads in 1024-byte chunks, flushed one at a time
//! - Bounded connect and read timeouts (10s each by default)
//! - Structured error types with full context
//! - Explicit retry policy instead of recursive re-invocation
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use tubefetch_core::download::{HttpClient, NoProgress};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new();
//! let result = client
//!     .transfer(
//!         "https://cdn.example.com/videoplayback",
//!         Path::new("clip.mp4"),
//!         "clip",
//!         &NoProgress,
//!     )
//!     .await?;
//! println!("Wrote {} bytes", result.bytes_written);
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod engine;
mod error;
pub mod filename;
pub mod progress;
mod retry;

pub use client::{HttpClient, TransferResult};
pub use constants::{
    CHUNK_SIZE, CONNECT_TIMEOUT_SECS, DEFAULT_TRANSFER_ATTEMPTS, DEFAULT_TRANSFER_RETRY_DELAY,
    READ_TIMEOUT_SECS,
};
pub use engine::download_with_retry;
pub use error::DownloadError;
pub use progress::{ConsoleProgress, NoProgress, ProgressFactory, TransferProgress};
pub use retry::{
    DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY, FailureType, RetryDecision, RetryPolicy,
    classify_error,
};

// Note: we do NOT define module-local Result aliases.
// Use `Result<T, DownloadError>` explicitly in function signatures.
