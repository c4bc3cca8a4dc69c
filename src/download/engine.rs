//! Bounded-retry wrapper around a single stream transfer.
//!
//! A failed transfer restarts from byte 0 into the same destination path;
//! there is no resume. The number of attempts and the delay between them
//! come from a [`RetryPolicy`].

use std::path::Path;

use tracing::{debug, info, instrument};

use super::progress::ProgressFactory;
use super::retry::{RetryDecision, RetryPolicy, classify_error};
use super::{DownloadError, HttpClient, TransferResult};

/// Transfers `url` into `dest`, retrying transient failures per `policy`.
///
/// A fresh progress indicator labelled `label` is started for every attempt.
///
/// # Errors
///
/// Returns the last [`DownloadError`] once the policy refuses another attempt.
#[instrument(skip(client, policy, progress), fields(url = %url, dest = %dest.display()))]
pub async fn download_with_retry(
    client: &HttpClient,
    url: &str,
    dest: &Path,
    label: &str,
    policy: &RetryPolicy,
    progress: &dyn ProgressFactory,
) -> Result<TransferResult, DownloadError> {
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        debug!(attempt, "attempting transfer");

        match client.transfer(url, dest, label, progress).await {
            Ok(mut result) => {
                result.attempts = attempt;
                return Ok(result);
            }
            Err(error) => match policy.should_retry(classify_error(&error), attempt) {
                RetryDecision::Retry {
                    delay,
                    attempt: next_attempt,
                } => {
                    info!(
                        attempt = next_attempt,
                        max_attempts = policy.max_attempts(),
                        delay_ms = delay.as_millis(),
                        error = %error,
                        "retrying transfer"
                    );
                    tokio::time::sleep(delay).await;
                }
                RetryDecision::DoNotRetry { reason } => {
                    debug!(%reason, "not retrying transfer");
                    return Err(error);
                }
            },
        }
    }
}
