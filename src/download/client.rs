//! HTTP client wrapper for streaming media to disk.
//!
//! This module provides the `HttpClient` struct which performs the chunked
//! stream transfer with bounded timeouts and structured errors.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use reqwest::header::CONTENT_LENGTH;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument};
use url::Url;

use super::constants::{CHUNK_SIZE, CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use super::error::DownloadError;
use super::progress::{ProgressFactory, TransferProgress};
use crate::user_agent;

/// HTTP client for streaming transfers.
///
/// Created once per run and reused for every item, taking advantage of
/// connection pooling.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

/// Outcome of a completed transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferResult {
    /// Final output path.
    pub path: PathBuf,
    /// Bytes written to disk.
    pub bytes_written: u64,
    /// Size declared by the server's `Content-Length` header, 0 when absent.
    pub content_length: u64,
    /// Attempts used, including the successful one.
    pub attempts: u32,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a new HTTP client with default timeouts.
    ///
    /// Default configuration:
    /// - Connect timeout: 10 seconds
    /// - Read timeout: 10 seconds between body reads
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self::with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
            .expect("failed to build HTTP client with static configuration")
    }

    /// Creates a new HTTP client with explicit timeout values.
    ///
    /// The read timeout bounds each wait for body data, not the whole
    /// transfer, so long videos are not cut off.
    ///
    /// # Errors
    ///
    /// Returns the builder error if the TLS backend cannot be initialized.
    pub fn with_timeouts(
        connect_timeout_secs: u64,
        read_timeout_secs: u64,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .read_timeout(Duration::from_secs(read_timeout_secs))
            .user_agent(user_agent::default_download_user_agent())
            .build()?;
        Ok(Self { client })
    }

    /// Streams `url` into `dest` in fixed 1024-byte chunks.
    ///
    /// The destination is created or truncated, so a repeated attempt
    /// overwrites the previous partial file instead of leaving a duplicate.
    /// Each chunk is flushed before the next one is read. A progress
    /// indicator labelled `label` is started from `progress` once the
    /// declared length is known, and advances by the chunk length after
    /// every write.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - The URL is invalid
    /// - The request fails (network error, timeout)
    /// - The server returns an error status (4xx, 5xx)
    /// - Writing to disk fails
    /// - The body is shorter or longer than the declared content length
    ///
    /// On any error after the file was opened, the partial file is removed.
    #[instrument(skip(self, progress), fields(url = %url, dest = %dest.display()))]
    pub async fn transfer(
        &self,
        url: &str,
        dest: &Path,
        label: &str,
        progress: &dyn ProgressFactory,
    ) -> Result<TransferResult, DownloadError> {
        debug!("starting transfer");

        Url::parse(url).map_err(|_| DownloadError::invalid_url(url.to_string()))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }

        let content_length = declared_content_length(&response);
        debug!(content_length, "response accepted");

        let mut file = File::create(dest)
            .await
            .map_err(|e| DownloadError::io(dest.to_path_buf(), e))?;

        let mut indicator = progress.start(label, content_length);
        let stream_result =
            stream_to_file(&mut file, response, url, dest, indicator.as_mut()).await;
        indicator.finish();
        drop(file);

        let outcome = match stream_result {
            Ok(written) if content_length > 0 && written != content_length => Err(
                DownloadError::integrity(dest.to_path_buf(), content_length, written),
            ),
            other => other,
        };

        let bytes_written = match outcome {
            Ok(written) => written,
            Err(error) => {
                debug!(path = %dest.display(), "cleaning up partial file after error");
                let _ = tokio::fs::remove_file(dest).await;
                return Err(error);
            }
        };

        info!(
            path = %dest.display(),
            bytes = bytes_written,
            "transfer complete"
        );

        Ok(TransferResult {
            path: dest.to_path_buf(),
            bytes_written,
            content_length,
            attempts: 1,
        })
    }
}

/// Reads the `Content-Length` header, 0 when absent or malformed.
fn declared_content_length(response: &reqwest::Response) -> u64 {
    response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(0)
}

/// Re-chunks the response body into `CHUNK_SIZE` writes, returning bytes written.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
    progress: &mut dyn TransferProgress,
) -> Result<u64, DownloadError> {
    let mut stream = response.bytes_stream();
    let mut pending: Vec<u8> = Vec::with_capacity(CHUNK_SIZE);
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::network(url, e))?;
        let mut data: &[u8] = &chunk;

        while !data.is_empty() {
            let take = (CHUNK_SIZE - pending.len()).min(data.len());
            pending.extend_from_slice(&data[..take]);
            data = &data[take..];

            if pending.len() == CHUNK_SIZE {
                write_chunk(file, &pending, file_path).await?;
                bytes_written += pending.len() as u64;
                progress.advance(pending.len() as u64);
                pending.clear();
            }
        }
    }

    // Trailing partial chunk
    if !pending.is_empty() {
        write_chunk(file, &pending, file_path).await?;
        bytes_written += pending.len() as u64;
        progress.advance(pending.len() as u64);
    }

    Ok(bytes_written)
}

async fn write_chunk(file: &mut File, chunk: &[u8], file_path: &Path) -> Result<(), DownloadError> {
    file.write_all(chunk)
        .await
        .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;
    file.flush()
        .await
        .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use crate::test_support::socket_guard::start_mock_server_or_skip;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    use crate::download::NoProgress;
    use crate::test_support::progress::RecordingProgress;

    #[tokio::test]
    async fn test_transfer_writes_body_in_fixed_chunks() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        let temp_dir = TempDir::new().unwrap();
        let body = vec![7u8; 2 * CHUNK_SIZE + 100];

        Mock::given(method("GET"))
            .and(path("/videoplayback"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new();
        let url = format!("{}/videoplayback", mock_server.uri());
        let dest = temp_dir.path().join("clip.mp4");
        let recorder = RecordingProgress::default();

        let result = client
            .transfer(&url, &dest, "Downloading 'clip' :: 720p", &recorder)
            .await
            .unwrap();

        assert_eq!(result.bytes_written, body.len() as u64);
        assert_eq!(result.content_length, body.len() as u64);
        assert_eq!(recorder.advances(), vec![1024, 1024, 100]);
        assert_eq!(recorder.totals(), vec![body.len() as u64]);
        assert_eq!(recorder.labels(), vec!["Downloading 'clip' :: 720p".to_string()]);
        assert_eq!(recorder.finished_count(), 1);
        assert_eq!(std::fs::read(&dest).unwrap(), body);
    }

    #[tokio::test]
    async fn test_transfer_404_leaves_no_file() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        let temp_dir = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new();
        let url = format!("{}/gone", mock_server.uri());
        let dest = temp_dir.path().join("clip.mp4");

        let result = client.transfer(&url, &dest, "clip", &NoProgress).await;

        assert!(matches!(
            result,
            Err(DownloadError::HttpStatus { status: 404, .. })
        ));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_transfer_invalid_url() {
        let temp_dir = TempDir::new().unwrap();
        let client = HttpClient::new();
        let dest = temp_dir.path().join("clip.mp4");

        let result = client
            .transfer("not a url", &dest, "clip", &NoProgress)
            .await;

        assert!(matches!(result, Err(DownloadError::InvalidUrl { .. })));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_transfer_read_timeout_cleans_up() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        let temp_dir = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(b"data")
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;

        let client = HttpClient::with_timeouts(5, 1).unwrap();
        let url = format!("{}/slow", mock_server.uri());
        let dest = temp_dir.path().join("clip.mp4");

        let result = client.transfer(&url, &dest, "clip", &NoProgress).await;

        assert!(result.is_err(), "expected timeout or network error");
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_transfer_overwrites_existing_destination() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("clip.mp4");
        std::fs::write(&dest, vec![0u8; 5000]).unwrap();

        Mock::given(method("GET"))
            .and(path("/short"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"fresh".to_vec()))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new();
        let url = format!("{}/short", mock_server.uri());
        client
            .transfer(&url, &dest, "clip", &NoProgress)
            .await
            .unwrap();

        assert_eq!(std::fs::read(&dest).unwrap(), b"fresh");
    }
}
