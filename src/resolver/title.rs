//! Playlist title lookup.
//!
//! The title becomes the default destination folder. It comes either from
//! the YouTube Data API v3 ([`DataApiTitleLookup`], keyed by a developer API
//! key read from disk) or from the playlist metadata the media source
//! already returned ([`MetadataTitleLookup`]).

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use super::api_key::load_api_key;
use super::{ResolveError, playlist_id};
use crate::media::PlaylistInfo;
use crate::user_agent;

/// Base URL of the Google APIs host.
pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com";

const CONNECT_TIMEOUT_SECS: u64 = 10;
const READ_TIMEOUT_SECS: u64 = 30;

/// Where playlist titles come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitleSource {
    /// YouTube Data API v3 with a developer key.
    #[default]
    Api,
    /// Title embedded in the media source's playlist metadata.
    Metadata,
}

impl TitleSource {
    /// Returns the stable label used on the command line and in config files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Metadata => "metadata",
        }
    }
}

impl fmt::Display for TitleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TitleSource {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "api" => Ok(Self::Api),
            "metadata" => Ok(Self::Metadata),
            other => Err(format!(
                "unknown title source '{other}' (expected 'api' or 'metadata')"
            )),
        }
    }
}

/// Resolves a display title for a playlist.
#[async_trait]
pub trait PlaylistTitleLookup: Send + Sync {
    /// Returns the lookup's name for logging.
    fn name(&self) -> &str;

    /// Looks up the title of the playlist at `playlist_url`.
    ///
    /// `playlist` is the member listing already fetched from the media source.
    async fn lookup(
        &self,
        playlist_url: &str,
        playlist: &PlaylistInfo,
    ) -> Result<String, ResolveError>;
}

/// Uses the title from playlist metadata.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetadataTitleLookup;

#[async_trait]
impl PlaylistTitleLookup for MetadataTitleLookup {
    fn name(&self) -> &'static str {
        "metadata"
    }

    async fn lookup(
        &self,
        playlist_url: &str,
        playlist: &PlaylistInfo,
    ) -> Result<String, ResolveError> {
        playlist.title.clone().ok_or_else(|| {
            ResolveError::metadata_lookup_failed(playlist_url, "playlist metadata has no title")
        })
    }
}

/// Queries `GET /youtube/v3/playlists?part=snippet&id=<id>&key=<key>`.
///
/// The key file is read on every lookup, so a missing key fails only the
/// playlist inputs that need it.
#[derive(Debug, Clone)]
pub struct DataApiTitleLookup {
    client: Client,
    base_url: String,
    key_path: PathBuf,
}

impl DataApiTitleLookup {
    /// Creates a lookup against `base_url` using the key stored at `key_path`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::ClientBuild`] when the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, key_path: impl Into<PathBuf>) -> Result<Self, ResolveError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
            .user_agent(user_agent::default_api_user_agent())
            .build()
            .map_err(|source| ResolveError::ClientBuild { source })?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            key_path: key_path.into(),
        })
    }
}

#[async_trait]
impl PlaylistTitleLookup for DataApiTitleLookup {
    fn name(&self) -> &'static str {
        "data-api"
    }

    #[instrument(skip(self, playlist), fields(lookup = "data-api"))]
    async fn lookup(
        &self,
        playlist_url: &str,
        playlist: &PlaylistInfo,
    ) -> Result<String, ResolveError> {
        let id = playlist_id(playlist_url)
            .or_else(|| playlist.id.clone())
            .ok_or_else(|| {
                ResolveError::metadata_lookup_failed(playlist_url, "URL carries no playlist id")
            })?;

        let key = load_api_key(&self.key_path).await?;

        let mut endpoint = Url::parse(&format!("{}/youtube/v3/playlists", self.base_url))
            .map_err(|error| ResolveError::metadata_lookup_failed(&id, error.to_string()))?;
        endpoint
            .query_pairs_mut()
            .append_pair("part", "snippet")
            .append_pair("id", &id)
            .append_pair("key", &key);

        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            // without_url: the query string carries the API key
            .map_err(|error| ResolveError::metadata_lookup_failed(&id, error.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::metadata_lookup_failed(
                &id,
                format!("metadata API returned HTTP {}", status.as_u16()),
            ));
        }

        let body: PlaylistListResponse = response.json().await.map_err(|error| {
            ResolveError::metadata_lookup_failed(&id, error.without_url().to_string())
        })?;

        let title = body
            .items
            .into_iter()
            .next()
            .and_then(|item| {
                item.snippet
                    .localized
                    .map(|localized| localized.title)
                    .or(item.snippet.title)
            })
            .filter(|title| !title.trim().is_empty())
            .ok_or_else(|| ResolveError::metadata_lookup_failed(&id, "no playlist found for id"))?;

        debug!(playlist_id = %id, %title, "playlist title resolved");
        Ok(title)
    }
}

#[derive(Debug, Deserialize)]
struct PlaylistListResponse {
    #[serde(default)]
    items: Vec<PlaylistItem>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItem {
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: Option<String>,
    localized: Option<Localized>,
}

#[derive(Debug, Deserialize)]
struct Localized {
    title: String,
}
