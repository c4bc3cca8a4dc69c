//! Input resolution: splitting, classification and playlist metadata.
//!
//! An input string holds one URL or a comma-separated list. Each URL is
//! either a single item or a playlist; playlists are recognised by the
//! substring `playlist` (any case), matching the platform's shareable
//! playlist URLs.
//!
//! # Architecture
//!
//! - [`split_inputs`] / [`classify_input`] - pure helpers used by the driver
//! - [`PlaylistTitleLookup`] - async trait for resolving a playlist's display title
//! - [`DataApiTitleLookup`] - YouTube Data API v3 lookup keyed by an API key file
//! - [`MetadataTitleLookup`] - title from the media source's playlist metadata

mod api_key;
mod error;
mod title;

pub use api_key::{DEFAULT_API_KEY_PATH, load_api_key};
pub use error::ResolveError;
pub use title::{
    DEFAULT_API_BASE_URL, DataApiTitleLookup, MetadataTitleLookup, PlaylistTitleLookup,
    TitleSource,
};

use url::Url;

/// Whether a URL names one item or a playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// A single video.
    Single,
    /// A playlist whose members are downloaded in order.
    Playlist,
}

/// Splits raw CLI input on commas, trimming entries and dropping empty ones.
#[must_use]
pub fn split_inputs(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Classifies `url` by a case-insensitive search for `playlist`.
#[must_use]
pub fn classify_input(url: &str) -> InputKind {
    if url.to_ascii_lowercase().contains("playlist") {
        InputKind::Playlist
    } else {
        InputKind::Single
    }
}

/// Extracts the `list` query parameter of a playlist URL.
#[must_use]
pub fn playlist_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == "list")
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_inputs_single_url() {
        assert_eq!(
            split_inputs("https://www.youtube.com/watch?v=abc"),
            vec!["https://www.youtube.com/watch?v=abc".to_string()]
        );
    }

    #[test]
    fn test_split_inputs_comma_list_trims_and_drops_empty() {
        assert_eq!(
            split_inputs(" https://a.example/1 ,https://a.example/2,, ,https://a.example/3 "),
            vec![
                "https://a.example/1".to_string(),
                "https://a.example/2".to_string(),
                "https://a.example/3".to_string(),
            ]
        );
    }

    #[test]
    fn test_split_inputs_empty() {
        assert!(split_inputs("").is_empty());
        assert!(split_inputs(" , ").is_empty());
    }

    #[test]
    fn test_classify_input_playlist_any_case() {
        assert_eq!(
            classify_input("https://www.youtube.com/playlist?list=PLabc"),
            InputKind::Playlist
        );
        assert_eq!(
            classify_input("https://www.youtube.com/PLAYLIST?list=PLabc"),
            InputKind::Playlist
        );
    }

    #[test]
    fn test_classify_input_watch_url_with_list_param_is_single() {
        assert_eq!(
            classify_input("https://www.youtube.com/watch?v=abc&list=PLabc"),
            InputKind::Single
        );
        assert_eq!(classify_input("https://youtu.be/abc"), InputKind::Single);
    }

    #[test]
    fn test_playlist_id_from_query() {
        assert_eq!(
            playlist_id("https://www.youtube.com/playlist?list=PLabc123&si=x"),
            Some("PLabc123".to_string())
        );
        assert_eq!(playlist_id("https://www.youtube.com/playlist"), None);
        assert_eq!(playlist_id("https://www.youtube.com/playlist?list="), None);
        assert_eq!(playlist_id("not a url"), None);
    }
}
