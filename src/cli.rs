//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use tubefetch_core::{
    DEFAULT_API_KEY_PATH, DEFAULT_RESOLUTION, DEFAULT_YT_DLP_PROGRAM, TitleSource,
};

/// Default attempts for each playlist member.
pub const DEFAULT_MEMBER_RETRIES: u8 = 3;
/// Default seconds between playlist member attempts.
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 5;
/// Default connect and read timeout for stream transfers.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Download videos, audio tracks and whole playlists.
///
/// Pass one URL or several separated by commas. Playlist URLs are expanded
/// into their members and saved into a folder named after the playlist.
#[derive(Parser, Debug, Clone)]
#[command(name = "tubefetch")]
#[command(author, version, about)]
pub struct Args {
    /// Video or playlist URL, or a comma-separated list of URLs
    pub url: String,

    /// Destination folder (playlists default to their title)
    #[arg(short, long)]
    pub folder: Option<PathBuf>,

    /// Requested quality, e.g. 1080p or 720p
    #[arg(short, long, default_value = DEFAULT_RESOLUTION)]
    pub resolution: String,

    /// Download only the audio track (saved as .mp3)
    #[arg(short = 'a', long)]
    pub rip_audio: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Read defaults from this config file instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Where playlist folder names come from
    #[arg(long, default_value_t = TitleSource::Api)]
    pub title_source: TitleSource,

    /// File holding the Data API key
    #[arg(long, default_value = DEFAULT_API_KEY_PATH)]
    pub api_key_file: PathBuf,

    /// Attempts per playlist member on transient failures (1-10)
    #[arg(long, default_value_t = DEFAULT_MEMBER_RETRIES, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub max_retries: u8,

    /// Seconds between playlist member attempts (0-600)
    #[arg(long, default_value_t = DEFAULT_RETRY_DELAY_SECS, value_parser = clap::value_parser!(u64).range(0..=600))]
    pub retry_delay: u64,

    /// Transfer connect and read timeout in seconds (1-3600)
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub timeout: u64,

    /// Path or name of the yt-dlp executable
    #[arg(long = "yt-dlp", default_value = DEFAULT_YT_DLP_PROGRAM)]
    pub yt_dlp: String,
}
