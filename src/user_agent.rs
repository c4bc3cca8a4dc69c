//! Shared User-Agent strings for transfer and metadata HTTP clients.

/// Default User-Agent for stream transfers (identifies the tool).
#[must_use]
pub(crate) fn default_download_user_agent() -> String {
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");
    format!("{name}/{version}")
}

/// Default User-Agent for metadata API requests.
#[must_use]
pub(crate) fn default_api_user_agent() -> String {
    format!("{} (metadata)", default_download_user_agent())
}
