//! Developer API key loading.

use std::path::Path;

use tracing::debug;

use super::ResolveError;

/// Where the key is read from unless configured otherwise.
pub const DEFAULT_API_KEY_PATH: &str = "/etc/youtube_api_key";

/// Reads the API key from `path`, trimming surrounding whitespace.
///
/// # Errors
///
/// Returns [`ResolveError::MissingCredentials`] when the file cannot be
/// read or holds only whitespace.
pub async fn load_api_key(path: &Path) -> Result<String, ResolveError> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|error| {
        debug!(path = %path.display(), %error, "api key file unreadable");
        ResolveError::missing_credentials(path)
    })?;
    let key = raw.trim();
    if key.is_empty() {
        return Err(ResolveError::missing_credentials(path));
    }
    Ok(key.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_api_key_trims_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("key");
        std::fs::write(&path, "  AIzaSyExampleKey \n").unwrap();

        assert_eq!(load_api_key(&path).await.unwrap(), "AIzaSyExampleKey");
    }

    #[tokio::test]
    async fn test_load_api_key_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent");

        let error = load_api_key(&path).await.unwrap_err();
        assert!(matches!(error, ResolveError::MissingCredentials { path: p } if p == path));
    }

    #[tokio::test]
    async fn test_load_api_key_blank_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blank");
        std::fs::write(&path, "\n\n").unwrap();

        assert!(matches!(
            load_api_key(&path).await,
            Err(ResolveError::MissingCredentials { .. })
        ));
    }
}
