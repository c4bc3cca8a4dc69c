//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tubefetch_core::TitleSource;

/// TOML-style file configuration for tubefetch defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Default destination folder.
    pub folder: Option<PathBuf>,
    /// Default requested quality.
    pub resolution: Option<String>,
    /// Quality tried when the requested one is missing.
    pub fallback_resolution: Option<String>,
    /// Download audio only by default.
    pub rip_audio: Option<bool>,
    /// Where playlist titles come from.
    pub title_source: Option<TitleSource>,
    /// Data API key file.
    pub api_key_file: Option<PathBuf>,
    /// Data API base URL, mainly for testing against a local server.
    pub api_base_url: Option<String>,
    /// Attempts per playlist member (same range as CLI).
    pub max_retries: Option<u8>,
    /// Seconds between playlist member attempts.
    pub retry_delay_secs: Option<u64>,
    /// Transfer connect and read timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Path or name of the yt-dlp executable.
    pub yt_dlp: Option<String>,
    /// Default verbosity mode.
    pub verbosity: Option<VerbositySetting>,
}

impl FileConfig {
    /// Validates config values against runtime and CLI constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(max_retries) = self.max_retries
            && !(1..=10).contains(&max_retries)
        {
            bail!("Invalid config value for `max_retries`: {max_retries}. Expected range: 1..=10");
        }

        if let Some(delay) = self.retry_delay_secs
            && delay > 600
        {
            bail!("Invalid config value for `retry_delay_secs`: {delay}. Expected range: 0..=600");
        }

        if let Some(timeout) = self.timeout_secs
            && !(1..=3600).contains(&timeout)
        {
            bail!("Invalid config value for `timeout_secs`: {timeout}. Expected range: 1..=3600");
        }

        validate_non_empty("resolution", self.resolution.as_deref())?;
        validate_non_empty("fallback_resolution", self.fallback_resolution.as_deref())?;
        validate_non_empty("yt_dlp", self.yt_dlp.as_deref())?;

        if let Some(base_url) = self.api_base_url.as_deref()
            && url::Url::parse(base_url).is_err()
        {
            bail!("Invalid config value for `api_base_url`: '{base_url}' is not a URL");
        }

        Ok(())
    }
}

fn validate_non_empty(field: &str, value: Option<&str>) -> Result<()> {
    if value.is_some_and(|value| value.trim().is_empty()) {
        bail!("Invalid config value for `{field}`: expected a non-empty string");
    }
    Ok(())
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

impl VerbositySetting {
    /// Returns the stable string label for display output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Verbose => "verbose",
            Self::Quiet => "quiet",
            Self::Debug => "debug",
        }
    }
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/tubefetch/config.toml`
/// 2. `$HOME/.config/tubefetch/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("tubefetch")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("tubefetch")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from `explicit` when given, else from the default path if present.
///
/// An explicit path that does not exist is an error; a missing default file
/// is not.
pub fn load_file_config_from(explicit: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        let config = load_file_config(path)?;
        return Ok(LoadedConfig {
            path: Some(path.to_path_buf()),
            config: Some(config),
        });
    }

    let path = resolve_default_config_path();
    let Some(path_ref) = path.as_deref() else {
        return Ok(LoadedConfig { path, config: None });
    };

    if !path_ref.exists() {
        return Ok(LoadedConfig { path, config: None });
    }

    let config = load_file_config(path_ref)?;
    Ok(LoadedConfig {
        path,
        config: Some(config),
    })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!(
                "Invalid config syntax on line {}: expected key = value",
                line_index + 1
            );
        };

        let key = raw_key.trim();
        let value = raw_value.trim();
        let line_no = line_index + 1;
        let context = || format!("Invalid `{key}` value on line {line_no}");

        match key {
            "folder" => {
                cfg.folder = Some(PathBuf::from(
                    parse_string_literal(value).with_context(context)?,
                ));
            }
            "resolution" => {
                cfg.resolution = Some(parse_string_literal(value).with_context(context)?);
            }
            "fallback_resolution" => {
                cfg.fallback_resolution =
                    Some(parse_string_literal(value).with_context(context)?);
            }
            "rip_audio" => {
                cfg.rip_audio = Some(parse_boolean(value).with_context(context)?);
            }
            "title_source" => {
                let parsed = parse_string_literal(value).with_context(context)?;
                let source = parsed
                    .parse::<TitleSource>()
                    .map_err(anyhow::Error::msg)
                    .with_context(context)?;
                cfg.title_source = Some(source);
            }
            "api_key_file" => {
                cfg.api_key_file = Some(PathBuf::from(
                    parse_string_literal(value).with_context(context)?,
                ));
            }
            "api_base_url" => {
                cfg.api_base_url = Some(parse_string_literal(value).with_context(context)?);
            }
            "max_retries" => {
                cfg.max_retries = Some(parse_integer_u8(value).with_context(context)?);
            }
            "retry_delay_secs" => {
                cfg.retry_delay_secs = Some(parse_integer_u64(value).with_context(context)?);
            }
            "timeout_secs" => {
                cfg.timeout_secs = Some(parse_integer_u64(value).with_context(context)?);
            }
            "yt_dlp" => {
                cfg.yt_dlp = Some(parse_string_literal(value).with_context(context)?);
            }
            "verbosity" => {
                let parsed = parse_string_literal(value).with_context(context)?;
                cfg.verbosity = Some(parse_verbosity(&parsed).with_context(|| {
                    format!("Invalid `verbosity` value '{parsed}' on line {line_no}")
                })?);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_no}");
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_integer_u8(raw_value: &str) -> Result<u8> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<u16>()?;
    u8::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range for u8"))
}

fn parse_integer_u64(raw_value: &str) -> Result<u64> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<i128>()?;
    if value < 0 {
        bail!("Expected non-negative integer");
    }
    u64::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range for u64"))
}

fn parse_verbosity(value: &str) -> Result<VerbositySetting> {
    match value {
        "default" => Ok(VerbositySetting::Default),
        "verbose" => Ok(VerbositySetting::Verbose),
        "quiet" => Ok(VerbositySetting::Quiet),
        "debug" => Ok(VerbositySetting::Debug),
        _ => bail!("Expected one of: default, verbose, quiet, debug"),
    }
}

fn parse_boolean(raw_value: &str) -> Result<bool> {
    match raw_value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => bail!("Expected 'true' or 'false'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config_all_fields() {
        let cfg = parse_config_str(
            r#"
folder = "/srv/media"
resolution = "720p"
fallback_resolution = "480p"
rip_audio = true
title_source = "metadata"
api_key_file = "/run/secrets/yt"
api_base_url = "http://127.0.0.1:9000"
max_retries = 5
retry_delay_secs = 0
timeout_secs = 30
yt_dlp = "/opt/yt-dlp"
verbosity = "verbose"
"#,
        )
        .expect("full config should parse");
        assert_eq!(cfg.folder, Some(PathBuf::from("/srv/media")));
        assert_eq!(cfg.resolution.as_deref(), Some("720p"));
        assert_eq!(cfg.fallback_resolution.as_deref(), Some("480p"));
        assert_eq!(cfg.rip_audio, Some(true));
        assert_eq!(cfg.title_source, Some(TitleSource::Metadata));
        assert_eq!(cfg.api_key_file, Some(PathBuf::from("/run/secrets/yt")));
        assert_eq!(cfg.api_base_url.as_deref(), Some("http://127.0.0.1:9000"));
        assert_eq!(cfg.max_retries, Some(5));
        assert_eq!(cfg.retry_delay_secs, Some(0));
        assert_eq!(cfg.timeout_secs, Some(30));
        assert_eq!(cfg.yt_dlp.as_deref(), Some("/opt/yt-dlp"));
        assert_eq!(cfg.verbosity, Some(VerbositySetting::Verbose));
    }

    #[test]
    fn test_parse_config_partial_fields() {
        let cfg = parse_config_str(
            r#"
resolution = "480p"
verbosity = "quiet"
"#,
        )
        .expect("partial config should parse");
        assert_eq!(cfg.resolution.as_deref(), Some("480p"));
        assert_eq!(cfg.verbosity, Some(VerbositySetting::Quiet));
        assert!(cfg.folder.is_none());
    }

    #[test]
    fn test_parse_config_supports_inline_comments() {
        let cfg = parse_config_str(
            r#"
max_retries = 4 # per member
folder = "My # Mix" # hash inside the string stays
"#,
        )
        .expect("config with comments should parse");
        assert_eq!(cfg.max_retries, Some(4));
        assert_eq!(cfg.folder, Some(PathBuf::from("My # Mix")));
    }

    #[test]
    fn test_parse_config_rejects_unknown_key() {
        let err = parse_config_str("concurrency = 4").expect_err("unknown key expected");
        assert!(err.to_string().contains("Unknown configuration key"));
    }

    #[test]
    fn test_parse_config_rejects_missing_equals() {
        let err = parse_config_str("resolution").expect_err("syntax error expected");
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_parse_config_rejects_out_of_range_retries() {
        let err = parse_config_str("max_retries = 0").expect_err("invalid max_retries expected");
        assert!(err.to_string().contains("max_retries"));
    }

    #[test]
    fn test_parse_config_rejects_out_of_range_timeout() {
        let err = parse_config_str("timeout_secs = 3601").expect_err("invalid timeout expected");
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_parse_config_rejects_unquoted_string() {
        let err = parse_config_str("resolution = 720p").expect_err("unquoted string expected");
        assert!(err.to_string().contains("resolution"));
    }

    #[test]
    fn test_parse_config_rejects_unknown_title_source() {
        let err = parse_config_str(r#"title_source = "scrape""#).expect_err("bad source expected");
        assert!(err.to_string().contains("title_source"));
    }

    #[test]
    fn test_parse_config_rejects_invalid_boolean() {
        let err = parse_config_str("rip_audio = yes").expect_err("invalid boolean expected");
        assert!(err.to_string().contains("rip_audio"));
    }

    #[test]
    fn test_parse_config_rejects_blank_resolution() {
        let err = parse_config_str(r#"resolution = "  ""#).expect_err("blank resolution expected");
        assert!(err.to_string().contains("resolution"));
    }

    #[test]
    fn test_verbosity_as_str() {
        assert_eq!(VerbositySetting::Default.as_str(), "default");
        assert_eq!(VerbositySetting::Verbose.as_str(), "verbose");
        assert_eq!(VerbositySetting::Quiet.as_str(), "quiet");
        assert_eq!(VerbositySetting::Debug.as_str(), "debug");
    }

    #[test]
    fn test_load_explicit_config_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");
        fs::write(&path, "rip_audio = true\n").unwrap();

        let loaded = load_file_config_from(Some(&path)).unwrap();
        assert_eq!(loaded.path.as_deref(), Some(path.as_path()));
        assert_eq!(loaded.config.unwrap().rip_audio, Some(true));
    }

    #[test]
    fn test_load_explicit_missing_config_file_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.toml");
        let err = load_file_config_from(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("absent.toml"));
    }
}
