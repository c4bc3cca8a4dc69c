use anyhow::{Result, bail};
use clap::{ArgMatches, CommandFactory, FromArgMatches, parser::ValueSource};
use tubefetch_core::{DEFAULT_API_BASE_URL, FALLBACK_RESOLUTION};

use crate::app_config::{FileConfig, VerbositySetting};
use crate::cli::Args;

/// Which arguments were given explicitly on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CliValueSources {
    pub(crate) folder: bool,
    pub(crate) resolution: bool,
    pub(crate) rip_audio: bool,
    pub(crate) title_source: bool,
    pub(crate) api_key_file: bool,
    pub(crate) max_retries: bool,
    pub(crate) retry_delay: bool,
    pub(crate) timeout: bool,
    pub(crate) yt_dlp: bool,
    pub(crate) verbose: bool,
    pub(crate) quiet: bool,
}

/// Effective settings after merging CLI, config file and defaults.
#[derive(Debug, Clone)]
pub(crate) struct RunSettings {
    pub(crate) args: Args,
    pub(crate) fallback_resolution: String,
    pub(crate) api_base_url: String,
}

pub(crate) fn parse_cli_with_sources() -> (Args, CliValueSources) {
    let command = Args::command();
    let matches = command.get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());
    let sources = sources_from_matches(&matches);
    (args, sources)
}

fn sources_from_matches(matches: &ArgMatches) -> CliValueSources {
    CliValueSources {
        folder: is_commandline_value(matches, "folder"),
        resolution: is_commandline_value(matches, "resolution"),
        rip_audio: is_commandline_value(matches, "rip_audio"),
        title_source: is_commandline_value(matches, "title_source"),
        api_key_file: is_commandline_value(matches, "api_key_file"),
        max_retries: is_commandline_value(matches, "max_retries"),
        retry_delay: is_commandline_value(matches, "retry_delay"),
        timeout: is_commandline_value(matches, "timeout"),
        yt_dlp: is_commandline_value(matches, "yt_dlp"),
        verbose: is_commandline_value(matches, "verbose"),
        quiet: is_commandline_value(matches, "quiet"),
    }
}

fn is_commandline_value(matches: &ArgMatches, id: &str) -> bool {
    matches.value_source(id) == Some(ValueSource::CommandLine)
}

/// Fills every value not given on the command line from the config file.
pub(crate) fn apply_config_defaults(
    mut args: Args,
    cli_sources: &CliValueSources,
    file_config: Option<&FileConfig>,
) -> Result<RunSettings> {
    let mut fallback_resolution = FALLBACK_RESOLUTION.to_string();
    let mut api_base_url = DEFAULT_API_BASE_URL.to_string();

    if let Some(file_config) = file_config {
        if !cli_sources.folder
            && args.folder.is_none()
            && let Some(folder) = &file_config.folder
        {
            args.folder = Some(folder.clone());
        }

        if !cli_sources.resolution
            && let Some(resolution) = &file_config.resolution
        {
            args.resolution.clone_from(resolution);
        }

        if !cli_sources.rip_audio
            && !args.rip_audio
            && let Some(rip_audio) = file_config.rip_audio
        {
            args.rip_audio = rip_audio;
        }

        if !cli_sources.title_source
            && let Some(title_source) = file_config.title_source
        {
            args.title_source = title_source;
        }

        if !cli_sources.api_key_file
            && let Some(api_key_file) = &file_config.api_key_file
        {
            args.api_key_file.clone_from(api_key_file);
        }

        if !cli_sources.max_retries
            && let Some(max_retries) = file_config.max_retries
        {
            args.max_retries = max_retries;
        }

        if !cli_sources.retry_delay
            && let Some(delay) = file_config.retry_delay_secs
        {
            args.retry_delay = delay;
        }

        if !cli_sources.timeout
            && let Some(timeout) = file_config.timeout_secs
        {
            args.timeout = timeout;
        }

        if !cli_sources.yt_dlp
            && let Some(yt_dlp) = &file_config.yt_dlp
        {
            args.yt_dlp.clone_from(yt_dlp);
        }

        if !cli_sources.verbose
            && !cli_sources.quiet
            && let Some(verbosity) = file_config.verbosity
        {
            apply_config_verbosity(&mut args, verbosity);
        }

        if let Some(fallback) = &file_config.fallback_resolution {
            fallback_resolution.clone_from(fallback);
        }

        if let Some(base_url) = &file_config.api_base_url {
            api_base_url.clone_from(base_url);
        }
    }

    if args.resolution.trim().is_empty() {
        bail!("Invalid effective resolution: expected a non-empty quality such as 1080p");
    }
    if !(1..=10).contains(&args.max_retries) {
        bail!(
            "Invalid effective max_retries value: {}. Expected range: 1..=10",
            args.max_retries
        );
    }

    Ok(RunSettings {
        args,
        fallback_resolution,
        api_base_url,
    })
}

fn apply_config_verbosity(args: &mut Args, verbosity: VerbositySetting) {
    match verbosity {
        VerbositySetting::Default => {
            args.quiet = false;
            args.verbose = 0;
        }
        VerbositySetting::Verbose => {
            args.quiet = false;
            args.verbose = 1;
        }
        VerbositySetting::Quiet => {
            args.quiet = true;
            args.verbose = 0;
        }
        VerbositySetting::Debug => {
            args.quiet = false;
            args.verbose = 2;
        }
    }
}

/// Priority: quiet, then verbose count, then `info`.
pub(crate) fn resolve_default_log_level(args: &Args) -> &'static str {
    if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
