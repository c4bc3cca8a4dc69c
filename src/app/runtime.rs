use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use tubefetch_core::{
    ConsoleProgress, DataApiTitleLookup, HttpClient, MetadataTitleLookup, Pipeline,
    PipelineConfig, PlaylistTitleLookup, RetryPolicy, TitleSource, YtDlp, split_inputs,
};

use crate::app::config_runtime::{self, RunSettings};
use crate::app::{exit_handler, terminal};
use crate::app_config::{VerbositySetting, load_file_config_from};
use crate::output::{self, ConsoleReporter};
use crate::ProcessExit;

pub(crate) async fn run_tubefetch() -> Result<ProcessExit> {
    let (args, cli_sources) = config_runtime::parse_cli_with_sources();

    let loaded = load_file_config_from(args.config.as_deref())?;
    let settings =
        config_runtime::apply_config_defaults(args, &cli_sources, loaded.config.as_ref())?;

    let default_level = config_runtime::resolve_default_log_level(&settings.args);
    terminal::init_tracing(default_level, terminal::is_no_color_requested());

    if let Some(config) = &loaded.config
        && let Some(path) = &loaded.path
    {
        debug!(
            path = %path.display(),
            verbosity = config.verbosity.map(VerbositySetting::as_str),
            "loaded config file"
        );
    }
    debug!(?settings, "settings resolved");

    let inputs = split_inputs(&settings.args.url);
    if inputs.is_empty() {
        warn!("No URLs given");
        return Ok(ProcessExit::Success);
    }
    info!(inputs = inputs.len(), "tubefetch starting");

    let pipeline = build_pipeline(&settings)?;
    let summary = pipeline.run(&inputs).await;

    output::print_run_summary(&summary, settings.args.quiet);

    Ok(exit_handler::determine_exit_outcome(
        summary.completed(),
        summary.failed(),
    ))
}

fn build_pipeline(settings: &RunSettings) -> Result<Pipeline> {
    let args = &settings.args;

    let titles: Box<dyn PlaylistTitleLookup> = match args.title_source {
        TitleSource::Api => Box::new(
            DataApiTitleLookup::new(settings.api_base_url.clone(), args.api_key_file.clone())
                .context("Failed to build Data API client")?,
        ),
        TitleSource::Metadata => Box::new(MetadataTitleLookup),
    };

    let client = HttpClient::with_timeouts(args.timeout, args.timeout)
        .context("Failed to build HTTP client")?;

    let hide_progress = !terminal::should_show_progress(args.quiet, terminal::is_dumb_terminal());

    let config = PipelineConfig {
        folder: args.folder.clone(),
        resolution: args.resolution.clone(),
        fallback_resolution: settings.fallback_resolution.clone(),
        audio_only: args.rip_audio,
        member_retry: RetryPolicy::fixed(
            u32::from(args.max_retries),
            Duration::from_secs(args.retry_delay),
        ),
        ..PipelineConfig::default()
    };

    Ok(Pipeline::new(
        Box::new(YtDlp::new(args.yt_dlp.clone())),
        titles,
        client,
        Box::new(ConsoleProgress::for_terminal(hide_progress)),
        config,
    )
    .with_reporter(Box::new(ConsoleReporter::new(args.quiet))))
}
