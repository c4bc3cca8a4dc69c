//! User-facing run output on stdout.
//!
//! Lines are printed as each item finishes, so an interrupted run keeps
//! every result reported so far.

use tubefetch_core::{ItemReport, ItemReporter, RunSummary};

/// Prints status and result lines for each item as the pipeline reports it.
///
/// Failures are always printed; everything else is skipped when `quiet`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ConsoleReporter {
    quiet: bool,
}

impl ConsoleReporter {
    pub(crate) fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl ItemReporter for ConsoleReporter {
    fn input_started(&self, url: &str) {
        if !self.quiet {
            println!("{}", started_line(url));
        }
    }

    fn playlist_resolved(&self, _url: &str, title: &str, members: usize) {
        if !self.quiet {
            println!("{}", playlist_line(title, members));
        }
    }

    fn item_finished(&self, report: &ItemReport) {
        if let Some(line) = report_line(report, self.quiet) {
            println!("{line}");
        }
    }
}

/// Prints the closing count once every input was processed.
pub(crate) fn print_run_summary(summary: &RunSummary, quiet: bool) {
    if let Some(line) = summary_line(summary, quiet) {
        println!("{line}");
    }
}

fn started_line(url: &str) -> String {
    format!("Getting info on {url}")
}

fn playlist_line(title: &str, members: usize) -> String {
    format!("Playlist Title: {title} ({members} videos)")
}

fn report_line(report: &ItemReport, quiet: bool) -> Option<String> {
    match &report.outcome {
        Ok(outcome) if !quiet => Some(outcome.message()),
        Ok(_) => None,
        Err(err) => Some(format!("Failed: {} ({err})", report.url)),
    }
}

fn summary_line(summary: &RunSummary, quiet: bool) -> Option<String> {
    if quiet || summary.total() == 0 {
        return None;
    }
    Some(format!(
        "{} downloaded, {} failed",
        summary.completed(),
        summary.failed()
    ))
}
