//! CLI entry point for the tubefetch tool.

use std::process::ExitCode;

mod app;
mod app_config;
mod cli;
mod output;

/// Process outcome mapped to the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    /// No item failed.
    Success,
    /// Some items succeeded and some failed.
    Partial,
    /// Every item failed.
    Failure,
}

impl ProcessExit {
    pub(crate) fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Partial => 1,
            Self::Failure => 2,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Setup errors (bad config file, client build) count as a total failure.
    let exit = match app::runtime::run_tubefetch().await {
        Ok(exit) => exit,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ProcessExit::Failure
        }
    };
    ExitCode::from(exit.code())
}
