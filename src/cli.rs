use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, ValueHint};
use tracing_subscriber::EnvFilter;

mod run_impl;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "nodewalk",
    version,
    about = "Walk filesystem trees and list every entry with its node kind",
    long_about = None
)]
pub struct Args {
    /// Paths to walk, in order
    #[arg(value_name = "PATH", default_value = ".", value_hint = ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,

    /// Write entries and the summary as JSON
    #[arg(long = "json", action = ArgAction::SetTrue)]
    pub json: bool,

    /// Only print the summary, not each entry
    #[arg(long = "summary-only", short = 's', action = ArgAction::SetTrue)]
    pub summary_only: bool,

    /// Do not print the summary
    #[arg(long = "quiet", short = 'q', action = ArgAction::SetTrue)]
    pub quiet: bool,

    /// Show a progress spinner on stderr
    #[arg(long = "progress", action = ArgAction::SetTrue)]
    pub progress: bool,

    /// Verbose logging (repeat for more)
    #[arg(long = "verbose", short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}

/// Runs the CLI application and returns the process exit status.
///
/// # Errors
/// Returns an error if output cannot be written.
pub fn run() -> Result<i32> {
    let args = Args::parse();
    setup_logging(args.verbose);
    run_impl::run_with_args(&args)
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("nodewalk={level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}
