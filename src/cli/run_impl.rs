use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use nodewalk::{ErrorReporter, LogReporter, Node, Visitor, WalkError, Walker};
use tracing::info;

use crate::formatters;

use super::Args;

pub fn run_with_args(args: &Args) -> Result<i32> {
    info!(roots = args.paths.len(), "starting walk");

    let pb = if args.progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            indicatif::ProgressStyle::with_template("{spinner} {pos} entries [{elapsed}] {msg}")
                .context("progress template")?
                .tick_chars("⠁⠃⠇⠋⠙⠸⢰⣠⣄⡆"),
        );
        Some(pb)
    } else {
        None
    };

    let mut reporter = |context: &Path, err: &WalkError| match &pb {
        Some(pb) => pb.suspend(|| LogReporter.report(context, err)),
        None => LogReporter.report(context, err),
    };

    let mut listing = Listing {
        out: BufWriter::new(io::stdout().lock()),
        json: args.json,
        enabled: !args.summary_only,
        progress: pb.as_ref(),
        failure: None,
    };
    let stats = Walker::new().walk(&args.paths, &mut listing, &mut reporter);

    if let Some(ref pb) = pb {
        pb.finish_and_clear();
    }

    let json_summary = if args.json && !args.quiet {
        Some(formatters::json::summary(&stats)?)
    } else {
        None
    };
    let written = listing.finish(json_summary.as_deref());
    if !args.json && !args.quiet {
        eprintln!("{}", formatters::text::summary(&stats));
    }
    written.context("cannot write listing")?;

    Ok(i32::from(stats.errors > 0))
}

/// Writes one line per visited entry.
///
/// The first write failure is kept and silences further output. It never
/// reaches the walker, so counting covers the whole tree.
struct Listing<'a, W: Write> {
    out: W,
    json: bool,
    enabled: bool,
    progress: Option<&'a ProgressBar>,
    failure: Option<io::Error>,
}

impl<W: Write> Visitor for Listing<'_, W> {
    fn visit(&mut self, path: &Path, node: &Node) -> Result<()> {
        if let Some(pb) = self.progress {
            pb.inc(1);
        }
        if !self.enabled || self.failure.is_some() {
            return Ok(());
        }
        let written = if self.json {
            formatters::json::write_entry(&mut self.out, path, node)
        } else {
            formatters::text::write_entry(&mut self.out, path, node)
        };
        if let Err(e) = written {
            self.failure = Some(e);
        }
        Ok(())
    }
}

impl<W: Write> Listing<'_, W> {
    /// Appends the trailing line, if any, and flushes.
    ///
    /// # Errors
    /// Returns the first write failure seen during the walk, or a flush failure.
    fn finish(mut self, trailer: Option<&str>) -> io::Result<()> {
        if let Some(e) = self.failure {
            return Err(e);
        }
        if let Some(line) = trailer {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }
}
