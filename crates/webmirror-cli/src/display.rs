//! Console rendering for sync runs
//!
//! Per-item markers follow the classic sync tool convention: `*` for a new
//! file, `u` for an updated one, `!` for a failed transfer.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use webmirror_types::{PlanSummary, SyncObserver, SyncOutcome, SyncReport, TransferOutcome};

/// Print the program banner
pub fn print_banner(quiet: bool) {
    if quiet {
        return;
    }
    println!(
        "{} v{} - incremental mirror for remote tool listings",
        style("WebMirror").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
}

/// Observer that renders run progress to the terminal
pub struct ConsoleObserver {
    quiet: bool,
    spinner: Option<ProgressBar>,
}

impl ConsoleObserver {
    /// Create an observer; a spinner runs until the listing is loaded
    pub fn new(quiet: bool) -> Self {
        let spinner = if quiet {
            None
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap(),
            );
            pb.set_message("Fetching remote listing...");
            pb.enable_steady_tick(Duration::from_millis(100));
            Some(pb)
        };

        Self { quiet, spinner }
    }

    /// Clear any live spinner; safe to call more than once
    pub fn finish(&self) {
        if let Some(pb) = &self.spinner {
            pb.finish_and_clear();
        }
    }
}

impl SyncObserver for ConsoleObserver {
    fn listing_loaded(&self, entries: usize) {
        self.finish();
        if !self.quiet {
            println!(
                "{} {} {} listed remotely",
                style("→").green().bold(),
                entries,
                pluralize(entries, "file", "files")
            );
        }
    }

    fn plan_ready(&self, summary: &PlanSummary) {
        if self.quiet {
            return;
        }

        if summary.up_to_date_count > 0 {
            println!(
                "{} {} up to date",
                summary.up_to_date_count,
                pluralize(summary.up_to_date_count, "file is", "files are")
            );
        }
        if summary.update_count > 0 {
            println!(
                "{} {} to download",
                summary.update_count,
                pluralize(summary.update_count, "update", "updates")
            );
        }
        if summary.new_count > 0 {
            println!(
                "{} new {} to download",
                summary.new_count,
                pluralize(summary.new_count, "file", "files")
            );
        }
    }

    fn transfer_finished(&self, outcome: &TransferOutcome, is_new: bool) {
        if self.quiet {
            return;
        }

        if !outcome.succeeded {
            println!("{} {}", style("!").red().bold(), outcome.filename);
        } else if is_new {
            println!("{} {}", style("*").green().bold(), outcome.filename);
        } else {
            println!("{} {}", style("u").cyan().bold(), outcome.filename);
        }
    }
}

/// Print the end-of-run summary
pub fn print_report(report: &SyncReport, quiet: bool) {
    if quiet {
        return;
    }

    match report.outcome {
        SyncOutcome::ListingUnavailable => {
            println!(
                "{} no files found in the remote listing; nothing to do",
                style("!").yellow().bold()
            );
        }
        SyncOutcome::UpToDate => {
            println!("No updates are available");
        }
        SyncOutcome::Synced => {
            println!();
            println!("{}", style("Sync finished:").bold());
            println!("  New files: {}", style(report.files_new).green());
            println!("  Updated files: {}", style(report.files_updated).green());
            let failed = report.files_failed();
            println!(
                "  Failed: {}",
                if failed > 0 {
                    style(failed).red()
                } else {
                    style(failed).green()
                }
            );
            println!(
                "  Duration: {}",
                style(format_duration(report.duration)).blue()
            );
            if failed > 0 {
                println!(
                    "{} failed files are retried on the next run",
                    style("!").yellow().bold()
                );
            }
        }
    }
}

fn pluralize<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 {
        singular
    } else {
        plural
    }
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        format!("{:.2}s", duration.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
