// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::io::IsTerminal as _;

use robofixture::RunStats;
use tracing_subscriber::EnvFilter;

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Options shared by every subcommand.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalOpts {
    /// Hide the progress bar
    pub quiet: bool,
    /// Print the run summary as JSON
    pub json: bool,
}

/// Default log filter for a verbosity level.
pub fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the stderr log subscriber. `RUST_LOG` takes precedence over `-v`.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Format a byte count to human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

/// Print the summary of a finished run to stdout.
pub fn print_stats(stats: &RunStats, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(stats)?);
    } else {
        println!(
            "Wrote {} ({} messages, {} per topic, {}) to {}",
            stats.codec,
            stats.total_messages,
            stats.messages_per_topic,
            format_bytes(stats.bytes_written),
            stats.output.display()
        );
    }
    Ok(())
}

/// Progress bar wrapper for consistent progress reporting.
///
/// Draws nothing unless stderr is a terminal.
pub struct ProgressBar {
    inner: Option<indicatif::ProgressBar>,
}

impl ProgressBar {
    /// Create a new progress bar.
    pub fn new(total: u64, prefix: impl Into<String>, hidden: bool) -> Result<Self> {
        let inner = if !hidden && std::io::stderr().is_terminal() {
            let pb = indicatif::ProgressBar::new(total);
            pb.set_style(
                indicatif::ProgressStyle::default_bar()
                    .template("{prefix:>10} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")?
                    .progress_chars("=>-"),
            );
            pb.set_prefix(prefix.into());
            Some(pb)
        } else {
            None
        };

        Ok(Self { inner })
    }

    /// Set the number of completed steps.
    pub fn set_position(&self, pos: u64) {
        if let Some(pb) = &self.inner {
            pb.set_position(pos);
        }
    }

    /// Finish the progress bar with a message.
    pub fn finish_with_message(&self, msg: impl Into<String>) {
        if let Some(pb) = &self.inner {
            pb.finish_with_message(msg.into());
        }
    }

    /// Remove the progress bar from the terminal.
    pub fn abandon(&self) {
        if let Some(pb) = &self.inner {
            pb.finish_and_clear();
        }
    }
}
