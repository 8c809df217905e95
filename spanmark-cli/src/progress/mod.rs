//! Per-file progress and run totals for the tag command

use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::path::Path;
use std::time::Duration;

const TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} files | {msg}";

/// Counters accumulated over a tagging run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTotals {
    /// Files read
    pub files: usize,
    /// Documents tagged
    pub documents: usize,
    /// Signal failures recorded
    pub failures: usize,
}

impl fmt::Display for RunTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} documents from {} file(s), {} failed",
            self.documents, self.files, self.failures
        )
    }
}

/// Progress bar over the input files of one run.
///
/// With `quiet` the bar is hidden but totals are still counted.
pub struct TagProgress {
    bar: ProgressBar,
    totals: RunTotals,
}

impl TagProgress {
    /// Start tracking `total_files` files
    pub fn new(total_files: usize, quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new(total_files as u64);
            if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
                bar.set_style(style.progress_chars("=>-"));
            }
            bar.enable_steady_tick(Duration::from_millis(120));
            bar
        };
        bar.set_length(total_files as u64);

        Self {
            bar,
            totals: RunTotals::default(),
        }
    }

    /// Record a finished file
    pub fn file_done(&mut self, path: &Path, documents: usize, failures: usize) {
        self.totals.files += 1;
        self.totals.documents += documents;
        self.totals.failures += failures;

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        self.bar.set_message(format!("{name}: {}", self.totals));
        self.bar.inc(1);
    }

    /// Close the bar and return the final totals
    pub fn finish(self) -> RunTotals {
        self.bar.finish_with_message(self.totals.to_string());
        self.totals
    }
}
