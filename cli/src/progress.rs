//! Console progress for a running copy.

use cleancopy_engine::{CopyStats, ErrorRecord, ProgressCallback};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use crate::report::format_bytes;

/// How much progress output to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    /// Nothing until the summary
    Silent,
    /// A single spinner line with running totals
    Spinner,
    /// One line per directory, file and error
    Lines,
}

/// CLI implementation of ProgressCallback.
pub struct CliProgress {
    mode: ProgressMode,
    spinner: Option<ProgressBar>,
}

impl CliProgress {
    pub fn new(mode: ProgressMode) -> Self {
        let spinner = (mode == ProgressMode::Spinner).then(|| {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::with_template("{spinner} {msg} [{elapsed}]")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            bar.enable_steady_tick(Duration::from_millis(120));
            bar
        });
        CliProgress { mode, spinner }
    }

    fn totals(stats: &CopyStats) -> String {
        format!(
            "{} files, {} dirs, {}",
            stats.files_copied(),
            stats.directories_created(),
            format_bytes(stats.bytes_copied())
        )
    }
}

impl ProgressCallback for CliProgress {
    fn on_copy_started(&self, _stats: &CopyStats, source: &Path, destination: &Path) {
        match self.mode {
            ProgressMode::Silent => {}
            ProgressMode::Spinner => {
                if let Some(bar) = &self.spinner {
                    bar.set_message(format!("Copying {}", source.display()));
                }
            }
            ProgressMode::Lines => {
                eprintln!("Copying {} -> {}", source.display(), destination.display());
            }
        }
    }

    fn on_directory_created(&self, stats: &CopyStats, relative_path: &Path) {
        match self.mode {
            ProgressMode::Lines => eprintln!("  + {}/", relative_path.display()),
            ProgressMode::Spinner => {
                if let Some(bar) = &self.spinner {
                    bar.set_message(Self::totals(stats));
                }
            }
            ProgressMode::Silent => {}
        }
    }

    fn on_file_copied(&self, stats: &CopyStats, relative_path: &Path, bytes: u64) {
        match self.mode {
            ProgressMode::Lines => {
                eprintln!("    {} ({})", relative_path.display(), format_bytes(bytes));
            }
            ProgressMode::Spinner => {
                if let Some(bar) = &self.spinner {
                    bar.set_message(Self::totals(stats));
                }
            }
            ProgressMode::Silent => {}
        }
    }

    fn on_error(&self, _stats: &CopyStats, record: &ErrorRecord) {
        match self.mode {
            ProgressMode::Lines => eprintln!("  ! {}", record),
            ProgressMode::Spinner => {
                if let Some(bar) = &self.spinner {
                    bar.println(format!("! {}", record));
                }
            }
            ProgressMode::Silent => {}
        }
    }

    fn on_copy_completed(&self, _stats: &CopyStats) {
        if let Some(bar) = &self.spinner {
            bar.finish_and_clear();
        }
        if self.mode == ProgressMode::Lines {
            eprintln!();
        }
    }
}
