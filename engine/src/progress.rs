//! Progress reporting trait.
//!
//! This module defines the ProgressCallback trait, which keeps the copy
//! engine independent of how (or whether) progress is displayed.

use std::path::Path;
use crate::model::{CopyStats, ErrorRecord};

/// Trait for receiving progress updates from a copy run.
///
/// All methods are called synchronously from the walking thread, each one
/// after the stats update it describes. Every method has an empty default,
/// so implementors only override what they display.
pub trait ProgressCallback: Send {
    /// Called once the roots are validated and the walk is about to begin.
    fn on_copy_started(&self, _stats: &CopyStats, _source: &Path, _destination: &Path) {}

    /// Called after a destination directory was made.
    fn on_directory_created(&self, _stats: &CopyStats, _relative_path: &Path) {}

    /// Called after a file was copied.
    fn on_file_copied(&self, _stats: &CopyStats, _relative_path: &Path, _bytes: u64) {}

    /// Called after a failure was recorded.
    fn on_error(&self, _stats: &CopyStats, _record: &ErrorRecord) {}

    /// Called when the run ends: completed, interrupted, or fatal.
    fn on_copy_completed(&self, _stats: &CopyStats) {}
}
