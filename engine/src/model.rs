//! Core data model for a copy run.
//!
//! This module defines:
//! - CopyStats: the accumulator owned by one in-flight copy
//! - ErrorRecord: one recorded failure
//! - ErrorKind: FILE, DIRECTORY or FATAL

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

/// Classification of a recorded failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ErrorKind {
    /// A single file could not be read, stat'ed or written
    File,
    /// A directory could not be created or listed; its subtree was omitted
    Directory,
    /// The run could not start at all
    Fatal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::File => write!(f, "FILE"),
            ErrorKind::Directory => write!(f, "DIRECTORY"),
            ErrorKind::Fatal => write!(f, "FATAL"),
        }
    }
}

/// A failure encountered during the walk.
///
/// `relative_path` is relative to the source root. The root itself is the
/// empty path and displays as `.`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    pub kind: ErrorKind,
    pub relative_path: PathBuf,
    pub message: String,
}

impl ErrorRecord {
    pub fn new(kind: ErrorKind, relative_path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ErrorRecord {
            kind,
            relative_path: relative_path.into(),
            message: message.into(),
        }
    }

    /// Path for display; `.` for the source root.
    pub fn display_path(&self) -> String {
        if self.relative_path.as_os_str().is_empty() {
            ".".to_string()
        } else {
            self.relative_path.display().to_string()
        }
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.display_path(), self.message)
    }
}

/// Progress and error accumulator for a single copy run.
///
/// Created by the engine at the start of a run and handed back once the walk
/// finishes, is interrupted, or fails fatally. Counters only move forward;
/// the mutating methods are private to the crate.
#[derive(Debug, Clone, Serialize)]
pub struct CopyStats {
    run_id: Uuid,
    files_copied: u64,
    directories_created: u64,
    bytes_copied: u64,
    errors: Vec<ErrorRecord>,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    interrupted: bool,
}

impl CopyStats {
    pub(crate) fn start() -> Self {
        CopyStats {
            run_id: Uuid::new_v4(),
            files_copied: 0,
            directories_created: 0,
            bytes_copied: 0,
            errors: Vec::new(),
            start_time: Utc::now(),
            end_time: None,
            interrupted: false,
        }
    }

    pub(crate) fn record_file(&mut self, bytes: u64) {
        self.files_copied += 1;
        self.bytes_copied += bytes;
    }

    pub(crate) fn record_directory(&mut self) {
        self.directories_created += 1;
    }

    pub(crate) fn push_error(&mut self, record: ErrorRecord) {
        self.errors.push(record);
    }

    pub(crate) fn mark_interrupted(&mut self) {
        self.interrupted = true;
    }

    /// Set `end_time`. Only the first call has any effect.
    pub(crate) fn finish(&mut self) {
        if self.end_time.is_none() {
            self.end_time = Some(Utc::now());
        }
    }

    /// Identifier of this run, distinct for every invocation.
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn files_copied(&self) -> u64 {
        self.files_copied
    }

    /// Directories created below the destination root (the root is not counted).
    pub fn directories_created(&self) -> u64 {
        self.directories_created
    }

    /// Sum of source sizes, as stat'ed at copy time, of the files copied.
    pub fn bytes_copied(&self) -> u64 {
        self.bytes_copied
    }

    /// Recorded failures, in the order they happened.
    pub fn errors(&self) -> &[ErrorRecord] {
        &self.errors
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    /// True if the run stopped early because of an interrupt.
    pub fn interrupted(&self) -> bool {
        self.interrupted
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// True if a FATAL record is present.
    pub fn is_fatal(&self) -> bool {
        self.errors.iter().any(|e| e.kind == ErrorKind::Fatal)
    }

    /// Completed, not interrupted, nothing recorded.
    pub fn is_success(&self) -> bool {
        self.end_time.is_some() && !self.interrupted && self.errors.is_empty()
    }

    /// Wall time between start and end, or up to now if the run is still open.
    pub fn duration(&self) -> Duration {
        let end = self.end_time.unwrap_or_else(Utc::now);
        (end - self.start_time).to_std().unwrap_or(Duration::ZERO)
    }

}
