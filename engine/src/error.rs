//! Error types for the copy engine.
//!
//! `EngineError` is what the low-level filesystem helpers return. The walk
//! never propagates it to the caller: each one is turned into an
//! [`ErrorRecord`](crate::model::ErrorRecord) whose message is the error's
//! `Display` text, and the walk moves on.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A single failed filesystem operation, carrying the path it failed on.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Source root does not exist
    #[error("source directory not found: {}", .path.display())]
    SourceNotFound { path: PathBuf },

    /// Source root exists but is a file (or something else)
    #[error("source is not a directory: {}", .path.display())]
    SourceNotDirectory { path: PathBuf },

    /// Source root could not be inspected or listed
    #[error("cannot read source directory {}: {source}", .path.display())]
    SourceUnreadable { path: PathBuf, source: io::Error },

    /// Destination root exists but is not a directory
    #[error("destination exists and is not a directory: {}", .path.display())]
    DestinationNotDirectory { path: PathBuf },

    /// Destination root is the source root itself
    #[error("destination is the source directory: {}", .path.display())]
    DestinationIsSource { path: PathBuf },

    /// Destination root could not be created
    #[error("cannot create destination directory {}: {source}", .path.display())]
    DestinationCreationFailed { path: PathBuf, source: io::Error },

    /// A directory listing failed
    #[error("failed to read directory {}: {source}", .path.display())]
    EnumerationFailed { path: PathBuf, source: io::Error },

    /// A destination directory could not be created
    #[error("failed to create directory {}: {source}", .path.display())]
    DirectoryCreationFailed { path: PathBuf, source: io::Error },

    /// Reading a source file (or its metadata) failed
    #[error("failed to read file {}: {source}", .path.display())]
    ReadError { path: PathBuf, source: io::Error },

    /// Writing a destination file failed
    #[error("failed to write file {}: {source}", .path.display())]
    WriteError { path: PathBuf, source: io::Error },
}

impl EngineError {
    /// The path the failed operation was working on.
    pub fn path(&self) -> &Path {
        match self {
            Self::SourceNotFound { path }
            | Self::SourceNotDirectory { path }
            | Self::SourceUnreadable { path, .. }
            | Self::DestinationNotDirectory { path }
            | Self::DestinationIsSource { path }
            | Self::DestinationCreationFailed { path, .. }
            | Self::EnumerationFailed { path, .. }
            | Self::DirectoryCreationFailed { path, .. }
            | Self::ReadError { path, .. }
            | Self::WriteError { path, .. } => path,
        }
    }

    /// Extract the OS error code from this error, if available.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::SourceUnreadable { source, .. }
            | Self::DestinationCreationFailed { source, .. }
            | Self::EnumerationFailed { source, .. }
            | Self::DirectoryCreationFailed { source, .. }
            | Self::ReadError { source, .. }
            | Self::WriteError { source, .. } => source.raw_os_error(),
            Self::SourceNotFound { .. }
            | Self::SourceNotDirectory { .. }
            | Self::DestinationNotDirectory { .. }
            | Self::DestinationIsSource { .. } => None,
        }
    }
}
