//! # CleanCopy Engine - Filtered Directory Copy Library
//!
//! Copies a directory tree to a new location while leaving out build
//! outputs, caches, dependency trees, coverage artifacts and temp
//! directories. Designed as a headless core: prompting, console output and
//! exit codes belong to the caller.
//!
//! ## Overview
//!
//! - Depth-first walk over an explicit work stack
//! - Exact directory-name ignore matching
//! - Per-entry error isolation: one failure never stops the run
//! - Statistics and an ordered error list returned for every run
//! - Progress reporting via callbacks
//! - One-shot interruption from another thread (e.g. a Ctrl-C handler)
//!
//! ## Basic Usage
//!
//! ```no_run
//! use cleancopy_engine::{CopyEngine, IgnoreSet};
//!
//! let engine = CopyEngine::new(IgnoreSet::default());
//! let stats = engine.run("/home/me/project", "/mnt/backup/project");
//!
//! println!(
//!     "{} files, {} bytes in {:?}",
//!     stats.files_copied(),
//!     stats.bytes_copied(),
//!     stats.duration()
//! );
//! for error in stats.errors() {
//!     eprintln!("{}", error);
//! }
//! ```
//!
//! ## Modules
//!
//! - **copy**: the engine and its walk
//! - **model**: CopyStats, ErrorRecord, ErrorKind
//! - **ignore**: IgnoreSet and the default ignored names
//! - **error**: filesystem error type
//! - **fs_ops**: low-level filesystem operations
//! - **progress**: progress callback trait
//! - **interrupt**: interrupt flag

pub mod copy;
pub mod error;
pub mod fs_ops;
pub mod ignore;
pub mod interrupt;
pub mod model;
pub mod progress;

// Re-export main types and functions
pub use copy::{copy_tree, CopyEngine};
pub use error::EngineError;
pub use ignore::{IgnoreSet, DEFAULT_IGNORED_DIRS};
pub use interrupt::Interrupt;
pub use model::{CopyStats, ErrorKind, ErrorRecord};
pub use progress::ProgressCallback;
