//! The copy engine.
//!
//! `CopyEngine::run` mirrors a source tree into a destination, skipping
//! directories named in its [`IgnoreSet`]. The walk is depth-first over an
//! explicit work stack, so tree depth is bounded by memory rather than by
//! the call stack.
//!
//! Per entry:
//! - ignored directory: skipped, nothing recorded
//! - other directory: destination created, then walked
//! - regular file: bytes copied, destination overwritten
//! - anything else (symlinks, devices, sockets): skipped, nothing recorded
//!
//! Failures on one entry become an [`ErrorRecord`] and the walk moves on.
//! A directory that cannot be created or listed is recorded once and its
//! whole subtree is left out. A destination directory that already exists
//! as a symlink counts as one that cannot be created. An entry whose type
//! cannot be read is recorded as a FILE error; its siblings are still
//! copied. Only problems with the roots are FATAL.

use log::{debug, info, trace, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use crate::error::EngineError;
use crate::fs_ops::{self, DirEntry};
use crate::ignore::IgnoreSet;
use crate::interrupt::Interrupt;
use crate::model::{CopyStats, ErrorKind, ErrorRecord};
use crate::progress::ProgressCallback;

/// Filtered recursive copy of one directory tree into another.
#[derive(Debug, Clone, Default)]
pub struct CopyEngine {
    ignore: IgnoreSet,
    interrupt: Interrupt,
}

impl CopyEngine {
    pub fn new(ignore: IgnoreSet) -> Self {
        CopyEngine {
            ignore,
            interrupt: Interrupt::new(),
        }
    }

    /// Use a caller-owned interrupt flag instead of the engine's private one.
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// A handle that stops this engine's walks when triggered.
    pub fn interrupt_handle(&self) -> Interrupt {
        self.interrupt.clone()
    }

    /// Copy `source_root` into `dest_root`.
    ///
    /// Always returns the stats of the run, with `end_time` set. Inspect
    /// `errors()` to decide whether the run counts as a failure.
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(&self, source_root: P, dest_root: Q) -> CopyStats {
        self.run_with_progress(source_root, dest_root, None)
    }

    /// Same as [`run`](Self::run), reporting progress to `progress`.
    pub fn run_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        source_root: P,
        dest_root: Q,
        progress: Option<&dyn ProgressCallback>,
    ) -> CopyStats {
        let source_root = source_root.as_ref();
        let dest_root = dest_root.as_ref();

        let mut walk = Walk {
            ignore: &self.ignore,
            interrupt: &self.interrupt,
            progress,
            source_root,
            dest_root,
            nested_dest: None,
            stats: CopyStats::start(),
        };

        info!(
            "run {}: copying {} -> {}",
            walk.stats.run_id(),
            source_root.display(),
            dest_root.display()
        );

        match prepare_roots(source_root, dest_root) {
            Ok(nested_dest) => {
                walk.nested_dest = nested_dest;
                if let Some(callback) = progress {
                    callback.on_copy_started(&walk.stats, source_root, dest_root);
                }
                walk.run();
            }
            Err(e) => walk.record(ErrorKind::Fatal, PathBuf::new(), &e),
        }

        walk.finish()
    }
}

/// Copy with the given ignore set and no progress reporting.
pub fn copy_tree<P: AsRef<Path>, Q: AsRef<Path>>(
    source_root: P,
    dest_root: Q,
    ignore: &IgnoreSet,
) -> CopyStats {
    CopyEngine::new(ignore.clone()).run(source_root, dest_root)
}

/// Validate the source root and make sure the destination root exists.
///
/// Returns the destination's path relative to the source when it lies
/// inside it, so the walk can leave it out.
fn prepare_roots(source_root: &Path, dest_root: &Path) -> Result<Option<PathBuf>, EngineError> {
    match fs::metadata(source_root) {
        Ok(metadata) if metadata.is_dir() => {}
        Ok(_) => {
            return Err(EngineError::SourceNotDirectory {
                path: source_root.to_path_buf(),
            })
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(EngineError::SourceNotFound {
                path: source_root.to_path_buf(),
            })
        }
        Err(source) => {
            return Err(EngineError::SourceUnreadable {
                path: source_root.to_path_buf(),
                source,
            })
        }
    }

    match fs::metadata(dest_root) {
        Ok(metadata) if metadata.is_dir() => {}
        Ok(_) => {
            return Err(EngineError::DestinationNotDirectory {
                path: dest_root.to_path_buf(),
            })
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dest_root).map_err(|source| EngineError::DestinationCreationFailed {
                path: dest_root.to_path_buf(),
                source,
            })?;
        }
        Err(source) => {
            return Err(EngineError::DestinationCreationFailed {
                path: dest_root.to_path_buf(),
                source,
            })
        }
    }

    let (Ok(source_canon), Ok(dest_canon)) = (source_root.canonicalize(), dest_root.canonicalize()) else {
        return Ok(None);
    };
    if source_canon == dest_canon {
        return Err(EngineError::DestinationIsSource {
            path: dest_root.to_path_buf(),
        });
    }
    Ok(dest_canon
        .strip_prefix(&source_canon)
        .ok()
        .map(Path::to_path_buf))
}

/// State of one in-flight run.
struct Walk<'a> {
    ignore: &'a IgnoreSet,
    interrupt: &'a Interrupt,
    progress: Option<&'a dyn ProgressCallback>,
    source_root: &'a Path,
    dest_root: &'a Path,
    nested_dest: Option<PathBuf>,
    stats: CopyStats,
}

impl Walk<'_> {
    fn run(&mut self) {
        // Relative paths of directories still to list; the root is the empty path.
        let mut pending = vec![PathBuf::new()];

        while let Some(dir_rel) = pending.pop() {
            if self.check_interrupt() {
                return;
            }

            let dir_src = self.source_path(&dir_rel);
            let entries = match fs_ops::read_dir_entries(&dir_src) {
                Ok(entries) => entries,
                Err(e) => {
                    // Nothing at all can be copied if the root cannot be listed.
                    let kind = if dir_rel.as_os_str().is_empty() {
                        ErrorKind::Fatal
                    } else {
                        ErrorKind::Directory
                    };
                    self.record(kind, dir_rel, &e);
                    continue;
                }
            };

            if !self.visit_entries(&dir_rel, entries, &mut pending) {
                return;
            }
        }
    }

    /// Handle one directory's listing, pushing subdirectories onto `pending`.
    ///
    /// Returns false if the run was interrupted part-way.
    fn visit_entries(
        &mut self,
        dir_rel: &Path,
        entries: Vec<Result<DirEntry, EngineError>>,
        pending: &mut Vec<PathBuf>,
    ) -> bool {
        for entry in entries {
            if self.check_interrupt() {
                return false;
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    // A listing that broke off belongs to the directory, anything else to the entry.
                    if matches!(e, EngineError::EnumerationFailed { .. }) {
                        self.record(ErrorKind::Directory, dir_rel.to_path_buf(), &e);
                    } else {
                        let rel = fs_ops::relative_to(self.source_root, e.path());
                        self.record(ErrorKind::File, rel, &e);
                    }
                    continue;
                }
            };

            let rel = fs_ops::relative_to(self.source_root, &entry.path);

            if entry.file_type.is_dir() {
                if self.ignore.contains(&entry.name) {
                    debug!("skipping ignored directory {}", rel.display());
                    continue;
                }
                if self.nested_dest.as_deref() == Some(rel.as_path()) {
                    debug!("skipping destination root {} inside source", rel.display());
                    continue;
                }
                if self.create_directory(&rel) {
                    pending.push(rel);
                }
            } else if entry.file_type.is_file() {
                self.copy_file(&entry.path, &rel);
            } else {
                debug!("skipping non-regular entry {}", rel.display());
            }
        }
        true
    }

    /// Returns false if the directory could not be made; its subtree is then skipped.
    fn create_directory(&mut self, rel: &Path) -> bool {
        match fs_ops::ensure_dir(&self.dest_root.join(rel)) {
            Ok(()) => {
                self.stats.record_directory();
                trace!("created directory {}", rel.display());
                if let Some(callback) = self.progress {
                    callback.on_directory_created(&self.stats, rel);
                }
                true
            }
            Err(e) => {
                self.record(ErrorKind::Directory, rel.to_path_buf(), &e);
                false
            }
        }
    }

    fn copy_file(&mut self, src: &Path, rel: &Path) {
        match fs_ops::copy_file_contents(src, &self.dest_root.join(rel)) {
            Ok(bytes) => {
                self.stats.record_file(bytes);
                trace!("copied {} ({} bytes)", rel.display(), bytes);
                if let Some(callback) = self.progress {
                    callback.on_file_copied(&self.stats, rel, bytes);
                }
            }
            Err(e) => self.record(ErrorKind::File, rel.to_path_buf(), &e),
        }
    }

    fn record(&mut self, kind: ErrorKind, rel: PathBuf, err: &EngineError) {
        let record = ErrorRecord::new(kind, rel, err.to_string());
        match err.raw_os_error() {
            Some(code) => warn!("{} (os error {})", record, code),
            None => warn!("{}", record),
        }
        self.stats.push_error(record);
        if let (Some(callback), Some(record)) = (self.progress, self.stats.errors().last()) {
            callback.on_error(&self.stats, record);
        }
    }

    fn check_interrupt(&mut self) -> bool {
        if !self.interrupt.is_triggered() {
            return false;
        }
        if !self.stats.interrupted() {
            info!("run {}: interrupted", self.stats.run_id());
            self.stats.mark_interrupted();
        }
        true
    }

    fn source_path(&self, rel: &Path) -> PathBuf {
        if rel.as_os_str().is_empty() {
            self.source_root.to_path_buf()
        } else {
            self.source_root.join(rel)
        }
    }

    fn finish(mut self) -> CopyStats {
        self.stats.finish();
        info!(
            "run {}: {} files, {} directories, {} bytes, {} errors in {:?}",
            self.stats.run_id(),
            self.stats.files_copied(),
            self.stats.directories_created(),
            self.stats.bytes_copied(),
            self.stats.errors().len(),
            self.stats.duration()
        );
        if let Some(callback) = self.progress {
            callback.on_copy_completed(&self.stats);
        }
        self.stats
    }
}
