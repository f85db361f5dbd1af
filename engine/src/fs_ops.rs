//! Filesystem operations module.
//!
//! This module provides the low-level operations the walk is built from:
//! - Listing a directory without following symlinks
//! - Copying a file's bytes
//! - Creating directories recursively
//! - Computing paths relative to the source root

use std::ffi::OsString;
use std::fs::{self, FileType};
use std::io;
use std::path::{Path, PathBuf};
use crate::error::EngineError;

/// One entry of a directory listing.
#[derive(Debug)]
pub struct DirEntry {
    pub name: OsString,
    pub path: PathBuf,
    pub file_type: FileType,
}

/// List the entries of `dir` in the order the filesystem reports them.
///
/// File types come from the directory entry itself, so symlinks are
/// reported as symlinks and never followed. An entry that cannot be read
/// comes back as an `Err` in its slot and does not affect its siblings:
/// `ReadError` for the entry's path if only its type is unavailable,
/// `EnumerationFailed` for `dir` if the listing broke off mid-way.
///
/// # Errors
/// Returns `EnumerationFailed` if the directory cannot be opened at all.
pub fn read_dir_entries(dir: &Path) -> Result<Vec<Result<DirEntry, EngineError>>, EngineError> {
    let enumeration_failed = |source| EngineError::EnumerationFailed {
        path: dir.to_path_buf(),
        source,
    };

    let entries = fs::read_dir(dir)
        .map_err(enumeration_failed)?
        .map(|entry| {
            let entry = entry.map_err(enumeration_failed)?;
            let path = entry.path();
            match entry.file_type() {
                Ok(file_type) => Ok(DirEntry {
                    name: entry.file_name(),
                    path,
                    file_type,
                }),
                Err(source) => Err(EngineError::ReadError { path, source }),
            }
        })
        .collect();
    Ok(entries)
}

/// Copy the bytes of `src` to `dst`, replacing any existing file.
///
/// Only contents are copied; permissions and timestamps are not.
///
/// # Returns
/// The source size as reported by its metadata when the copy started.
///
/// # Errors
/// `ReadError` if the source cannot be opened, stat'ed or read, `WriteError`
/// if the destination cannot be created or written.
pub fn copy_file_contents(src: &Path, dst: &Path) -> Result<u64, EngineError> {
    let read_error = |source| EngineError::ReadError {
        path: src.to_path_buf(),
        source,
    };
    let write_error = |source| EngineError::WriteError {
        path: dst.to_path_buf(),
        source,
    };

    let mut src_file = fs::File::open(src).map_err(read_error)?;
    let size = src_file.metadata().map_err(read_error)?.len();
    let mut dst_file = fs::File::create(dst).map_err(write_error)?;

    copy_stream(&mut src_file, &mut dst_file).map_err(|e| match e {
        StreamError::Read(source) => read_error(source),
        StreamError::Write(source) => write_error(source),
    })?;

    Ok(size)
}

enum StreamError {
    Read(io::Error),
    Write(io::Error),
}

// io::copy does not say which side failed; the record needs to.
fn copy_stream(reader: &mut impl io::Read, writer: &mut impl io::Write) -> Result<u64, StreamError> {
    let mut buf = vec![0u8; 64 * 1024];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(StreamError::Read(e)),
        };
        writer.write_all(&buf[..n]).map_err(StreamError::Write)?;
        total += n as u64;
    }
    writer.flush().map_err(StreamError::Write)?;
    Ok(total)
}

/// Make sure `path` is a directory, creating it and any missing parents.
///
/// An existing symlink is refused even if it points at a directory, so
/// nothing is ever written outside the destination tree through it.
///
/// # Errors
/// `DirectoryCreationFailed` if creation fails or the path exists as
/// something other than a real directory.
pub fn ensure_dir(path: &Path) -> Result<(), EngineError> {
    let occupied = |reason: &str| EngineError::DirectoryCreationFailed {
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::AlreadyExists, reason.to_string()),
    };

    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => {
            Err(occupied("path exists and is a symbolic link"))
        }
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(occupied("path exists but is not a directory")),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(path).map_err(|source| EngineError::DirectoryCreationFailed {
                path: path.to_path_buf(),
                source,
            })
        }
        Err(source) => Err(EngineError::DirectoryCreationFailed {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// `path` with the `root` prefix stripped. Paths outside `root` come back unchanged.
pub fn relative_to(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_dir_entries_lists_files_and_dirs() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::write(temp_dir.path().join("a.txt"), b"a").expect("Failed to write a.txt");
        fs::create_dir(temp_dir.path().join("sub")).expect("Failed to create sub");

        let mut entries: Vec<DirEntry> = read_dir_entries(temp_dir.path())
            .expect("Failed to list")
            .into_iter()
            .collect::<Result<_, _>>()
            .expect("Failed to read an entry");
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "a.txt");
        assert!(entries[0].file_type.is_file());
        assert_eq!(entries[1].name, "sub");
        assert!(entries[1].file_type.is_dir());
        assert_eq!(entries[1].path, temp_dir.path().join("sub"));
    }

    #[test]
    fn test_read_dir_entries_missing_dir() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let result = read_dir_entries(&temp_dir.path().join("nope"));
        assert!(matches!(result, Err(EngineError::EnumerationFailed { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_read_dir_entries_does_not_follow_symlinks() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::create_dir(temp_dir.path().join("real")).expect("Failed to create real");
        std::os::unix::fs::symlink(temp_dir.path().join("real"), temp_dir.path().join("link"))
            .expect("Failed to create symlink");

        let entries = read_dir_entries(temp_dir.path()).expect("Failed to list");
        let link = entries
            .iter()
            .flatten()
            .find(|e| e.name == "link")
            .expect("link should be listed");
        assert!(link.file_type.is_symlink());
        assert!(!link.file_type.is_dir());
    }

    #[test]
    fn test_copy_file_contents() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let src_file = temp_dir.path().join("source.txt");
        let dst_file = temp_dir.path().join("dest.txt");

        let mut file = fs::File::create(&src_file).expect("Failed to create source");
        file.write_all(b"test content").expect("Failed to write source");
        drop(file);

        let bytes = copy_file_contents(&src_file, &dst_file).expect("Failed to copy");
        assert_eq!(bytes, 12);

        let content = fs::read_to_string(&dst_file).expect("Failed to read dest");
        assert_eq!(content, "test content");
    }

    #[test]
    fn test_copy_file_contents_overwrites_existing() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let src_file = temp_dir.path().join("source.txt");
        let dst_file = temp_dir.path().join("dest.txt");
        fs::write(&src_file, b"new").expect("Failed to write source");
        fs::write(&dst_file, b"much longer old content").expect("Failed to write dest");

        copy_file_contents(&src_file, &dst_file).expect("Failed to copy");
        assert_eq!(fs::read(&dst_file).expect("Failed to read dest"), b"new");
    }

    #[test]
    fn test_copy_file_contents_missing_source_is_read_error() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let result = copy_file_contents(
            &temp_dir.path().join("missing.txt"),
            &temp_dir.path().join("out.txt"),
        );
        assert!(matches!(result, Err(EngineError::ReadError { .. })));
        assert!(!temp_dir.path().join("out.txt").exists());
    }

    #[test]
    fn test_copy_file_contents_onto_directory_is_write_error() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let src_file = temp_dir.path().join("source.txt");
        fs::write(&src_file, b"data").expect("Failed to write source");
        let blocker = temp_dir.path().join("blocker");
        fs::create_dir(&blocker).expect("Failed to create blocker");

        let result = copy_file_contents(&src_file, &blocker);
        assert!(matches!(result, Err(EngineError::WriteError { .. })));
    }

    #[test]
    fn test_ensure_dir_creates_parents() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("a").join("b").join("c");

        ensure_dir(&path).expect("Failed to create dirs");
        assert!(path.is_dir());

        // Existing directory is fine
        ensure_dir(&path).expect("Existing dir should be accepted");
    }

    #[test]
    fn test_ensure_dir_rejects_file() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("taken");
        fs::write(&path, b"x").expect("Failed to write file");

        let result = ensure_dir(&path);
        assert!(matches!(result, Err(EngineError::DirectoryCreationFailed { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_ensure_dir_rejects_symlink_to_directory() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let outside = temp_dir.path().join("outside");
        fs::create_dir(&outside).expect("Failed to create outside");
        let link = temp_dir.path().join("link");
        std::os::unix::fs::symlink(&outside, &link).expect("Failed to create symlink");

        let result = ensure_dir(&link);
        assert!(matches!(result, Err(EngineError::DirectoryCreationFailed { .. })));
        assert!(fs::symlink_metadata(&link)
            .expect("link vanished")
            .file_type()
            .is_symlink());
    }

    #[test]
    fn test_relative_to() {
        let root = Path::new("/data/src");
        assert_eq!(relative_to(root, Path::new("/data/src/a/b.txt")), PathBuf::from("a/b.txt"));
        assert_eq!(relative_to(root, root), PathBuf::new());
        assert_eq!(relative_to(root, Path::new("/elsewhere")), PathBuf::from("/elsewhere"));
    }
}
