//! The [`Filesystem`] trait.

use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// Filesystem abstraction consumed by the publishing pipeline.
///
/// All paths are absolute filesystem paths. Implementations handle
/// backend-specific details; the publishers only reason about directories,
/// modification times and recursive copies.
pub trait Filesystem: Send + Sync {
    /// Check whether `path` exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Check whether `path` can be written to.
    ///
    /// Returns `false` when the path does not exist.
    fn is_writable(&self, path: &Path) -> bool;

    /// Create a directory and all of its parents.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the directory cannot be created.
    fn make_dir(&self, path: &Path) -> Result<(), StorageError>;

    /// List immediate subdirectories of `path`, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if `path` cannot be enumerated.
    fn directories(&self, path: &Path) -> Result<Vec<PathBuf>, StorageError>;

    /// Get modification time as seconds since the Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the path does not exist or its
    /// modification time cannot be retrieved.
    fn last_modified(&self, path: &Path) -> Result<f64, StorageError>;

    /// Check whether `path` exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    /// Read full file contents as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file does not exist or cannot be read.
    fn read(&self, path: &Path) -> Result<String, StorageError>;

    /// Recursively copy `src` into `dst`, creating `dst` as needed.
    ///
    /// Returns the number of files copied.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if `src` is not a directory or the copy
    /// fails partway.
    fn copy_dir(&self, src: &Path, dst: &Path) -> Result<usize, StorageError>;
}
