//! Mock filesystem implementation for testing.
//!
//! Provides [`MockFilesystem`] for unit testing the publishers without
//! filesystem access.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::{StorageError, StorageErrorKind};
use crate::filesystem::Filesystem;

const BACKEND: &str = "Mock";

/// Mock filesystem for testing.
///
/// Stores directories, file contents and modification times in memory.
/// Use the builder methods to configure the mock with test data.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use dw_storage::{Filesystem, MockFilesystem};
///
/// let fs = MockFilesystem::new()
///     .with_dir("/docs/alpha/master")
///     .with_file("/docs/alpha/master/.docweaver.yml", "name: Alpha");
///
/// assert!(fs.is_dir(Path::new("/docs/alpha/master")));
/// assert!(fs.exists(Path::new("/docs/alpha/master/.docweaver.yml")));
/// ```
#[derive(Debug, Default)]
pub struct MockFilesystem {
    dirs: RwLock<HashSet<PathBuf>>,
    files: RwLock<HashMap<PathBuf, String>>,
    mtimes: RwLock<HashMap<PathBuf, f64>>,
    read_only: RwLock<HashSet<PathBuf>>,
    copies: RwLock<Vec<(PathBuf, PathBuf)>>,
}

impl MockFilesystem {
    /// Create a new empty mock filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory (and all of its ancestors).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        self.insert_dir(path.into());
        self
    }

    /// Add a file with the given content. Parent directories are created.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let path: PathBuf = path.into();
        if let Some(parent) = path.parent() {
            self.insert_dir(parent.to_path_buf());
        }
        self.files.write().unwrap().insert(path, content.into());
        self
    }

    /// Set modification time for a path.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_mtime(self, path: impl Into<PathBuf>, mtime: f64) -> Self {
        self.mtimes.write().unwrap().insert(path.into(), mtime);
        self
    }

    /// Mark a path as read-only so `is_writable` returns `false`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_read_only(self, path: impl Into<PathBuf>) -> Self {
        self.read_only.write().unwrap().insert(path.into());
        self
    }

    /// Directory copies recorded by `copy_dir`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn copies(&self) -> Vec<(PathBuf, PathBuf)> {
        self.copies.read().unwrap().clone()
    }

    fn insert_dir(&self, path: PathBuf) {
        let mut dirs = self.dirs.write().unwrap();
        let mut current = Some(path.as_path());
        while let Some(p) = current {
            if p.as_os_str().is_empty() {
                break;
            }
            dirs.insert(p.to_path_buf());
            current = p.parent();
        }
    }
}

impl Filesystem for MockFilesystem {
    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.read().unwrap().contains(path)
    }

    fn is_writable(&self, path: &Path) -> bool {
        self.exists(path) && !self.read_only.read().unwrap().contains(path)
    }

    fn make_dir(&self, path: &Path) -> Result<(), StorageError> {
        if self.read_only.read().unwrap().contains(path) {
            return Err(StorageError::new(StorageErrorKind::PermissionDenied)
                .with_path(path)
                .with_backend(BACKEND));
        }
        self.insert_dir(path.to_path_buf());
        Ok(())
    }

    fn directories(&self, path: &Path) -> Result<Vec<PathBuf>, StorageError> {
        if !self.is_dir(path) {
            return Err(StorageError::not_found(path).with_backend(BACKEND));
        }
        let mut dirs: Vec<PathBuf> = self
            .dirs
            .read()
            .unwrap()
            .iter()
            .filter(|dir| dir.parent() == Some(path))
            .cloned()
            .collect();
        dirs.sort();
        Ok(dirs)
    }

    fn last_modified(&self, path: &Path) -> Result<f64, StorageError> {
        self.mtimes
            .read()
            .unwrap()
            .get(path)
            .copied()
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }

    fn exists(&self, path: &Path) -> bool {
        self.is_dir(path) || self.files.read().unwrap().contains_key(path)
    }

    fn read(&self, path: &Path) -> Result<String, StorageError> {
        self.files
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }

    fn copy_dir(&self, src: &Path, dst: &Path) -> Result<usize, StorageError> {
        if !self.is_dir(src) {
            return Err(StorageError::new(StorageErrorKind::NotADirectory)
                .with_path(src)
                .with_backend(BACKEND));
        }
        self.insert_dir(dst.to_path_buf());
        self.copies
            .write()
            .unwrap()
            .push((src.to_path_buf(), dst.to_path_buf()));

        let copied = self
            .files
            .read()
            .unwrap()
            .keys()
            .filter(|file| file.starts_with(src))
            .count();
        Ok(copied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_mock_filesystem_is_send_sync() {
        assert_send_sync::<MockFilesystem>();
    }

    #[test]
    fn test_with_dir_creates_ancestors() {
        let fs = MockFilesystem::new().with_dir("/docs/alpha/master");

        assert!(fs.is_dir(Path::new("/docs/alpha/master")));
        assert!(fs.is_dir(Path::new("/docs/alpha")));
        assert!(fs.is_dir(Path::new("/docs")));
    }

    #[test]
    fn test_directories_immediate_children_only() {
        let fs = MockFilesystem::new()
            .with_dir("/docs/alpha/master")
            .with_dir("/docs/alpha/1.0")
            .with_dir("/docs/beta");

        let dirs = fs.directories(Path::new("/docs/alpha")).unwrap();

        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/docs/alpha/1.0"),
                PathBuf::from("/docs/alpha/master"),
            ]
        );
    }

    #[test]
    fn test_directories_missing() {
        let fs = MockFilesystem::new();

        let result = fs.directories(Path::new("/missing"));

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), StorageErrorKind::NotFound);
    }

    #[test]
    fn test_with_file_read() {
        let fs = MockFilesystem::new().with_file("/docs/alpha/master/.docweaver.yml", "name: A");

        assert_eq!(
            fs.read(Path::new("/docs/alpha/master/.docweaver.yml"))
                .unwrap(),
            "name: A"
        );
        assert!(fs.is_dir(Path::new("/docs/alpha/master")));
    }

    #[test]
    fn test_read_missing() {
        let fs = MockFilesystem::new();

        let result = fs.read(Path::new("/missing.yml"));

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), StorageErrorKind::NotFound);
        assert_eq!(err.backend(), Some("Mock"));
    }

    #[test]
    fn test_is_writable_default_and_read_only() {
        let fs = MockFilesystem::new()
            .with_dir("/docs/alpha")
            .with_dir("/docs/frozen")
            .with_read_only("/docs/frozen");

        assert!(fs.is_writable(Path::new("/docs/alpha")));
        assert!(!fs.is_writable(Path::new("/docs/frozen")));
        assert!(!fs.is_writable(Path::new("/docs/missing")));
    }

    #[test]
    fn test_make_dir() {
        let fs = MockFilesystem::new();

        fs.make_dir(Path::new("/docs/alpha")).unwrap();

        assert!(fs.is_dir(Path::new("/docs/alpha")));
    }

    #[test]
    fn test_make_dir_read_only_fails() {
        let fs = MockFilesystem::new().with_read_only("/docs/frozen");

        let result = fs.make_dir(Path::new("/docs/frozen"));

        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().kind(),
            StorageErrorKind::PermissionDenied
        );
    }

    #[test]
    fn test_copy_dir_records_copy() {
        let fs = MockFilesystem::new()
            .with_file("/docs/alpha/master/images/logo.png", "png")
            .with_file("/docs/alpha/master/images/icons/x.png", "png");

        let copied = fs
            .copy_dir(
                Path::new("/docs/alpha/master/images"),
                Path::new("/assets/alpha/master"),
            )
            .unwrap();

        assert_eq!(copied, 2);
        assert_eq!(
            fs.copies(),
            vec![(
                PathBuf::from("/docs/alpha/master/images"),
                PathBuf::from("/assets/alpha/master"),
            )]
        );
    }

    #[test]
    fn test_with_mtime() {
        let fs = MockFilesystem::new().with_mtime("/docs/alpha", 1_234_567_890.0);

        let mtime = fs.last_modified(Path::new("/docs/alpha")).unwrap();

        assert!((mtime - 1_234_567_890.0).abs() < f64::EPSILON);
    }
}
