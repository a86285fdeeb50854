//! Disk-backed [`Filesystem`] implementation.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use crate::error::{StorageError, StorageErrorKind};
use crate::filesystem::Filesystem;

const BACKEND: &str = "Disk";

/// Filesystem backend over `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskFilesystem;

impl DiskFilesystem {
    /// Create a new disk filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for DiskFilesystem {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_writable(&self, path: &Path) -> bool {
        fs::metadata(path).is_ok_and(|meta| !meta.permissions().readonly())
    }

    fn make_dir(&self, path: &Path) -> Result<(), StorageError> {
        fs::create_dir_all(path).map_err(|e| StorageError::io(e, path).with_backend(BACKEND))
    }

    fn directories(&self, path: &Path) -> Result<Vec<PathBuf>, StorageError> {
        let entries =
            fs::read_dir(path).map_err(|e| StorageError::io(e, path).with_backend(BACKEND))?;

        let mut dirs = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StorageError::io(e, path).with_backend(BACKEND))?;
            if entry.path().is_dir() {
                dirs.push(entry.path());
            }
        }
        dirs.sort();
        Ok(dirs)
    }

    fn last_modified(&self, path: &Path) -> Result<f64, StorageError> {
        let modified = fs::metadata(path)
            .and_then(|meta| meta.modified())
            .map_err(|e| StorageError::io(e, path).with_backend(BACKEND))?;

        let since_epoch = modified.duration_since(UNIX_EPOCH).map_err(|e| {
            StorageError::new(StorageErrorKind::Other)
                .with_path(path)
                .with_backend(BACKEND)
                .with_source(e)
        })?;
        Ok(since_epoch.as_secs_f64())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read(&self, path: &Path) -> Result<String, StorageError> {
        fs::read_to_string(path).map_err(|e| StorageError::io(e, path).with_backend(BACKEND))
    }

    fn copy_dir(&self, src: &Path, dst: &Path) -> Result<usize, StorageError> {
        if !src.is_dir() {
            return Err(StorageError::new(StorageErrorKind::NotADirectory)
                .with_path(src)
                .with_backend(BACKEND));
        }
        let copied = copy_recursive(src, dst)?;
        tracing::debug!(src = %src.display(), dst = %dst.display(), copied, "Copied directory");
        Ok(copied)
    }
}

fn copy_recursive(src: &Path, dst: &Path) -> Result<usize, StorageError> {
    fs::create_dir_all(dst).map_err(|e| StorageError::io(e, dst).with_backend(BACKEND))?;

    let mut copied = 0;
    let entries = fs::read_dir(src).map_err(|e| StorageError::io(e, src).with_backend(BACKEND))?;
    for entry in entries {
        let entry = entry.map_err(|e| StorageError::io(e, src).with_backend(BACKEND))?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        if from.is_dir() {
            copied += copy_recursive(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(|e| StorageError::io(e, &from).with_backend(BACKEND))?;
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_is_dir() {
        let tmp = TempDir::new().unwrap();

        let fs_backend = DiskFilesystem::new();

        assert!(fs_backend.is_dir(tmp.path()));
        assert!(!fs_backend.is_dir(&tmp.path().join("missing")));
    }

    #[test]
    fn test_make_dir_recursive() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("a/b/c");

        let fs_backend = DiskFilesystem::new();
        fs_backend.make_dir(&nested).unwrap();

        assert!(nested.is_dir());
    }

    #[test]
    fn test_directories_sorted() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("master")).unwrap();
        fs::create_dir(tmp.path().join("1.0")).unwrap();
        fs::write(tmp.path().join("notes.md"), "not a dir").unwrap();

        let fs_backend = DiskFilesystem::new();
        let dirs = fs_backend.directories(tmp.path()).unwrap();

        assert_eq!(
            dirs,
            vec![tmp.path().join("1.0"), tmp.path().join("master")]
        );
    }

    #[test]
    fn test_directories_missing_path() {
        let tmp = TempDir::new().unwrap();

        let fs_backend = DiskFilesystem::new();
        let result = fs_backend.directories(&tmp.path().join("missing"));

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), StorageErrorKind::NotFound);
    }

    #[test]
    fn test_read_and_exists() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("page.md");
        fs::write(&file, "# Page").unwrap();

        let fs_backend = DiskFilesystem::new();

        assert!(fs_backend.exists(&file));
        assert_eq!(fs_backend.read(&file).unwrap(), "# Page");
    }

    #[test]
    fn test_last_modified_positive() {
        let tmp = TempDir::new().unwrap();

        let fs_backend = DiskFilesystem::new();
        let mtime = fs_backend.last_modified(tmp.path()).unwrap();

        assert!(mtime > 0.0);
    }

    #[test]
    fn test_copy_dir_counts_files() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("images");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("logo.png"), [0u8]).unwrap();
        fs::write(src.join("nested/diagram.png"), [0u8]).unwrap();

        let fs_backend = DiskFilesystem::new();
        let dst = tmp.path().join("out");
        let copied = fs_backend.copy_dir(&src, &dst).unwrap();

        assert_eq!(copied, 2);
        assert!(dst.join("logo.png").exists());
        assert!(dst.join("nested/diagram.png").exists());
    }

    #[test]
    fn test_copy_dir_rejects_file_source() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        let fs_backend = DiskFilesystem::new();
        let result = fs_backend.copy_dir(&file, &tmp.path().join("out"));

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), StorageErrorKind::NotADirectory);
    }
}
