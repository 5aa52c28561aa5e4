//! Filesystem helpers shared by the interactors.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A filesystem operation that failed.
#[derive(Debug, thiserror::Error)]
#[error("failed to {action} {}: {source}", .path.display())]
pub struct FileError {
    action: &'static str,
    path: PathBuf,
    #[source]
    source: io::Error,
}

impl FileError {
    fn new(action: &'static str, path: &Path, source: io::Error) -> Self {
        Self {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    /// The path the operation was applied to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub(crate) fn create_dir_all(path: &Path) -> Result<(), FileError> {
    fs::create_dir_all(path).map_err(|e| FileError::new("create directory", path, e))
}

pub(crate) fn write(path: &Path, contents: &str) -> Result<(), FileError> {
    fs::write(path, contents).map_err(|e| FileError::new("write", path, e))
}

/// Copy `from` to `to` when `from` exists, creating `to`'s parent.
///
/// Returns whether anything was copied.
pub(crate) fn copy_if_exists(from: &Path, to: &Path) -> Result<bool, FileError> {
    if !from.is_file() {
        return Ok(false);
    }
    if let Some(parent) = to.parent() {
        create_dir_all(parent)?;
    }
    fs::copy(from, to).map_err(|e| FileError::new("copy", from, e))?;
    Ok(true)
}

/// Remove a file or directory tree. Missing paths are fine.
pub(crate) fn remove_if_exists(path: &Path) -> Result<(), FileError> {
    let result = match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => Err(e),
    };
    result.map_err(|e| FileError::new("remove", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_if_exists_skips_missing_source() {
        let temp = tempfile::tempdir().unwrap();
        let copied = copy_if_exists(&temp.path().join("nope"), &temp.path().join("dest")).unwrap();
        assert!(!copied);
        assert!(!temp.path().join("dest").exists());
    }

    #[test]
    fn copy_if_exists_creates_parent() {
        let temp = tempfile::tempdir().unwrap();
        let from = temp.path().join("Cartfile.resolved");
        fs::write(&from, "github \"Moya/Moya\" \"1.1.1\"").unwrap();

        let to = temp.path().join("Lockfiles").join("Cartfile.resolved");
        assert!(copy_if_exists(&from, &to).unwrap());
        assert_eq!(fs::read_to_string(to).unwrap(), "github \"Moya/Moya\" \"1.1.1\"");
    }

    #[test]
    fn remove_if_exists_handles_files_dirs_and_nothing() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("Carthage").join("Build");
        fs::create_dir_all(&dir).unwrap();
        let file = temp.path().join("lock");
        fs::write(&file, "x").unwrap();

        remove_if_exists(&temp.path().join("Carthage")).unwrap();
        remove_if_exists(&file).unwrap();
        remove_if_exists(&temp.path().join("missing")).unwrap();

        assert!(!temp.path().join("Carthage").exists());
        assert!(!file.exists());
    }

    #[test]
    fn error_names_the_path() {
        let temp = tempfile::tempdir().unwrap();
        let target = temp.path().join("missing-parent").join("file");
        let err = write(&target, "x").unwrap_err();
        assert_eq!(err.path(), target);
        assert!(err.to_string().starts_with("failed to write "));
    }
}
