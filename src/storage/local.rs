//! # Local Filesystem Backend
//!
//! Stores document files under a single root directory. Saves go through a
//! temp-file-then-rename sequence so a crash mid-write never leaves a
//! truncated document behind.
//!
//! ## Invariants
//! - Relative paths only; `..` and absolute paths are rejected.
//! - A rename is the only operation that makes new contents visible.

use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use uuid::Uuid;

use super::backend::StorageBackend;
use super::errors::{StorageError, StorageResult};

/// Local filesystem storage backend
#[derive(Debug)]
pub struct LocalBackend {
    root: PathBuf,
}

impl LocalBackend {
    /// Create a new local backend rooted at the given directory
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Returns the backend root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a storage-relative path, rejecting anything that could
    /// escape the root.
    fn resolve(&self, path: &str) -> StorageResult<PathBuf> {
        if path.is_empty() {
            return Err(StorageError::InvalidPath(path.to_string()));
        }

        let relative = Path::new(path);
        for component in relative.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(StorageError::InvalidPath(path.to_string()));
                }
            }
        }

        Ok(self.root.join(relative))
    }
}

impl StorageBackend for LocalBackend {
    fn read(&self, path: &str) -> StorageResult<Vec<u8>> {
        let full_path = self.resolve(path)?;

        fs::read(&full_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::ObjectNotFound(path.to_string())
            } else {
                StorageError::IoError(e.to_string())
            }
        })
    }

    fn write_atomic(&self, path: &str, data: &[u8]) -> StorageResult<()> {
        let full_path = self.resolve(path)?;

        // Create parent directories
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::IoError(e.to_string()))?;
        }

        // Temp file in the same directory so the rename stays on one filesystem
        let file_name = full_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| StorageError::InvalidPath(path.to_string()))?;
        let temp_path = full_path.with_file_name(format!(
            ".{}.{}.tmp",
            file_name,
            Uuid::new_v4()
        ));

        let result = write_and_rename(&temp_path, &full_path, data);
        if result.is_err() {
            // Leftover temp files are never served; remove best-effort
            let _ = fs::remove_file(&temp_path);
        }
        result
    }

    fn exists(&self, path: &str) -> StorageResult<bool> {
        Ok(self.resolve(path)?.exists())
    }
}

fn write_and_rename(temp_path: &Path, full_path: &Path, data: &[u8]) -> StorageResult<()> {
    let mut file =
        fs::File::create(temp_path).map_err(|e| StorageError::IoError(e.to_string()))?;

    file.write_all(data)
        .map_err(|e| StorageError::IoError(e.to_string()))?;

    // Contents must be durable before the rename publishes them
    file.sync_all()
        .map_err(|e| StorageError::IoError(e.to_string()))?;
    drop(file);

    fs::rename(temp_path, full_path).map_err(|e| StorageError::IoError(e.to_string()))
}
