//! # Storage Backend Trait

use super::errors::StorageResult;

/// Backend trait for document file storage
///
/// Paths are always relative to the backend's root. Implementations must
/// reject paths that would escape it.
pub trait StorageBackend: Send + Sync + std::fmt::Debug {
    /// Read the full contents at path
    fn read(&self, path: &str) -> StorageResult<Vec<u8>>;

    /// Replace the contents at path atomically
    ///
    /// Readers observe either the previous contents or the new contents in
    /// full, never a partial write.
    fn write_atomic(&self, path: &str, data: &[u8]) -> StorageResult<()>;

    /// Check if path exists
    fn exists(&self, path: &str) -> StorageResult<bool>;
}
