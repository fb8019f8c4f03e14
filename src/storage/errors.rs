//! # Storage Errors

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Document storage errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

impl StorageError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            StorageError::ObjectNotFound(_) => 404,
            StorageError::InvalidPath(_) => 400,
            StorageError::IoError(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(StorageError::ObjectNotFound("a.docx".into()).status_code(), 404);
        assert_eq!(StorageError::InvalidPath("../etc".into()).status_code(), 400);
        assert_eq!(StorageError::IoError("disk".into()).status_code(), 500);
    }
}
