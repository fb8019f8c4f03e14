//! # Catalog Errors
//!
//! Error types for the project/document catalog.

use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Project and document lookup errors
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// No project under this id
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    /// No document under this id / for this project
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// Id collision on provisioning
    #[error("Project already exists: {0}")]
    ProjectAlreadyExists(String),

    /// Id collision on provisioning
    #[error("Document already exists: {0}")]
    DocumentAlreadyExists(String),

    /// Repository failure (lock poisoned, backing store unavailable)
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl CatalogError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CatalogError::ProjectNotFound(_) => 404,
            CatalogError::DocumentNotFound(_) => 404,
            CatalogError::ProjectAlreadyExists(_) => 409,
            CatalogError::DocumentAlreadyExists(_) => 409,
            CatalogError::StorageError(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(CatalogError::ProjectNotFound("p".into()).status_code(), 404);
        assert_eq!(CatalogError::DocumentNotFound("d".into()).status_code(), 404);
        assert_eq!(CatalogError::StorageError("x".into()).status_code(), 500);
    }
}
