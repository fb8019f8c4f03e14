//! # Document Catalog
//!
//! Documents carry the storage-relative path of their backing file and a
//! monotonically increasing version counter. The counter only moves on a
//! committed save.
//!
//! ## Invariants
//! - Exactly one document per project.
//! - `version` starts at 1 and increases by one per commit.

use serde::{Deserialize, Serialize};

use super::errors::{CatalogError, CatalogResult};

/// Document model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document identifier
    pub id: String,

    /// Owning project
    pub project_id: String,

    /// Path of the backing file, relative to the storage root
    pub storage_path: String,

    /// Monotonically increasing save counter
    pub version: u64,
}

/// Document repository trait
pub trait DocumentRepository: Send + Sync {
    /// Find a document by its id
    fn find_by_id(&self, id: &str) -> CatalogResult<Option<Document>>;

    /// Find the document belonging to a project
    fn find_by_project(&self, project_id: &str) -> CatalogResult<Option<Document>>;

    /// Register a new document
    fn create(&self, document: &Document) -> CatalogResult<()>;

    /// Persist changed document metadata (version bumps)
    fn update(&self, document: &Document) -> CatalogResult<()>;
}

/// In-memory document repository
#[derive(Debug, Default)]
pub struct InMemoryDocumentRepository {
    documents: std::sync::RwLock<Vec<Document>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentRepository for InMemoryDocumentRepository {
    fn find_by_id(&self, id: &str) -> CatalogResult<Option<Document>> {
        let documents = self
            .documents
            .read()
            .map_err(|_| CatalogError::StorageError("Lock poisoned".to_string()))?;
        Ok(documents.iter().find(|d| d.id == id).cloned())
    }

    fn find_by_project(&self, project_id: &str) -> CatalogResult<Option<Document>> {
        let documents = self
            .documents
            .read()
            .map_err(|_| CatalogError::StorageError("Lock poisoned".to_string()))?;
        Ok(documents.iter().find(|d| d.project_id == project_id).cloned())
    }

    fn create(&self, document: &Document) -> CatalogResult<()> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| CatalogError::StorageError("Lock poisoned".to_string()))?;

        if documents.iter().any(|d| d.id == document.id) {
            return Err(CatalogError::DocumentAlreadyExists(document.id.clone()));
        }

        documents.push(document.clone());
        Ok(())
    }

    fn update(&self, document: &Document) -> CatalogResult<()> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| CatalogError::StorageError("Lock poisoned".to_string()))?;

        match documents.iter_mut().find(|d| d.id == document.id) {
            Some(existing) => {
                *existing = document.clone();
                Ok(())
            }
            None => Err(CatalogError::DocumentNotFound(document.id.clone())),
        }
    }
}
