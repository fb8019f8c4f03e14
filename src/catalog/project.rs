//! # Project Membership
//!
//! Projects map a document to the principals allowed to open it. The
//! membership store itself is an external collaborator; docbridge only
//! consumes it through [`ProjectRepository`].

use serde::{Deserialize, Serialize};

use super::errors::{CatalogError, CatalogResult};

/// Project model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique project identifier
    pub id: String,

    /// Display name, also used for download filenames
    pub name: String,

    /// User ids entitled to open this project's document
    pub allowed_users: Vec<String>,
}

impl Project {
    /// The single authorization rule: is this principal entitled?
    pub fn is_member(&self, user_id: &str) -> bool {
        self.allowed_users.iter().any(|u| u == user_id)
    }
}

/// Project repository trait
///
/// Abstracts the external project-membership store.
pub trait ProjectRepository: Send + Sync {
    /// Find a project by its id
    fn find_by_id(&self, id: &str) -> CatalogResult<Option<Project>>;

    /// List the projects a user is a member of
    fn list_for_user(&self, user_id: &str) -> CatalogResult<Vec<Project>>;

    /// Provision a new project
    fn create(&self, project: &Project) -> CatalogResult<()>;
}

/// In-memory project repository
#[derive(Debug, Default)]
pub struct InMemoryProjectRepository {
    projects: std::sync::RwLock<Vec<Project>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProjectRepository for InMemoryProjectRepository {
    fn find_by_id(&self, id: &str) -> CatalogResult<Option<Project>> {
        let projects = self
            .projects
            .read()
            .map_err(|_| CatalogError::StorageError("Lock poisoned".to_string()))?;
        Ok(projects.iter().find(|p| p.id == id).cloned())
    }

    fn list_for_user(&self, user_id: &str) -> CatalogResult<Vec<Project>> {
        let projects = self
            .projects
            .read()
            .map_err(|_| CatalogError::StorageError("Lock poisoned".to_string()))?;
        Ok(projects
            .iter()
            .filter(|p| p.is_member(user_id))
            .cloned()
            .collect())
    }

    fn create(&self, project: &Project) -> CatalogResult<()> {
        let mut projects = self
            .projects
            .write()
            .map_err(|_| CatalogError::StorageError("Lock poisoned".to_string()))?;

        if projects.iter().any(|p| p.id == project.id) {
            return Err(CatalogError::ProjectAlreadyExists(project.id.clone()));
        }

        projects.push(project.clone());
        Ok(())
    }
}
