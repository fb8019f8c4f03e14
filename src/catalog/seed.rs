//! Seed loader for provisioning users, projects and documents at startup
//!
//! The gateway owns no account or project data of its own; a deployment
//! describes its fixtures in a JSON seed file and the loader pushes them
//! into the configured repositories. Passwords in the seed file are
//! plaintext and are hashed before they reach the user store.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::auth::crypto::hash_password;
use crate::auth::errors::AuthError;
use crate::auth::{User, UserRepository};

use super::document::{Document, DocumentRepository};
use super::errors::CatalogError;
use super::project::{Project, ProjectRepository};

/// Errors raised while loading or applying a seed file
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    ReadFailed(String),

    #[error("Invalid seed file: {0}")]
    ParseFailed(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

pub type SeedResult<T> = Result<T, SeedError>;

/// A user entry in the seed file
#[derive(Debug, Clone, Deserialize)]
pub struct SeedUser {
    pub username: String,

    /// Shown in the editor UI; defaults to the capitalized username
    #[serde(default)]
    pub display_name: Option<String>,

    /// Plaintext password, hashed during [`SeedFile::apply`]
    pub password: String,
}

/// A document entry in the seed file
#[derive(Debug, Clone, Deserialize)]
pub struct SeedDocument {
    pub id: String,
    pub project_id: String,
    pub storage_path: String,

    #[serde(default = "default_version")]
    pub version: u64,
}

fn default_version() -> u64 {
    1
}

/// Parsed seed file contents
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SeedFile {
    #[serde(default)]
    pub users: Vec<SeedUser>,

    #[serde(default)]
    pub projects: Vec<Project>,

    #[serde(default)]
    pub documents: Vec<SeedDocument>,
}

impl SeedFile {
    /// Reads and parses a seed file from disk.
    pub fn load(path: &Path) -> SeedResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SeedError::ReadFailed(format!("{}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            SeedError::ParseFailed(format!("{}: {}", path.display(), e))
        })
    }

    /// Pushes the seed contents into the given repositories.
    ///
    /// Passwords are hashed here. Each document must reference a project
    /// that appears earlier in the same seed file (or already exists).
    pub fn apply<U, P, D>(&self, users: &U, projects: &P, documents: &D) -> SeedResult<()>
    where
        U: UserRepository,
        P: ProjectRepository,
        D: DocumentRepository,
    {
        for seed_user in &self.users {
            let display_name = seed_user
                .display_name
                .clone()
                .unwrap_or_else(|| default_display_name(&seed_user.username));
            let password_hash = hash_password(&seed_user.password)?;
            users.create(&User::new(&seed_user.username, &display_name, password_hash))?;
        }

        for project in &self.projects {
            projects.create(project)?;
        }

        for seed_doc in &self.documents {
            if projects.find_by_id(&seed_doc.project_id)?.is_none() {
                return Err(CatalogError::ProjectNotFound(seed_doc.project_id.clone()).into());
            }

            documents.create(&Document {
                id: seed_doc.id.clone(),
                project_id: seed_doc.project_id.clone(),
                storage_path: seed_doc.storage_path.clone(),
                version: seed_doc.version,
            })?;
        }

        Ok(())
    }
}

/// Capitalizes the first letter of a username for display.
fn default_display_name(username: &str) -> String {
    let mut chars = username.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::crypto::verify_password;
    use crate::auth::InMemoryUserRepository;
    use crate::catalog::{InMemoryDocumentRepository, InMemoryProjectRepository};
    use tempfile::TempDir;

    const SAMPLE_SEED: &str = r#"{
        "users": [
            {"username": "alice", "password": "wonderland"},
            {"username": "bob", "display_name": "Bob B.", "password": "builder"}
        ],
        "projects": [
            {"id": "abc", "name": "Project ABC", "allowed_users": ["alice", "bob"]}
        ],
        "documents": [
            {"id": "doc1", "project_id": "abc", "storage_path": "sample.docx"}
        ]
    }"#;

    fn write_seed(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("seed.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_and_apply() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_seed(&temp_dir, SAMPLE_SEED);

        let seed = SeedFile::load(&path).unwrap();
        assert_eq!(seed.users.len(), 2);
        assert_eq!(seed.projects.len(), 1);
        assert_eq!(seed.documents.len(), 1);

        let users = InMemoryUserRepository::new();
        let projects = InMemoryProjectRepository::new();
        let documents = InMemoryDocumentRepository::new();
        seed.apply(&users, &projects, &documents).unwrap();

        let alice = users.find_by_username("alice").unwrap().unwrap();
        assert_eq!(alice.display_name, "Alice");
        assert!(verify_password("wonderland", &alice.password_hash).unwrap());
        assert_ne!(alice.password_hash, "wonderland");

        let bob = users.find_by_username("bob").unwrap().unwrap();
        assert_eq!(bob.display_name, "Bob B.");

        let doc = documents.find_by_id("doc1").unwrap().unwrap();
        assert_eq!(doc.version, 1);
        assert_eq!(doc.project_id, "abc");
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = SeedFile::load(&temp_dir.path().join("nope.json"));
        assert!(matches!(result, Err(SeedError::ReadFailed(_))));
    }

    #[test]
    fn test_malformed_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_seed(&temp_dir, "{not json");
        let result = SeedFile::load(&path);
        assert!(matches!(result, Err(SeedError::ParseFailed(_))));
    }

    #[test]
    fn test_document_requires_known_project() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_seed(
            &temp_dir,
            r#"{"documents": [{"id": "doc1", "project_id": "ghost", "storage_path": "a.docx"}]}"#,
        );

        let seed = SeedFile::load(&path).unwrap();
        let result = seed.apply(
            &InMemoryUserRepository::new(),
            &InMemoryProjectRepository::new(),
            &InMemoryDocumentRepository::new(),
        );
        assert!(matches!(
            result,
            Err(SeedError::Catalog(CatalogError::ProjectNotFound(_)))
        ));
    }

    #[test]
    fn test_empty_seed_is_valid() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_seed(&temp_dir, "{}");

        let seed = SeedFile::load(&path).unwrap();
        seed.apply(
            &InMemoryUserRepository::new(),
            &InMemoryProjectRepository::new(),
            &InMemoryDocumentRepository::new(),
        )
        .unwrap();
    }
}
