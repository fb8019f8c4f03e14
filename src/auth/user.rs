//! # User Management
//!
//! User model and repository for the credential-store boundary. docbridge
//! owns no accounts of its own; deployments provision them through the
//! seed loader, and the repository trait keeps the store injectable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::crypto::verify_password;
use super::errors::{AuthError, AuthResult};

/// User model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique username, the identity anchor
    pub id: String,

    /// Name shown in the editor UI
    pub display_name: String,

    /// Argon2id password hash (never plaintext)
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// When the user was provisioned
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a user from an already-hashed password.
    pub fn new(id: &str, display_name: &str, password_hash: String) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            password_hash,
            created_at: Utc::now(),
        }
    }

    /// Verify a password against this user's stored hash
    pub fn verify_password(&self, password: &str) -> AuthResult<bool> {
        verify_password(password, &self.password_hash)
    }
}

/// User repository trait
///
/// Abstracts the external credential store.
pub trait UserRepository: Send + Sync {
    /// Find a user by their username
    fn find_by_username(&self, username: &str) -> AuthResult<Option<User>>;

    /// Provision a new user
    fn create(&self, user: &User) -> AuthResult<()>;
}

/// In-memory user repository
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: std::sync::RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    fn find_by_username(&self, username: &str) -> AuthResult<Option<User>> {
        let users = self
            .users
            .read()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        Ok(users.iter().find(|u| u.id == username).cloned())
    }

    fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self
            .users
            .write()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;

        if users.iter().any(|u| u.id == user.id) {
            return Err(AuthError::UserAlreadyExists);
        }

        users.push(user.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::crypto::hash_password;

    fn sample_user() -> User {
        User::new("alice", "Alice", hash_password("wonderland").unwrap())
    }

    #[test]
    fn test_password_verification() {
        let user = sample_user();

        assert!(user.verify_password("wonderland").unwrap());
        assert!(!user.verify_password("wrong_password").unwrap());
        assert_ne!(user.password_hash, "wonderland"); // Not plaintext!
    }

    #[test]
    fn test_in_memory_repository() {
        let repo = InMemoryUserRepository::new();
        repo.create(&sample_user()).unwrap();

        let found = repo.find_by_username("alice").unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().display_name, "Alice");

        assert!(repo.find_by_username("bob").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.create(&sample_user()).unwrap();

        let result = repo.create(&sample_user());
        assert!(matches!(result, Err(AuthError::UserAlreadyExists)));
    }

    #[test]
    fn test_user_serialization_omits_password() {
        let user = sample_user();

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains(&user.password_hash));
    }
}
