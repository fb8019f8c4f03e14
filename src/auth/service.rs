//! # Authenticator
//!
//! Ties the credential store to the principal session store: a successful
//! username/password check issues an opaque token, and every request path
//! resolves that token back to a user before touching anything else.

use std::sync::Arc;

use chrono::Duration;

use super::errors::{AuthError, AuthResult};
use super::principal::PrincipalSessionStore;
use super::user::{User, UserRepository};

/// Authentication service
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    sessions: PrincipalSessionStore,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserRepository>, session_ttl: Duration) -> Self {
        Self {
            users,
            sessions: PrincipalSessionStore::new(session_ttl),
        }
    }

    /// Check credentials and issue an opaque principal token.
    ///
    /// Unknown usernames and wrong passwords produce the same error.
    pub fn login(&self, username: &str, password: &str) -> AuthResult<String> {
        let user = self
            .users
            .find_by_username(username)?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.verify_password(password)? {
            return Err(AuthError::InvalidCredentials);
        }

        self.sessions.issue(&user.id)
    }

    /// Resolve a principal token to its user.
    pub fn authenticate(&self, token: &str) -> AuthResult<User> {
        let user_id = self.sessions.resolve(token)?;

        // Session outliving the account also reads as not authenticated
        self.users
            .find_by_username(&user_id)?
            .ok_or(AuthError::NotAuthenticated)
    }

    /// Drop expired principal sessions.
    pub fn cleanup_sessions(&self) -> AuthResult<usize> {
        self.sessions.cleanup_expired()
    }
}
