//! # Principal Sessions
//!
//! Server-issued opaque session tokens for authenticated principals. The
//! raw token goes to the client once; only its SHA-256 hash is kept here,
//! mapped to the user id and an expiry. Possession of the raw value is
//! the whole credential, so nothing about the user can be recovered from
//! the token itself.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};

use super::crypto::{generate_token, hash_token};
use super::errors::{AuthError, AuthResult};

/// A stored principal session
#[derive(Debug, Clone)]
struct SessionEntry {
    user_id: String,
    expires_at: DateTime<Utc>,
}

/// In-memory principal session store, keyed by token hash
pub struct PrincipalSessionStore {
    sessions: RwLock<HashMap<String, SessionEntry>>,
    ttl: Duration,
}

impl PrincipalSessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Issue a new session for a user, returning the raw token.
    pub fn issue(&self, user_id: &str) -> AuthResult<String> {
        let raw_token = generate_token();
        let entry = SessionEntry {
            user_id: user_id.to_string(),
            expires_at: Utc::now() + self.ttl,
        };

        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        sessions.insert(hash_token(&raw_token), entry);

        Ok(raw_token)
    }

    /// Resolve a raw token to its user id.
    ///
    /// Unknown and expired tokens are indistinguishable to the caller.
    pub fn resolve(&self, raw_token: &str) -> AuthResult<String> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;

        match sessions.get(&hash_token(raw_token)) {
            Some(entry) if entry.expires_at > Utc::now() => Ok(entry.user_id.clone()),
            _ => Err(AuthError::NotAuthenticated),
        }
    }

    /// Drop expired sessions, returning how many were removed.
    pub fn cleanup_expired(&self) -> AuthResult<usize> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;

        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, entry| entry.expires_at > now);

        Ok(before - sessions.len())
    }
}
