//! # Auth Errors
//!
//! Error types for the authentication module.

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication and authorization errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    // ==================
    // Authentication Errors
    // ==================

    /// Bad username or password (generic - don't leak which)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, unknown or expired session token
    #[error("Not authenticated")]
    NotAuthenticated,

    // ==================
    // Authorization Errors
    // ==================

    /// Principal is not a member of the requested project
    #[error("Not authorized to access this resource")]
    Forbidden,

    // ==================
    // Account Errors
    // ==================

    /// Username already registered
    #[error("Username already registered")]
    UserAlreadyExists,

    // ==================
    // Internal Errors
    // ==================

    /// Password hashing failed
    #[error("Internal error: password hashing failed")]
    HashingFailed,

    /// Storage operation failed
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            // 401 Unauthorized
            AuthError::InvalidCredentials => 401,
            AuthError::NotAuthenticated => 401,

            // 403 Forbidden
            AuthError::Forbidden => 403,

            // 409 Conflict
            AuthError::UserAlreadyExists => 409,

            // 500 Internal Server Error
            AuthError::HashingFailed => 500,
            AuthError::StorageError(_) => 500,
        }
    }

    /// Returns whether this error should be logged at warn level
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
