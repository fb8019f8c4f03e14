//! # Token Errors

use thiserror::Error;

/// Result type for token operations
pub type TokenResult<T> = Result<T, TokenError>;

/// Signed-token errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Expiry elapsed
    #[error("Token expired")]
    Expired,

    /// Signature does not match the shared secret
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Token could not be parsed
    #[error("Malformed token")]
    Malformed,

    /// Signing failed
    #[error("Internal error: token generation failed")]
    GenerationFailed,
}

impl TokenError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            TokenError::Expired => 403,
            TokenError::InvalidSignature => 403,
            TokenError::Malformed => 403,
            TokenError::GenerationFailed => 500,
        }
    }
}
