//! Gateway error types

use thiserror::Error;

use crate::auth::AuthError;
use crate::catalog::CatalogError;
use crate::storage::StorageError;
use crate::token::TokenError;

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors raised on the request path
///
/// Each variant wraps the area error it came from; the HTTP layer maps
/// `status_code` onto the response.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl GatewayError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::Auth(e) => e.status_code(),
            GatewayError::Token(e) => e.status_code(),
            GatewayError::Catalog(e) => e.status_code(),
            GatewayError::Storage(e) => e.status_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_delegate() {
        let not_authed: GatewayError = AuthError::NotAuthenticated.into();
        assert_eq!(not_authed.status_code(), 401);

        let forbidden: GatewayError = AuthError::Forbidden.into();
        assert_eq!(forbidden.status_code(), 403);

        let expired: GatewayError = TokenError::Expired.into();
        assert_eq!(expired.status_code(), 403);

        let missing: GatewayError = CatalogError::DocumentNotFound("d".to_string()).into();
        assert_eq!(missing.status_code(), 404);

        let gone: GatewayError = StorageError::ObjectNotFound("p".to_string()).into();
        assert_eq!(gone.status_code(), 404);
    }
}
