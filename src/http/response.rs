//! Wire-level error responses shared across routes

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::gateway::GatewayError;

/// Error body on the request path
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
}

/// Status-plus-body rejection used by every request-path handler
pub type ApiRejection = (StatusCode, Json<ErrorBody>);

pub fn reject(code: u16, message: String) -> ApiRejection {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ErrorBody {
            status: "error",
            message,
        }),
    )
}

pub fn reject_gateway(error: GatewayError) -> ApiRejection {
    reject(error.status_code(), error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthError;

    #[test]
    fn test_rejection_shape() {
        let (status, Json(body)) = reject_gateway(AuthError::Forbidden.into());

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body.status, "error");
        assert!(!body.message.is_empty());
    }

    #[test]
    fn test_bogus_code_falls_back_to_500() {
        let (status, _) = reject(1000, "x".to_string());
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
