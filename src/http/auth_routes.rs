//! Auth HTTP routes
//!
//! One endpoint: exchange credentials for an opaque principal token.
//! Every other route takes that token as a query parameter.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use super::response::{reject, ApiRejection};
use super::state::AppState;

/// Auth routes with shared state
pub fn auth_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/login", post(login_handler))
        .with_state(state)
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub status: &'static str,
    pub token: String,
}

// ==================
// Handlers
// ==================

/// Login handler
async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiRejection> {
    match state
        .authenticator
        .login(&request.username, &request.password)
    {
        Ok(token) => Ok(Json(LoginResponse {
            status: "ok",
            token,
        })),
        Err(e) => Err(reject(e.status_code(), e.to_string())),
    }
}
