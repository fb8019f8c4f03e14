//! Project HTTP routes
//!
//! The host-app surface: list the caller's projects and open an editing
//! session on one of them.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::gateway::{EditorConfig, ProjectSummary};

use super::response::{reject_gateway, ApiRejection};
use super::state::AppState;

/// Project routes with shared state
pub fn project_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/projects", get(list_projects_handler))
        .route(
            "/projects/:project_id/document-config",
            get(document_config_handler),
        )
        .with_state(state)
}

// ==================
// Request Types
// ==================

/// Principal token carried in the query string
#[derive(Debug, Deserialize)]
pub struct PrincipalQuery {
    pub token: Option<String>,
}

// ==================
// Handlers
// ==================

/// List the projects the caller is a member of
async fn list_projects_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PrincipalQuery>,
) -> Result<Json<Vec<ProjectSummary>>, ApiRejection> {
    state
        .gateway
        .list_projects(query.token.as_deref())
        .map(Json)
        .map_err(reject_gateway)
}

/// Open an editing session and return the engine configuration
async fn document_config_handler(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<String>,
    Query(query): Query<PrincipalQuery>,
) -> Result<Json<EditorConfig>, ApiRejection> {
    state
        .gateway
        .open_session(&project_id, query.token.as_deref())
        .map(Json)
        .map_err(reject_gateway)
}
