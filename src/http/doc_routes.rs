//! Document download route
//!
//! Serves document bytes as a docx attachment. The engine hits this with
//! the URL minted at session open; the same endpoint works from a
//! browser holding a valid principal token.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;

use super::response::{reject_gateway, ApiRejection};
use super::state::AppState;

/// Document routes with shared state
pub fn doc_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/docs/:doc_id/download", get(download_handler))
        .with_state(state)
}

// ==================
// Request Types
// ==================

/// Query parameters on the download URL
#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    /// Principal session token
    pub token: Option<String>,

    /// Link token minted at session open
    pub jwt: Option<String>,
}

// ==================
// Handlers
// ==================

/// Download handler
async fn download_handler(
    State(state): State<Arc<AppState>>,
    Path(doc_id): Path<String>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, ApiRejection> {
    let download = state
        .gateway
        .fetch_document(&doc_id, query.token.as_deref(), query.jwt.as_deref())
        .map_err(reject_gateway)?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        download.file_name.replace('"', "")
    );
    let headers = [
        (header::CONTENT_TYPE, download.content_type.to_string()),
        (header::CONTENT_DISPOSITION, disposition),
    ];

    Ok((headers, download.bytes).into_response())
}
