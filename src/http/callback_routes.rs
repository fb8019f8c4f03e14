//! Engine callback route
//!
//! The bearer credential check is the only rejection on this path. Once
//! it passes, the response is always the terse acknowledgment the engine
//! expects, whatever happened inside; failures live in the logs.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::callback::SaveNotification;
use crate::observability::Logger;

use super::state::AppState;

/// Callback routes with shared state
pub fn callback_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/onlyoffice/callback", post(callback_handler))
        .with_state(state)
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    #[serde(rename = "docId")]
    pub doc_id: Option<String>,
}

/// Acknowledgment returned on every accepted callback
#[derive(Debug, Serialize)]
pub struct CallbackAck {
    pub error: i32,
}

/// Rejection body for callbacks that fail the credential check
#[derive(Debug, Serialize)]
pub struct CallbackRejection {
    pub error: i32,
    pub message: String,
}

// ==================
// Handlers
// ==================

/// Callback handler
async fn callback_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CallbackQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CallbackAck>, (StatusCode, Json<CallbackRejection>)> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    if let Err(e) = state.callback.verify_engine_credential(bearer) {
        let error = e.to_string();
        Logger::warn("CALLBACK_REJECTED", &[("error", &error)]);
        return Err((
            StatusCode::FORBIDDEN,
            Json(CallbackRejection {
                error: 1,
                message: error,
            }),
        ));
    }

    // Tolerant body parse: absent or malformed JSON behaves as status 0
    let notification: SaveNotification = serde_json::from_slice(&body).unwrap_or_default();
    let doc_id = query.doc_id.unwrap_or_default();

    state.callback.handle_save(&doc_id, &notification).await;

    Ok(Json(CallbackAck { error: 0 }))
}
