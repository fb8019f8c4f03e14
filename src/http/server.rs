//! # HTTP Server
//!
//! Combines the host-app surface (/login, /projects), the engine surface
//! (download, callback) and /health into one router.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::observability::Logger;

use super::auth_routes::auth_routes;
use super::callback_routes::callback_routes;
use super::doc_routes::doc_routes;
use super::project_routes::project_routes;
use super::state::AppState;

/// HTTP server over the assembled application state
pub struct HttpServer {
    addr: String,
    router: Router,
}

impl HttpServer {
    /// Create the server from validated configuration and shared state
    pub fn new(config: &AppConfig, state: Arc<AppState>) -> Self {
        Self {
            addr: config.socket_addr(),
            router: build_router(config, state),
        }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> &str {
        &self.addr
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.addr.parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid bind address '{}': {}", self.addr, e),
            )
        })?;

        Logger::info("SERVER_LISTENING", &[("addr", &addr.to_string())]);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

/// Build the combined router with all endpoints
pub fn build_router(config: &AppConfig, state: Arc<AppState>) -> Router {
    // Configure CORS from config
    let cors = if config.cors_origins.is_empty() {
        // No origins configured: permissive, for development setups
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .merge(health_routes())
        .merge(auth_routes(state.clone()))
        .merge(project_routes(state.clone()))
        .merge(doc_routes(state.clone()))
        .merge(callback_routes(state))
        .layer(cors)
}

/// Health check route
fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
