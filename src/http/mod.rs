//! # HTTP Layer
//!
//! axum routes over the gateway and callback services. Three surfaces:
//! the host application (login, project listing, session opening), the
//! editing engine (document download, save-back callback), and a plain
//! health check.

pub mod auth_routes;
pub mod callback_routes;
pub mod doc_routes;
pub mod project_routes;
pub mod response;
pub mod server;
pub mod state;

pub use server::{build_router, HttpServer};
pub use state::AppState;
