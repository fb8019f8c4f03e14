//! Shared application state for the HTTP layer

use std::sync::Arc;

use crate::auth::Authenticator;
use crate::callback::CallbackService;
use crate::gateway::GatewayService;

/// State shared across all request handlers
///
/// Assembled once at boot from the validated configuration; handlers
/// only ever borrow it.
pub struct AppState {
    pub authenticator: Arc<Authenticator>,
    pub gateway: GatewayService,
    pub callback: CallbackService,
}
