//! # Gateway Module
//!
//! The session-opening side of the bridge: authenticate the principal,
//! authorize by project membership, generate a cache-busting edit
//! session key, and hand the engine a signed configuration pointing back
//! at this server for download and save-back.

pub mod editor_config;
pub mod errors;
pub mod service;
pub mod session_key;

pub use editor_config::{DocumentSection, EditorConfig, EditorSection, UserSection};
pub use errors::{GatewayError, GatewayResult};
pub use service::{DocumentDownload, GatewayService, ProjectSummary, DOCX_CONTENT_TYPE};
pub use session_key::EditSessionKey;
