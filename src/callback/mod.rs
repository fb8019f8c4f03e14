//! # Callback Module
//!
//! The engine's save-back protocol. Notifications arrive as POSTs with a
//! status code; only status 2 (ready-to-save) carries content, which is
//! fetched within bounds, written atomically, and counted with a version
//! bump. Every accepted callback is acknowledged the same way, so the
//! engine never re-queues on our internal failures.

pub mod errors;
pub mod fetcher;
pub mod locks;
pub mod service;
pub mod status;

pub use errors::{FetchError, FetchResult};
pub use fetcher::ContentFetcher;
pub use locks::DocumentLocks;
pub use service::{CallbackOutcome, CallbackService, SaveNotification};
pub use status::SaveStatus;
