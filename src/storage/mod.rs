//! # Storage Module
//!
//! Document file storage behind a backend trait. The local backend keeps
//! every document under one root directory and publishes saves atomically,
//! so a reader never observes a half-written file.

pub mod backend;
pub mod errors;
pub mod local;

pub use backend::StorageBackend;
pub use errors::{StorageError, StorageResult};
pub use local::LocalBackend;
