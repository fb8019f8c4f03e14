//! docbridge - session gateway for a collaborative document editor
//!
//! Bridges a host application and an external document-editing engine:
//! authenticates users, mints the signed session descriptors the editor
//! embeds, serves document content to the engine, and commits the
//! engine's save-backs.

pub mod auth;
pub mod callback;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod gateway;
pub mod http;
pub mod observability;
pub mod storage;
pub mod token;
