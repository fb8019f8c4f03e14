//! # Auth Module
//!
//! The credential-store boundary: user accounts, argon2id password
//! hashing, and server-issued opaque principal sessions. A principal
//! token is a random value stored hashed at rest; it carries no identity
//! and proves nothing beyond "this login happened recently".

pub mod crypto;
pub mod errors;
pub mod principal;
pub mod service;
pub mod user;

pub use errors::{AuthError, AuthResult};
pub use principal::PrincipalSessionStore;
pub use service::Authenticator;
pub use user::{InMemoryUserRepository, User, UserRepository};
