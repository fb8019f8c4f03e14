//! # Session Token Issuer
//!
//! Signed, time-bounded claim sets shared with the editing engine:
//! descriptor tokens authorizing an editing session, link tokens binding a
//! download URL to one storage path, and verification of the bearer
//! credential on inbound callbacks. Everything is HMAC-signed with the
//! pre-shared secret from the configuration.

pub mod claims;
pub mod errors;
pub mod issuer;

pub use claims::{DescriptorClaims, DescriptorDocument, LinkClaims};
pub use errors::{TokenError, TokenResult};
pub use issuer::TokenIssuer;
