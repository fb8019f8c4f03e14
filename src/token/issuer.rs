//! # Session Token Issuer
//!
//! Mints and verifies the signed, time-bounded claim sets the engine
//! exchange runs on: descriptor tokens (one per editing session), link
//! tokens (one per download URL), and the bearer credential on inbound
//! engine callbacks.
//!
//! ## Invariants
//! - Validation is stateless: signature + expiry, no store lookup
//! - TTL is bounded and enforced on every verification
//! - No clock-skew tolerance (leeway is zero)

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::claims::{DescriptorClaims, DescriptorDocument, LinkClaims};
use super::errors::{TokenError, TokenResult};

/// Issues and verifies HMAC-signed session tokens.
///
/// Built once at startup from the validated configuration; the shared
/// secret must match the one the editing engine was deployed with.
#[derive(Clone)]
pub struct TokenIssuer {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create an issuer from the pre-shared secret.
    ///
    /// `algorithm` must be a symmetric MAC variant (HS256/HS384/HS512);
    /// the config layer rejects everything else before this runs.
    pub fn new(secret: &str, algorithm: Algorithm, ttl: Duration) -> Self {
        Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Mint the descriptor token bound to `{fileType, editSessionKey}`.
    pub fn mint_descriptor(&self, file_type: &str, session_key: &str) -> TokenResult<String> {
        let (iat, exp) = self.window();
        self.encode(&DescriptorClaims {
            document: DescriptorDocument {
                file_type: file_type.to_string(),
                key: session_key.to_string(),
            },
            iat,
            exp,
        })
    }

    /// Mint the link token embedding a document's storage path.
    pub fn mint_link(&self, file_path: &str) -> TokenResult<String> {
        let (iat, exp) = self.window();
        self.encode(&LinkClaims {
            file_path: file_path.to_string(),
            iat,
            exp,
        })
    }

    /// Verify a descriptor token and return its claims.
    pub fn verify_descriptor(&self, token: &str) -> TokenResult<DescriptorClaims> {
        self.decode(token)
    }

    /// Verify a link token and return its claims.
    pub fn verify_link(&self, token: &str) -> TokenResult<LinkClaims> {
        self.decode(token)
    }

    /// Verify the engine's callback bearer credential.
    ///
    /// The engine decides the claim shape, so only signature and expiry
    /// are checked; the payload itself is not interpreted.
    pub fn verify_engine(&self, token: &str) -> TokenResult<()> {
        self.decode::<serde_json::Value>(token).map(|_| ())
    }

    /// Token lifetime this issuer stamps into claims.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn window(&self) -> (i64, i64) {
        let iat = Utc::now().timestamp();
        (iat, iat + self.ttl.num_seconds())
    }

    fn encode<C: Serialize>(&self, claims: &C) -> TokenResult<String> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .map_err(|_| TokenError::GenerationFailed)
    }

    fn decode<C: DeserializeOwned>(&self, token: &str) -> TokenResult<C> {
        let mut validation = Validation::new(self.algorithm);
        // No clock-skew tolerance: a token is invalid the second it expires.
        validation.leeway = 0;

        decode::<C>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })
    }
}
