//! Claim sets carried by docbridge session tokens.
//!
//! Every claim set is stamped with `iat`/`exp` by the issuer. Tokens are
//! never persisted; validity is purely signature + expiry.

use serde::{Deserialize, Serialize};

/// Document binding inside a descriptor token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorDocument {
    /// File type the engine opens ("docx")
    #[serde(rename = "fileType")]
    pub file_type: String,

    /// Edit session key for this open
    pub key: String,
}

/// Claims of the descriptor token returned in the `EditorConfig` top-level
/// `token` field. The engine must present it unmodified to authorize the
/// editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptorClaims {
    pub document: DescriptorDocument,

    /// Issued-at (Unix epoch seconds)
    pub iat: i64,

    /// Expiry (Unix epoch seconds)
    pub exp: i64,
}

/// Claims of the link token appended to engine-facing download URLs.
///
/// Binds the link to one storage path. The Download Gateway compares the
/// embedded path against the resolved document when link hardening is
/// enabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkClaims {
    pub file_path: String,

    /// Issued-at (Unix epoch seconds)
    pub iat: i64,

    /// Expiry (Unix epoch seconds)
    pub exp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_serializes_engine_field_names() {
        let claims = DescriptorClaims {
            document: DescriptorDocument {
                file_type: "docx".to_string(),
                key: "doc-1234".to_string(),
            },
            iat: 100,
            exp: 1900,
        };

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["document"]["fileType"], "docx");
        assert_eq!(json["document"]["key"], "doc-1234");
        assert_eq!(json["exp"], 1900);
    }

    #[test]
    fn test_link_claims_roundtrip() {
        let claims = LinkClaims {
            file_path: "abc.docx".to_string(),
            iat: 1,
            exp: 2,
        };

        let json = serde_json::to_string(&claims).unwrap();
        let back: LinkClaims = serde_json::from_str(&json).unwrap();
        assert_eq!(back.file_path, "abc.docx");
    }
}
