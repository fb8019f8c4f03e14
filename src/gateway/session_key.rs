//! Edit session keys
//!
//! A key has the form `{documentId}-{uuid}` and is generated fresh for
//! every configuration build, so the engine's cache treats each open as
//! a new editing session. The document-id prefix survives inside the
//! key, letting a save event be traced back to its document.

use std::fmt;

use uuid::Uuid;

/// Unique-per-open identifier for an editing session
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EditSessionKey(String);

impl EditSessionKey {
    /// Length of the uuid suffix plus the separating dash.
    const SUFFIX_LEN: usize = 37;

    /// Generate a fresh key for a document. Never reuses a value, even
    /// for back-to-back calls on the same document.
    pub fn generate(document_id: &str) -> Self {
        Self(format!("{}-{}", document_id, Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Recover the document-id prefix.
    pub fn document_id(&self) -> &str {
        &self.0[..self.0.len() - Self::SUFFIX_LEN]
    }
}

impl fmt::Display for EditSessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
