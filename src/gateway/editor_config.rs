//! Engine-facing editor configuration
//!
//! The exact JSON shape the editing engine consumes when a session
//! opens. Field names follow the engine's camelCase contract, hence the
//! serde renames; nothing here is interpreted by docbridge itself.

use serde::{Deserialize, Serialize};

/// Top-level configuration handed to the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Document family, always "word" for docx
    pub document_type: String,

    /// Editor embed type
    #[serde(rename = "type")]
    pub session_type: String,

    pub document: DocumentSection,

    pub editor_config: EditorSection,

    /// Signed session descriptor covering this configuration
    pub token: String,
}

/// The `document` section: what to edit and where to fetch it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSection {
    pub file_type: String,

    /// Edit session key; the engine caches by this value
    pub key: String,

    /// Title shown in the editor UI
    pub title: String,

    /// Authenticated download address for the document bytes
    pub url: String,
}

/// The `editorConfig` section: session behavior and save-back address
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSection {
    /// Where the engine posts save notifications
    pub callback_url: String,

    pub lang: String,

    pub mode: String,

    pub user: UserSection,
}

/// Identity the editor displays for this principal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSection {
    pub id: String,
    pub name: String,
}
