//! Save-notification status codes
//!
//! The engine drives the save-back protocol with a small integer. Only
//! one value carries content to commit; every other code, known or not,
//! is logged and acknowledged without touching storage.

/// Status of an inbound save notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    /// Document is being edited
    Editing,
    /// Finalized content is ready to be saved
    ReadyToSave,
    /// Saving error occurred in the engine
    SaveError,
    /// Document closed with no changes
    ClosedNoChanges,
    /// Force-saved while editing continues
    ForceSaved,
    /// Force-save error occurred in the engine
    ForceSaveError,
    /// Unrecognized status code
    Other(i64),
}

impl SaveStatus {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => SaveStatus::Editing,
            2 => SaveStatus::ReadyToSave,
            3 => SaveStatus::SaveError,
            4 => SaveStatus::ClosedNoChanges,
            6 => SaveStatus::ForceSaved,
            7 => SaveStatus::ForceSaveError,
            other => SaveStatus::Other(other),
        }
    }

    /// Whether this notification carries finalized content to commit
    pub fn is_ready_to_save(&self) -> bool {
        matches!(self, SaveStatus::ReadyToSave)
    }
}
