//! Callback-path errors
//!
//! None of these ever reach the engine. The callback contract is a terse
//! acknowledgment, so every failure here ends as a log line and an
//! unchanged document.

use thiserror::Error;

pub type FetchResult<T> = Result<T, FetchError>;

/// Failures while fetching finalized content from the engine
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid save-content URL: {0}")]
    InvalidUrl(String),

    #[error("Fetch timed out after {0}s")]
    Timeout(u64),

    #[error("Fetch failed: {0}")]
    Network(String),

    #[error("Save-content endpoint returned HTTP {0}")]
    HttpStatus(u16),

    #[error("Save content exceeded the {0} byte cap")]
    TooLarge(u64),

    #[error("HTTP client initialization failed: {0}")]
    ClientInit(String),
}
