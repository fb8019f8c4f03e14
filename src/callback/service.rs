//! Callback handler for the engine's save-back protocol
//!
//! After the bearer credential check, every internal outcome collapses
//! into the same terse acknowledgment; the log line is the only
//! externally visible difference. Only a ready-to-save notification
//! touches storage, and the commit runs under a per-document lock.

use std::sync::Arc;

use serde::Deserialize;

use crate::catalog::DocumentRepository;
use crate::observability::Logger;
use crate::storage::StorageBackend;
use crate::token::{TokenError, TokenResult};
use crate::token::TokenIssuer;

use super::fetcher::ContentFetcher;
use super::locks::DocumentLocks;
use super::status::SaveStatus;

/// Inbound save notification body
///
/// Parsed tolerantly: the engine sends more fields than these, and an
/// absent or malformed body behaves as status 0.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveNotification {
    #[serde(default)]
    pub status: i64,

    #[serde(default)]
    pub url: Option<String>,
}

/// What one callback did, for logging and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// Status carried no content to commit
    Ignored,
    /// Ready-to-save without a content URL
    MissingUrl,
    /// Document id did not resolve
    UnknownDocument,
    /// Content fetch failed (scheme, timeout, network, size, status)
    FetchFailed,
    /// Storage write or version update failed; document left as-is
    CommitFailed,
    /// Content replaced and version advanced
    Committed { version: u64 },
}

/// Save-back service
pub struct CallbackService {
    documents: Arc<dyn DocumentRepository>,
    storage: Arc<dyn StorageBackend>,
    issuer: TokenIssuer,
    fetcher: ContentFetcher,
    locks: DocumentLocks,
}

impl CallbackService {
    pub fn new(
        documents: Arc<dyn DocumentRepository>,
        storage: Arc<dyn StorageBackend>,
        issuer: TokenIssuer,
        fetcher: ContentFetcher,
    ) -> Self {
        Self {
            documents,
            storage,
            issuer,
            fetcher,
            locks: DocumentLocks::new(),
        }
    }

    /// Verify the engine's bearer credential.
    ///
    /// Runs before anything else on the callback path: a request that
    /// cannot prove it came from the engine is rejected outright, with
    /// no mutation and no acknowledgment.
    pub fn verify_engine_credential(&self, bearer: Option<&str>) -> TokenResult<()> {
        let token = bearer.ok_or(TokenError::Malformed)?;
        self.issuer.verify_engine(token)
    }

    /// Apply one save notification.
    ///
    /// Infallible by contract: every internal error is logged and folded
    /// into the returned outcome, and the caller acknowledges regardless.
    pub async fn handle_save(
        &self,
        document_id: &str,
        notification: &SaveNotification,
    ) -> CallbackOutcome {
        let status = SaveStatus::from_code(notification.status);
        let status_label = format!("{:?}", status);

        if !status.is_ready_to_save() {
            Logger::info(
                "CALLBACK_IGNORED",
                &[("doc_id", document_id), ("status", &status_label)],
            );
            return CallbackOutcome::Ignored;
        }

        let url = match notification.url.as_deref() {
            Some(url) => url,
            None => {
                Logger::warn("CALLBACK_MISSING_URL", &[("doc_id", document_id)]);
                return CallbackOutcome::MissingUrl;
            }
        };

        // Resolve before fetching; an unknown id costs no network round trip
        match self.documents.find_by_id(document_id) {
            Ok(Some(_)) => {}
            Ok(None) => {
                Logger::warn("CALLBACK_UNKNOWN_DOCUMENT", &[("doc_id", document_id)]);
                return CallbackOutcome::UnknownDocument;
            }
            Err(e) => {
                let error = e.to_string();
                Logger::error(
                    "CALLBACK_LOOKUP_FAILED",
                    &[("doc_id", document_id), ("error", &error)],
                );
                return CallbackOutcome::UnknownDocument;
            }
        }

        let bytes = match self.fetcher.fetch(url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                let error = e.to_string();
                Logger::warn(
                    "CALLBACK_FETCH_FAILED",
                    &[("doc_id", document_id), ("error", &error)],
                );
                return CallbackOutcome::FetchFailed;
            }
        };

        self.commit(document_id, &bytes).await
    }

    /// Commit fetched content under the per-document lock: replace the
    /// file atomically, then advance the version counter.
    async fn commit(&self, document_id: &str, bytes: &[u8]) -> CallbackOutcome {
        let lock = self.locks.for_document(document_id);
        let _guard = lock.lock().await;

        // Re-read inside the lock so concurrent commits never lose a bump
        let document = match self.documents.find_by_id(document_id) {
            Ok(Some(document)) => document,
            Ok(None) => {
                Logger::warn("CALLBACK_UNKNOWN_DOCUMENT", &[("doc_id", document_id)]);
                return CallbackOutcome::UnknownDocument;
            }
            Err(e) => {
                let error = e.to_string();
                Logger::error(
                    "CALLBACK_LOOKUP_FAILED",
                    &[("doc_id", document_id), ("error", &error)],
                );
                return CallbackOutcome::UnknownDocument;
            }
        };

        if let Err(e) = self.storage.write_atomic(&document.storage_path, bytes) {
            let error = e.to_string();
            Logger::error(
                "CALLBACK_COMMIT_FAILED",
                &[("doc_id", document_id), ("error", &error)],
            );
            return CallbackOutcome::CommitFailed;
        }

        let mut updated = document;
        updated.version += 1;
        match self.documents.update(&updated) {
            Ok(()) => {
                let version = updated.version.to_string();
                let size = bytes.len().to_string();
                Logger::info(
                    "CALLBACK_COMMITTED",
                    &[
                        ("bytes", &size),
                        ("doc_id", document_id),
                        ("version", &version),
                    ],
                );
                CallbackOutcome::Committed {
                    version: updated.version,
                }
            }
            Err(e) => {
                // Content is already on disk; only the counter failed
                let error = e.to_string();
                Logger::error(
                    "CALLBACK_VERSION_UPDATE_FAILED",
                    &[("doc_id", document_id), ("error", &error)],
                );
                CallbackOutcome::CommitFailed
            }
        }
    }
}
