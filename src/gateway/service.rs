//! Session gateway service
//!
//! The host-app facing read path: list projects, open an editing session
//! (assemble the signed editor configuration), and serve document bytes
//! to the engine. The three operations share one authorization rule: the
//! principal must be a member of the project owning the document.

use std::sync::Arc;

use serde::Serialize;

use crate::auth::{AuthError, Authenticator};
use crate::catalog::{CatalogError, DocumentRepository, ProjectRepository};
use crate::observability::Logger;
use crate::storage::StorageBackend;
use crate::token::TokenIssuer;

use super::editor_config::{DocumentSection, EditorConfig, EditorSection, UserSection};
use super::errors::GatewayResult;
use super::session_key::EditSessionKey;

/// Engine-facing constants for docx editing sessions
const DOCUMENT_TYPE: &str = "word";
const SESSION_TYPE: &str = "desktop";
const FILE_TYPE: &str = "docx";
const LANG: &str = "en";
const MODE: &str = "edit";

/// Content type served for document downloads
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Summary row for the project listing
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    pub project_id: String,
    pub project_name: String,
}

/// A document payload ready to be served to the engine
#[derive(Debug)]
pub struct DocumentDownload {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub content_type: &'static str,
}

/// Gateway over the catalog, storage and token subsystems
pub struct GatewayService {
    authenticator: Arc<Authenticator>,
    projects: Arc<dyn ProjectRepository>,
    documents: Arc<dyn DocumentRepository>,
    storage: Arc<dyn StorageBackend>,
    issuer: TokenIssuer,
    public_base_url: String,
    verify_link_tokens: bool,
}

impl GatewayService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        authenticator: Arc<Authenticator>,
        projects: Arc<dyn ProjectRepository>,
        documents: Arc<dyn DocumentRepository>,
        storage: Arc<dyn StorageBackend>,
        issuer: TokenIssuer,
        public_base_url: &str,
        verify_link_tokens: bool,
    ) -> Self {
        Self {
            authenticator,
            projects,
            documents,
            storage,
            issuer,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            verify_link_tokens,
        }
    }

    /// List the projects the principal is a member of.
    pub fn list_projects(&self, principal_token: Option<&str>) -> GatewayResult<Vec<ProjectSummary>> {
        let token = principal_token.ok_or(AuthError::NotAuthenticated)?;
        let user = self.authenticator.authenticate(token)?;

        let projects = self.projects.list_for_user(&user.id)?;
        Ok(projects
            .into_iter()
            .map(|p| ProjectSummary {
                project_id: p.id,
                project_name: p.name,
            })
            .collect())
    }

    /// Open an editing session for a project's document.
    ///
    /// Generates a fresh edit session key, mints the link and descriptor
    /// tokens, and assembles the configuration the engine consumes. An
    /// unknown project and a membership miss look identical to the
    /// caller.
    pub fn open_session(
        &self,
        project_id: &str,
        principal_token: Option<&str>,
    ) -> GatewayResult<EditorConfig> {
        let token = principal_token.ok_or(AuthError::NotAuthenticated)?;
        let user = self.authenticator.authenticate(token)?;

        let project = self
            .projects
            .find_by_id(project_id)?
            .ok_or(AuthError::Forbidden)?;
        if !project.is_member(&user.id) {
            return Err(AuthError::Forbidden.into());
        }

        let document = self
            .documents
            .find_by_project(project_id)?
            .ok_or_else(|| CatalogError::DocumentNotFound(project_id.to_string()))?;

        // Fresh on every call, including rapid repeats for one document
        let session_key = EditSessionKey::generate(&document.id);

        let link_token = self.issuer.mint_link(&document.storage_path)?;
        let descriptor = self
            .issuer
            .mint_descriptor(FILE_TYPE, session_key.as_str())?;

        let download_url = format!(
            "{}/docs/{}/download?token={}&jwt={}",
            self.public_base_url, document.id, token, link_token
        );
        let callback_url = format!(
            "{}/onlyoffice/callback?docId={}",
            self.public_base_url, document.id
        );

        Logger::info(
            "SESSION_OPENED",
            &[
                ("doc_id", document.id.as_str()),
                ("key", session_key.as_str()),
                ("user", user.id.as_str()),
            ],
        );

        Ok(EditorConfig {
            document_type: DOCUMENT_TYPE.to_string(),
            session_type: SESSION_TYPE.to_string(),
            document: DocumentSection {
                file_type: FILE_TYPE.to_string(),
                key: session_key.as_str().to_string(),
                title: format!("{}.docx", project.name),
                url: download_url,
            },
            editor_config: EditorSection {
                callback_url,
                lang: LANG.to_string(),
                mode: MODE.to_string(),
                user: UserSection {
                    id: user.id,
                    name: user.display_name,
                },
            },
            token: descriptor,
        })
    }

    /// Serve document bytes for download.
    ///
    /// Re-applies the session-open authorization rule, then checks the
    /// link token (when enabled) before any byte is read.
    pub fn fetch_document(
        &self,
        doc_id: &str,
        principal_token: Option<&str>,
        link_token: Option<&str>,
    ) -> GatewayResult<DocumentDownload> {
        let token = principal_token.ok_or(AuthError::NotAuthenticated)?;
        let user = self.authenticator.authenticate(token)?;

        let document = self
            .documents
            .find_by_id(doc_id)?
            .ok_or_else(|| CatalogError::DocumentNotFound(doc_id.to_string()))?;

        let project = self
            .projects
            .find_by_id(&document.project_id)?
            .ok_or(AuthError::Forbidden)?;
        if !project.is_member(&user.id) {
            return Err(AuthError::Forbidden.into());
        }

        if self.verify_link_tokens {
            let link = link_token.ok_or(AuthError::Forbidden)?;
            let claims = self.issuer.verify_link(link)?;
            // A valid token minted for a different file must not pass
            if claims.file_path != document.storage_path {
                return Err(AuthError::Forbidden.into());
            }
        }

        let bytes = self.storage.read(&document.storage_path)?;
        Ok(DocumentDownload {
            bytes,
            file_name: format!("{}.docx", project.name),
            content_type: DOCX_CONTENT_TYPE,
        })
    }
}
