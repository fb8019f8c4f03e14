//! Gateway Invariant Tests
//!
//! End-to-end checks over the session-opening surface, wired the way the
//! CLI boots it: real repositories, real storage, real token issuer.
//!
//! Test Categories:
//! 1. Edit session key freshness (cache busting)
//! 2. Authorization matrix (401 vs 403 vs 404)
//! 3. Link token hardening (expiry, forgery, path binding)
//! 4. Read paths never mutate the catalog

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::Algorithm;
use tempfile::TempDir;

use docbridge::auth::crypto::hash_password;
use docbridge::auth::{Authenticator, InMemoryUserRepository, User, UserRepository};
use docbridge::catalog::{
    Document, DocumentRepository, InMemoryDocumentRepository, InMemoryProjectRepository, Project,
    ProjectRepository,
};
use docbridge::gateway::{GatewayError, GatewayService};
use docbridge::storage::{LocalBackend, StorageError};
use docbridge::token::TokenIssuer;

const SECRET: &str = "invariant_suite_secret";

struct Gateway {
    service: GatewayService,
    authenticator: Arc<Authenticator>,
    documents: Arc<InMemoryDocumentRepository>,
    _temp_dir: TempDir,
}

/// One project ("abc", member: alice) with one document backed by a real
/// file, plus an outsider account (mallory).
fn build_gateway(verify_link_tokens: bool) -> Gateway {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("abc.docx"), b"docx bytes").unwrap();

    let users = InMemoryUserRepository::new();
    users
        .create(&User::new("alice", "Alice", hash_password("pw-alice").unwrap()))
        .unwrap();
    users
        .create(&User::new(
            "mallory",
            "Mallory",
            hash_password("pw-mallory").unwrap(),
        ))
        .unwrap();
    let authenticator = Arc::new(Authenticator::new(Arc::new(users), Duration::hours(8)));

    let projects = Arc::new(InMemoryProjectRepository::new());
    projects
        .create(&Project {
            id: "abc".to_string(),
            name: "Project ABC".to_string(),
            allowed_users: vec!["alice".to_string()],
        })
        .unwrap();

    let documents = Arc::new(InMemoryDocumentRepository::new());
    documents
        .create(&Document {
            id: "doc-abc".to_string(),
            project_id: "abc".to_string(),
            storage_path: "abc.docx".to_string(),
            version: 1,
        })
        .unwrap();

    let storage = Arc::new(LocalBackend::new(temp_dir.path().to_path_buf()));
    let issuer = TokenIssuer::new(SECRET, Algorithm::HS256, Duration::minutes(30));

    let service = GatewayService::new(
        authenticator.clone(),
        projects,
        documents.clone(),
        storage,
        issuer,
        "http://localhost:5001",
        verify_link_tokens,
    );

    Gateway {
        service,
        authenticator,
        documents,
        _temp_dir: temp_dir,
    }
}

// =============================================================================
// 1. EDIT SESSION KEY FRESHNESS
// =============================================================================

/// Test: Every session open yields a distinct key, even for the same
/// document in rapid succession. The editing engine caches content by
/// this key, so a repeat would serve stale bytes.
#[test]
fn test_session_keys_never_repeat() {
    let gw = build_gateway(true);
    let token = gw.authenticator.login("alice", "pw-alice").unwrap();

    let mut seen = HashSet::new();
    for _ in 0..100 {
        let config = gw.service.open_session("abc", Some(&token)).unwrap();
        assert!(
            seen.insert(config.document.key.clone()),
            "duplicate session key: {}",
            config.document.key
        );
    }
}

/// Test: Session keys are the document id plus a dash and a UUID, so the
/// engine-side cache partitions by document.
#[test]
fn test_session_key_shape() {
    let gw = build_gateway(true);
    let token = gw.authenticator.login("alice", "pw-alice").unwrap();

    let config = gw.service.open_session("abc", Some(&token)).unwrap();
    let key = &config.document.key;

    assert!(key.starts_with("doc-abc-"));
    let suffix = &key["doc-abc-".len()..];
    assert_eq!(suffix.len(), 36);
    assert!(uuid::Uuid::parse_str(suffix).is_ok());
}

// =============================================================================
// 2. AUTHORIZATION MATRIX
// =============================================================================

/// Test: Anonymous and garbage principals read as 401 on every
/// operation; an authenticated non-member reads as 403. The two must
/// stay distinguishable for the host app's session-refresh logic.
#[test]
fn test_authentication_versus_authorization() {
    let gw = build_gateway(false);
    let mallory = gw.authenticator.login("mallory", "pw-mallory").unwrap();

    // 401: no principal at all
    assert_eq!(gw.service.list_projects(None).unwrap_err().status_code(), 401);
    assert_eq!(
        gw.service.open_session("abc", None).unwrap_err().status_code(),
        401
    );
    assert_eq!(
        gw.service
            .fetch_document("doc-abc", None, None)
            .unwrap_err()
            .status_code(),
        401
    );

    // 401: principal token that was never issued
    assert_eq!(
        gw.service
            .open_session("abc", Some("fabricated"))
            .unwrap_err()
            .status_code(),
        401
    );

    // 403: real principal, not a member
    assert_eq!(
        gw.service
            .open_session("abc", Some(&mallory))
            .unwrap_err()
            .status_code(),
        403
    );
    assert_eq!(
        gw.service
            .fetch_document("doc-abc", Some(&mallory), None)
            .unwrap_err()
            .status_code(),
        403
    );
}

/// Test: An unknown project id is indistinguishable from a membership
/// miss (403, not 404), so probing cannot enumerate projects.
#[test]
fn test_unknown_project_not_enumerable() {
    let gw = build_gateway(true);
    let token = gw.authenticator.login("alice", "pw-alice").unwrap();

    let absent = gw.service.open_session("ghost", Some(&token)).unwrap_err();
    let denied = {
        let mallory = gw.authenticator.login("mallory", "pw-mallory").unwrap();
        gw.service.open_session("abc", Some(&mallory)).unwrap_err()
    };
    assert_eq!(absent.status_code(), 403);
    assert_eq!(absent.status_code(), denied.status_code());
}

/// Test: A missing document is a plain 404 for a member.
#[test]
fn test_unknown_document_is_not_found() {
    let gw = build_gateway(false);
    let token = gw.authenticator.login("alice", "pw-alice").unwrap();

    let err = gw
        .service
        .fetch_document("no-such-doc", Some(&token), None)
        .unwrap_err();
    assert_eq!(err.status_code(), 404);
}

/// Test: A document that exists in the catalog but has lost its backing
/// file still reads as 404 for a member, surfaced as the storage miss.
#[test]
fn test_missing_backing_file_is_not_found() {
    let gw = build_gateway(false);
    gw.documents
        .create(&Document {
            id: "doc-hollow".to_string(),
            project_id: "abc".to_string(),
            storage_path: "hollow.docx".to_string(),
            version: 1,
        })
        .unwrap();

    let token = gw.authenticator.login("alice", "pw-alice").unwrap();
    let err = gw
        .service
        .fetch_document("doc-hollow", Some(&token), None)
        .unwrap_err();

    assert!(matches!(
        err,
        GatewayError::Storage(StorageError::ObjectNotFound(_))
    ));
    assert_eq!(err.status_code(), 404);
}

// =============================================================================
// 3. LINK TOKEN HARDENING
// =============================================================================

/// Test: A link token that has already expired is rejected with no
/// leeway. The issuer stamps the window; verification trusts only the
/// clock.
#[test]
fn test_expired_link_token_rejected() {
    let gw = build_gateway(true);
    let token = gw.authenticator.login("alice", "pw-alice").unwrap();

    // Same secret, negative lifetime: expired the moment it is minted
    let stale_issuer = TokenIssuer::new(SECRET, Algorithm::HS256, Duration::seconds(-60));
    let expired = stale_issuer.mint_link("abc.docx").unwrap();

    let err = gw
        .service
        .fetch_document("doc-abc", Some(&token), Some(&expired))
        .unwrap_err();
    assert_eq!(err.status_code(), 403);
}

/// Test: A link token signed with a different secret never passes, even
/// with correct claims.
#[test]
fn test_foreign_secret_link_token_rejected() {
    let gw = build_gateway(true);
    let token = gw.authenticator.login("alice", "pw-alice").unwrap();

    let forger = TokenIssuer::new("not_the_secret", Algorithm::HS256, Duration::minutes(30));
    let forged = forger.mint_link("abc.docx").unwrap();

    let err = gw
        .service
        .fetch_document("doc-abc", Some(&token), Some(&forged))
        .unwrap_err();
    assert_eq!(err.status_code(), 403);
}

/// Test: A genuine link token authorizes exactly the path it was minted
/// for. Replaying it against another document's download fails closed.
#[test]
fn test_link_token_bound_to_storage_path() {
    let gw = build_gateway(true);
    std::fs::write(gw._temp_dir.path().join("xyz.docx"), b"other").unwrap();
    gw.documents
        .create(&Document {
            id: "doc-xyz".to_string(),
            project_id: "abc".to_string(),
            storage_path: "xyz.docx".to_string(),
            version: 1,
        })
        .unwrap();

    let token = gw.authenticator.login("alice", "pw-alice").unwrap();
    let config = gw.service.open_session("abc", Some(&token)).unwrap();

    // Pull the jwt minted for doc-abc out of the download URL
    let jwt = config
        .document
        .url
        .split("jwt=")
        .nth(1)
        .expect("download url carries a jwt");

    // It opens doc-abc ...
    gw.service
        .fetch_document("doc-abc", Some(&token), Some(jwt))
        .unwrap();

    // ... and nothing else
    let err = gw
        .service
        .fetch_document("doc-xyz", Some(&token), Some(jwt))
        .unwrap_err();
    assert_eq!(err.status_code(), 403);
}

// =============================================================================
// 4. READ PATHS NEVER MUTATE
// =============================================================================

/// Test: Opening sessions and downloading content leave the document's
/// version untouched. Only a committed save may move it.
#[test]
fn test_reads_leave_version_alone() {
    let gw = build_gateway(true);
    let token = gw.authenticator.login("alice", "pw-alice").unwrap();

    for _ in 0..3 {
        let config = gw.service.open_session("abc", Some(&token)).unwrap();
        let jwt = config.document.url.split("jwt=").nth(1).unwrap();
        gw.service
            .fetch_document("doc-abc", Some(&token), Some(jwt))
            .unwrap();
    }

    let doc = gw.documents.find_by_id("doc-abc").unwrap().unwrap();
    assert_eq!(doc.version, 1);
}
