//! CLI command implementations
//!
//! `init` writes a starter configuration; `serve` performs the strict
//! boot sequence: load and validate config, build the storage root,
//! apply seed fixtures, assemble the subsystems, then hand everything to
//! the HTTP server. Any boot failure is fatal.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::json;

use crate::auth::{Authenticator, InMemoryUserRepository};
use crate::callback::{CallbackService, ContentFetcher};
use crate::catalog::{InMemoryDocumentRepository, InMemoryProjectRepository, SeedFile};
use crate::config::AppConfig;
use crate::gateway::GatewayService;
use crate::http::{AppState, HttpServer};
use crate::observability::Logger;
use crate::storage::LocalBackend;
use crate::token::TokenIssuer;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config } => serve(&config),
    }
}

/// Write a starter configuration file and create the storage root
///
/// The starter file carries every default and leaves `jwt_secret` and
/// `public_base_url` empty; `serve` refuses to boot until both are set.
pub fn init(config_path: &Path) -> CliResult<()> {
    if config_path.exists() {
        return Err(CliError::already_initialized());
    }

    let template = AppConfig::default();
    let content = serde_json::to_string_pretty(&template)?;
    fs::write(config_path, content)
        .map_err(|e| CliError::io_error(format!("Failed to write config: {}", e)))?;

    fs::create_dir_all(&template.storage_root).map_err(|e| {
        CliError::io_error(format!(
            "Failed to create storage root {:?}: {}",
            template.storage_root, e
        ))
    })?;

    write_response(json!({
        "initialized": true,
        "config": config_path.display().to_string(),
    }))?;

    Ok(())
}

/// Boot the gateway and serve until interrupted
pub fn serve(config_path: &Path) -> CliResult<()> {
    let config = AppConfig::load(config_path)?;

    let state = boot(&config)?;
    let server = HttpServer::new(&config, state);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Build every subsystem from the validated configuration
fn boot(config: &AppConfig) -> CliResult<Arc<AppState>> {
    let algorithm = config.algorithm()?;

    fs::create_dir_all(&config.storage_root).map_err(|e| {
        CliError::boot_failed(format!(
            "Failed to create storage root {:?}: {}",
            config.storage_root, e
        ))
    })?;

    let users = Arc::new(InMemoryUserRepository::new());
    let projects = Arc::new(InMemoryProjectRepository::new());
    let documents = Arc::new(InMemoryDocumentRepository::new());

    if let Some(seed_path) = &config.seed_path {
        let seed = SeedFile::load(seed_path)
            .map_err(|e| CliError::boot_failed(format!("Seed load failed: {}", e)))?;
        seed.apply(users.as_ref(), projects.as_ref(), documents.as_ref())
            .map_err(|e| CliError::boot_failed(format!("Seed apply failed: {}", e)))?;

        let counts = (
            seed.users.len().to_string(),
            seed.projects.len().to_string(),
            seed.documents.len().to_string(),
        );
        Logger::info(
            "SEED_APPLIED",
            &[
                ("documents", &counts.2),
                ("projects", &counts.1),
                ("users", &counts.0),
            ],
        );
    }

    let issuer = TokenIssuer::new(&config.jwt_secret, algorithm, config.token_ttl());
    let authenticator = Arc::new(Authenticator::new(
        users,
        config.principal_session_ttl(),
    ));
    let storage = Arc::new(LocalBackend::new(config.storage_root.clone()));

    let gateway = GatewayService::new(
        authenticator.clone(),
        projects,
        documents.clone(),
        storage.clone(),
        issuer.clone(),
        config.base_url(),
        config.verify_link_tokens,
    );

    let fetcher = ContentFetcher::new(config.save_fetch_timeout_secs, config.save_fetch_max_bytes)
        .map_err(|e| CliError::boot_failed(e.to_string()))?;
    let callback = CallbackService::new(documents, storage, issuer, fetcher);

    Ok(Arc::new(AppState {
        authenticator,
        gateway,
        callback,
    }))
}
