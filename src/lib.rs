//! Workspace Agent API
//!
//! Exposes a workspace's projects, features and API keys to the Claude
//! automation client:
//! - Project listing and per-project feature context
//! - Feature status and annotation updates
//! - API-key authentication for every client endpoint
//! - In-memory state, optionally seeded from a TOML file

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use api::state::AppState;
use domain::{ApiKey, ApiKeyId, Feature, Project, Workspace, WorkspaceId};
use infrastructure::{
    api_key::ApiKeyService,
    storage::InMemoryStorage,
    workspace::{SeedFile, WorkspaceService},
};

/// Name and id of the key registered from `auth.bootstrap_key`
pub const BOOTSTRAP_KEY_ID: &str = "bootstrap";

/// Create application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create application state from configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let workspace_service = create_workspace_service(config).await?;
    let api_key_service = Arc::new(workspace_service.api_key_service().clone());

    Ok(AppState::new(Arc::new(workspace_service), api_key_service))
}

/// Build the workspace service: empty in-memory stores, then seed file and bootstrap key
pub async fn create_workspace_service(config: &AppConfig) -> anyhow::Result<WorkspaceService> {
    let workspace_id = WorkspaceId::new(&config.workspace.id)
        .with_context(|| format!("Invalid workspace id '{}'", config.workspace.id))?;
    let workspace = Workspace::new(workspace_id.clone(), &config.workspace.name);

    info!(workspace_id = %workspace.id, "Using in-memory storage for entities");

    let projects = Arc::new(InMemoryStorage::<Project>::new());
    let features = Arc::new(InMemoryStorage::<Feature>::new());
    let api_keys = Arc::new(InMemoryStorage::<ApiKey>::new());

    let api_key_service = ApiKeyService::new(api_keys, workspace_id);
    let service = WorkspaceService::new(workspace, projects, features, api_key_service);

    if let Some(path) = &config.seed.path {
        info!(path = %path, "Loading seed file");
        SeedFile::load(path)?.apply(&service).await?;
    }

    if let Some(key) = &config.auth.bootstrap_key {
        register_bootstrap_key(&service, key).await?;
    }

    Ok(service)
}

async fn register_bootstrap_key(service: &WorkspaceService, key: &str) -> anyhow::Result<()> {
    let id = ApiKeyId::new(BOOTSTRAP_KEY_ID)?;
    let api_key = service
        .api_key_service()
        .create_with_key(id, BOOTSTRAP_KEY_ID, key.trim())
        .await
        .context("Failed to register bootstrap API key")?;

    info!(
        id = %api_key.id(),
        key_prefix = %api_key.key_prefix(),
        "Bootstrap API key registered"
    );
    Ok(())
}
