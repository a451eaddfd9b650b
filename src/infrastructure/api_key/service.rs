//! API Key service
//!
//! Provides high-level operations for the keys of one workspace.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{ApiKey, ApiKeyId, DomainError, Storage, WorkspaceId};

use super::generator::{ApiKeyGenerator, MIN_KEY_LENGTH};

/// API Key service scoped to a single workspace
#[derive(Debug, Clone)]
pub struct ApiKeyService {
    storage: Arc<dyn Storage<ApiKey>>,
    workspace_id: WorkspaceId,
}

impl ApiKeyService {
    pub fn new(storage: Arc<dyn Storage<ApiKey>>, workspace_id: WorkspaceId) -> Self {
        Self {
            storage,
            workspace_id,
        }
    }

    /// Register an API key whose full value is already known (bootstrap and seeded keys)
    pub async fn create_with_key(
        &self,
        id: ApiKeyId,
        name: impl Into<String>,
        key: &str,
    ) -> Result<ApiKey, DomainError> {
        let name = name.into();
        info!(id = %id, name = %name, "Creating API key");

        let stored = ApiKeyGenerator::from_key(key).ok_or_else(|| {
            DomainError::validation(format!(
                "API key '{}' must be at least {} characters long",
                id, MIN_KEY_LENGTH
            ))
        })?;

        let existing = self.storage.list().await?;
        if existing.iter().any(|k| k.key_prefix() == stored.prefix) {
            return Err(DomainError::conflict(format!(
                "An API key with the same prefix as '{}' already exists",
                id
            )));
        }

        let api_key = ApiKey::new(
            id,
            self.workspace_id.clone(),
            name,
            stored.hash,
            stored.prefix,
        );

        self.storage.create(api_key).await
    }

    /// Validate a presented key
    ///
    /// Returns `Ok(None)` for malformed, unknown, revoked or foreign-workspace keys.
    pub async fn validate(&self, key_secret: &str) -> Result<Option<ApiKey>, DomainError> {
        let Some(prefix) = ApiKeyGenerator::lookup_prefix(key_secret) else {
            debug!("API key rejected: malformed");
            return Ok(None);
        };

        let candidate = self
            .storage
            .list()
            .await?
            .into_iter()
            .find(|k| k.key_prefix() == prefix);

        let Some(key) = candidate else {
            debug!(prefix = %prefix, "API key rejected: unknown prefix");
            return Ok(None);
        };

        if !ApiKeyGenerator::verify_key(key_secret, key.secret_hash()) {
            debug!("API key hash verification failed");
            return Ok(None);
        }

        if !key.is_valid() {
            debug!(status = ?key.status(), "API key is not valid");
            return Ok(None);
        }

        if key.workspace_id() != &self.workspace_id {
            debug!(workspace = %key.workspace_id(), "API key belongs to another workspace");
            return Ok(None);
        }

        // Only the usage timestamp is written; a concurrent revocation stays in place
        let recorded = self
            .storage
            .modify(key.id(), Box::new(|k: &mut ApiKey| k.record_usage()))
            .await;

        match recorded {
            Ok(key) if key.is_valid() => Ok(Some(key)),
            Ok(key) => {
                debug!(status = ?key.status(), "API key was revoked during validation");
                Ok(None)
            }
            Err(e) => {
                warn!("Failed to record API key usage: {}", e);
                Ok(Some(key))
            }
        }
    }

    /// List the workspace's keys, oldest first
    pub async fn list(&self) -> Result<Vec<ApiKey>, DomainError> {
        let mut keys: Vec<ApiKey> = self
            .storage
            .list()
            .await?
            .into_iter()
            .filter(|k| k.workspace_id() == &self.workspace_id)
            .collect();

        keys.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().as_str().cmp(b.id().as_str()))
        });

        Ok(keys)
    }
}
