//! API Key entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::validation::{validate_id, IdValidationError};
use crate::domain::workspace::WorkspaceId;

/// API Key identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiKeyId(String);

impl ApiKeyId {
    /// Create a new ApiKeyId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, IdValidationError> {
        let id = id.into();
        validate_id("API key", &id)?;
        Ok(Self(id))
    }

    /// Generate a random identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ApiKeyId {
    type Error = IdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ApiKeyId> for String {
    fn from(id: ApiKeyId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ApiKeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for ApiKeyId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

impl StorageEntity for ApiKey {
    type Key = ApiKeyId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

/// Status of an API key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApiKeyStatus {
    /// Key is active and can be used
    #[default]
    Active,
    /// Key has been revoked and cannot be used
    Revoked,
}

impl ApiKeyStatus {
    /// Check if the key is usable
    pub fn is_usable(&self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Revoked => "revoked",
        }
    }
}

/// API Key entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    id: ApiKeyId,
    /// Workspace the key grants access to
    workspace_id: WorkspaceId,
    /// Display name for the key
    name: String,
    /// Hashed key, format `sha256$<base64url digest>`.
    /// Never exposed in API responses (see `ApiKeyResponse`).
    secret_hash: String,
    /// Lookup prefix (first characters of the key)
    key_prefix: String,
    status: ApiKeyStatus,
    created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_used_at: Option<DateTime<Utc>>,
}

impl ApiKey {
    /// Create a new active API key
    pub fn new(
        id: ApiKeyId,
        workspace_id: WorkspaceId,
        name: impl Into<String>,
        secret_hash: impl Into<String>,
        key_prefix: impl Into<String>,
    ) -> Self {
        Self {
            id,
            workspace_id,
            name: name.into(),
            secret_hash: secret_hash.into(),
            key_prefix: key_prefix.into(),
            status: ApiKeyStatus::Active,
            created_at: Utc::now(),
            last_used_at: None,
        }
    }

    // Getters

    pub fn id(&self) -> &ApiKeyId {
        &self.id
    }

    pub fn workspace_id(&self) -> &WorkspaceId {
        &self.workspace_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn secret_hash(&self) -> &str {
        &self.secret_hash
    }

    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    pub fn status(&self) -> ApiKeyStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_used_at(&self) -> Option<DateTime<Utc>> {
        self.last_used_at
    }

    /// Check if the key is currently usable
    pub fn is_valid(&self) -> bool {
        self.status.is_usable()
    }

    // Mutations

    pub fn revoke(&mut self) {
        self.status = ApiKeyStatus::Revoked;
    }

    pub fn record_usage(&mut self) {
        self.last_used_at = Some(Utc::now());
    }
}
