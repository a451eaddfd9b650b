//! API key listing endpoint

use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::Json;
use crate::domain::ApiKey;

/// API key as exposed to clients; the secret hash is never included
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyResponse {
    pub id: String,
    pub name: String,
    pub key_prefix: String,
    pub status: String,
    pub created_at: String,
    pub last_used_at: Option<String>,
}

impl From<&ApiKey> for ApiKeyResponse {
    fn from(key: &ApiKey) -> Self {
        Self {
            id: key.id().to_string(),
            name: key.name().to_string(),
            key_prefix: key.key_prefix().to_string(),
            status: key.status().as_str().to_string(),
            created_at: key.created_at().to_rfc3339(),
            last_used_at: key.last_used_at().map(|t| t.to_rfc3339()),
        }
    }
}

/// GET /claude/api-keys
pub async fn list_api_keys(State(state): State<AppState>) -> Json<Vec<ApiKeyResponse>> {
    let keys = state.workspace_service.api_keys().await;

    debug!(count = keys.len(), "Listing API keys");

    Json(keys.iter().map(ApiKeyResponse::from).collect())
}
