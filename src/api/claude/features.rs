//! Feature mutation endpoints

use axum::extract::{Extension, Path, State};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{ApiKey, Feature};

/// Request body for a status change; the value is checked by the service
///
/// A missing or `null` status is forwarded as the empty string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status: String,
}

/// Request body replacing a feature's annotations
///
/// A missing or `null` value clears the annotations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAnnotationsRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub annotations: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// POST /claude/features/{feature_id}/status
pub async fn update_feature_status(
    State(state): State<AppState>,
    Extension(api_key): Extension<ApiKey>,
    Path(feature_id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Feature>, ApiError> {
    info!(
        feature_id = %feature_id,
        status = %request.status,
        api_key_id = %api_key.id(),
        "Updating feature status"
    );

    let feature = state
        .workspace_service
        .update_feature_status(&feature_id, &request.status)
        .await?;

    Ok(Json(feature))
}

/// POST /claude/features/{feature_id}/annotations
pub async fn update_feature_annotations(
    State(state): State<AppState>,
    Extension(api_key): Extension<ApiKey>,
    Path(feature_id): Path<String>,
    Json(request): Json<UpdateAnnotationsRequest>,
) -> Result<Json<Feature>, ApiError> {
    info!(
        feature_id = %feature_id,
        length = request.annotations.len(),
        api_key_id = %api_key.id(),
        "Updating feature annotations"
    );

    let feature = state
        .workspace_service
        .update_feature_annotations(&feature_id, &request.annotations)
        .await?;

    Ok(Json(feature))
}
