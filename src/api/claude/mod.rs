//! Endpoints used by the Claude automation client
//!
//! Every route in this group requires an API key.

pub mod api_keys;
pub mod features;
pub mod projects;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use super::middleware::require_api_key;
use super::state::AppState;

pub use api_keys::ApiKeyResponse;
pub use features::{UpdateAnnotationsRequest, UpdateStatusRequest};
pub use projects::{ProjectSummary, ProjectsResponse};

/// Create the Claude API router, authenticated as a whole
pub fn create_claude_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/projects", get(projects::list_projects))
        .route(
            "/projects/{project_id}/features",
            get(projects::get_project_features),
        )
        .route(
            "/features/{feature_id}/status",
            post(features::update_feature_status),
        )
        .route(
            "/features/{feature_id}/annotations",
            post(features::update_feature_annotations),
        )
        .route("/api-keys", get(api_keys::list_api_keys))
        .route_layer(middleware::from_fn_with_state(state, require_api_key))
}
