//! Project endpoints

use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{Project, ProjectContext};

/// Project as listed to the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: String,
    pub title: String,
    pub description: String,
}

impl From<&Project> for ProjectSummary {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id().to_string(),
            title: project.title().to_string(),
            description: project.description().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsResponse {
    pub workspace_id: String,
    pub projects: Vec<ProjectSummary>,
}

/// GET /claude/projects
pub async fn list_projects(State(state): State<AppState>) -> Json<ProjectsResponse> {
    let workspace = state.workspace_service.workspace().await;
    let projects = state.workspace_service.projects().await;

    debug!(workspace_id = %workspace.id, count = projects.len(), "Listing projects");

    Json(ProjectsResponse {
        workspace_id: workspace.id.to_string(),
        projects: projects.iter().map(ProjectSummary::from).collect(),
    })
}

/// GET /claude/projects/{project_id}/features
pub async fn get_project_features(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<Json<ProjectContext>, ApiError> {
    debug!(project_id = %project_id, "Getting project features");

    let context = state.workspace_service.project_context(&project_id).await?;

    Ok(Json(context))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProjectId, WorkspaceId};

    #[test]
    fn test_project_summary_from_project() {
        let project = Project::new(
            ProjectId::new("billing").unwrap(),
            WorkspaceId::new("acme").unwrap(),
            "Billing",
        )
        .with_description("Invoices and payments");

        let summary = ProjectSummary::from(&project);
        assert_eq!(summary.id, "billing");
        assert_eq!(summary.title, "Billing");
        assert_eq!(summary.description, "Invoices and payments");
    }

    #[test]
    fn test_projects_response_uses_camel_case() {
        let response = ProjectsResponse {
            workspace_id: "acme".to_string(),
            projects: vec![],
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["workspaceId"], "acme");
        assert!(json["projects"].as_array().unwrap().is_empty());
    }
}
