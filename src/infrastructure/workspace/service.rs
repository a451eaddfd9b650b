//! Workspace service - projects, features and their mutations

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{
    ApiKey, DomainError, Feature, FeatureId, FeatureStatus, Project, ProjectContext, ProjectId,
    Storage, Workspace,
};
use crate::infrastructure::api_key::ApiKeyService;

/// Service owning all state of one workspace
#[derive(Debug, Clone)]
pub struct WorkspaceService {
    workspace: Workspace,
    projects: Arc<dyn Storage<Project>>,
    features: Arc<dyn Storage<Feature>>,
    api_keys: ApiKeyService,
}

impl WorkspaceService {
    pub fn new(
        workspace: Workspace,
        projects: Arc<dyn Storage<Project>>,
        features: Arc<dyn Storage<Feature>>,
        api_keys: ApiKeyService,
    ) -> Self {
        Self {
            workspace,
            projects,
            features,
            api_keys,
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn api_key_service(&self) -> &ApiKeyService {
        &self.api_keys
    }

    /// List the workspace's projects, oldest first
    pub async fn list_projects(&self) -> Result<Vec<Project>, DomainError> {
        let mut projects: Vec<Project> = self
            .projects
            .list()
            .await?
            .into_iter()
            .filter(|p| p.workspace_id() == &self.workspace.id)
            .collect();

        projects.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().as_str().cmp(b.id().as_str()))
        });

        Ok(projects)
    }

    /// Build the full feature context of a project
    pub async fn project_context(&self, project_id: &str) -> Result<ProjectContext, DomainError> {
        debug!(project_id = %project_id, "Building project context");

        let project = self.get_project_required(project_id).await?;

        let mut features: Vec<Feature> = self
            .features
            .list()
            .await?
            .into_iter()
            .filter(|f| f.project_id() == project.id())
            .collect();

        features.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().as_str().cmp(b.id().as_str()))
        });

        Ok(ProjectContext::new(
            self.workspace.id.clone(),
            project,
            features,
        ))
    }

    /// Set a feature's status; `status` must be one of the known status names
    pub async fn update_feature_status(
        &self,
        feature_id: &str,
        status: &str,
    ) -> Result<Feature, DomainError> {
        let feature = self.get_feature_required(feature_id).await?;
        let status: FeatureStatus = status.parse()?;

        info!(feature_id = %feature.id(), from = %feature.status(), to = %status, "Updating feature status");

        self.features
            .modify(feature.id(), Box::new(move |f: &mut Feature| f.set_status(status)))
            .await
    }

    /// Replace a feature's annotations; any text, including empty, is accepted
    pub async fn update_feature_annotations(
        &self,
        feature_id: &str,
        annotations: &str,
    ) -> Result<Feature, DomainError> {
        let feature = self.get_feature_required(feature_id).await?;

        info!(feature_id = %feature.id(), length = annotations.len(), "Updating feature annotations");

        let annotations = annotations.to_string();
        self.features
            .modify(feature.id(), Box::new(move |f: &mut Feature| f.set_annotations(annotations)))
            .await
    }

    /// List the workspace's API keys
    pub async fn list_api_keys(&self) -> Result<Vec<ApiKey>, DomainError> {
        self.api_keys.list().await
    }

    /// Add a project to the workspace
    pub async fn add_project(&self, project: Project) -> Result<Project, DomainError> {
        if project.workspace_id() != &self.workspace.id {
            return Err(DomainError::validation(format!(
                "Project '{}' belongs to workspace '{}', not '{}'",
                project.id(),
                project.workspace_id(),
                self.workspace.id
            )));
        }

        self.projects.create(project).await
    }

    /// Add a feature to one of the workspace's projects
    pub async fn add_feature(&self, feature: Feature) -> Result<Feature, DomainError> {
        self.get_project_required(feature.project_id().as_str())
            .await?;

        self.features.create(feature).await
    }

    async fn get_project_required(&self, project_id: &str) -> Result<Project, DomainError> {
        let id = ProjectId::new(project_id)?;

        self.projects
            .get(&id)
            .await?
            .filter(|p| p.workspace_id() == &self.workspace.id)
            .ok_or_else(|| DomainError::not_found(format!("Project '{}' not found", id)))
    }

    async fn get_feature_required(&self, feature_id: &str) -> Result<Feature, DomainError> {
        let id = FeatureId::new(feature_id)?;
        let not_found = || DomainError::not_found(format!("Feature '{}' not found", id));

        let feature = self.features.get(&id).await?.ok_or_else(not_found)?;

        // Features of projects outside this workspace are invisible
        let project = self.projects.get(feature.project_id()).await?;
        match project {
            Some(p) if p.workspace_id() == &self.workspace.id => Ok(feature),
            _ => Err(not_found()),
        }
    }
}
