//! Application state for shared services

use std::sync::Arc;

use tracing::error;

use crate::domain::{ApiKey, DomainError, Feature, Project, ProjectContext, Workspace};
use crate::infrastructure::api_key::ApiKeyService;
use crate::infrastructure::workspace::WorkspaceService;

#[cfg(test)]
use mockall::automock;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub workspace_service: Arc<dyn WorkspaceServiceTrait>,
    pub api_key_service: Arc<dyn ApiKeyServiceTrait>,
}

impl AppState {
    pub fn new(
        workspace_service: Arc<dyn WorkspaceServiceTrait>,
        api_key_service: Arc<dyn ApiKeyServiceTrait>,
    ) -> Self {
        Self {
            workspace_service,
            api_key_service,
        }
    }
}

/// Everything the automation endpoints read and mutate
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait WorkspaceServiceTrait: Send + Sync {
    /// The workspace this service is bound to
    async fn workspace(&self) -> Workspace;
    /// All projects, in presentation order
    async fn projects(&self) -> Vec<Project>;
    async fn project_context(&self, project_id: &str) -> Result<ProjectContext, DomainError>;
    async fn update_feature_status(
        &self,
        feature_id: &str,
        status: &str,
    ) -> Result<Feature, DomainError>;
    async fn update_feature_annotations(
        &self,
        feature_id: &str,
        annotations: &str,
    ) -> Result<Feature, DomainError>;
    /// API keys of the current workspace
    async fn api_keys(&self) -> Vec<ApiKey>;
}

/// Credential check used by the authentication middleware
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ApiKeyServiceTrait: Send + Sync {
    async fn validate(&self, key: &str) -> Result<Option<ApiKey>, DomainError>;
}

// Implement traits for the actual services

#[async_trait::async_trait]
impl WorkspaceServiceTrait for WorkspaceService {
    async fn workspace(&self) -> Workspace {
        WorkspaceService::workspace(self).clone()
    }

    async fn projects(&self) -> Vec<Project> {
        WorkspaceService::list_projects(self)
            .await
            .unwrap_or_else(|e| {
                error!("Failed to list projects: {}", e);
                Vec::new()
            })
    }

    async fn project_context(&self, project_id: &str) -> Result<ProjectContext, DomainError> {
        WorkspaceService::project_context(self, project_id).await
    }

    async fn update_feature_status(
        &self,
        feature_id: &str,
        status: &str,
    ) -> Result<Feature, DomainError> {
        WorkspaceService::update_feature_status(self, feature_id, status).await
    }

    async fn update_feature_annotations(
        &self,
        feature_id: &str,
        annotations: &str,
    ) -> Result<Feature, DomainError> {
        WorkspaceService::update_feature_annotations(self, feature_id, annotations).await
    }

    async fn api_keys(&self) -> Vec<ApiKey> {
        WorkspaceService::list_api_keys(self)
            .await
            .unwrap_or_else(|e| {
                error!("Failed to list API keys: {}", e);
                Vec::new()
            })
    }
}

#[async_trait::async_trait]
impl ApiKeyServiceTrait for ApiKeyService {
    async fn validate(&self, key: &str) -> Result<Option<ApiKey>, DomainError> {
        ApiKeyService::validate(self, key).await
    }
}
