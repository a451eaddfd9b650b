//! Seed files - initial projects, features and API keys loaded at startup
//!
//! ```toml
//! [[projects]]
//! id = "shop"
//! title = "Shop"
//! description = "Storefront rewrite"
//!
//! [[projects.features]]
//! id = "checkout"
//! title = "Checkout flow"
//! status = "in_progress"
//!
//! [[api_keys]]
//! id = "agent"
//! name = "Coding agent"
//! key = "wsk_0123456789abcdefghijklmnop"
//! ```

use std::path::Path;

use chrono::{Duration, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use super::service::WorkspaceService;
use crate::domain::{
    ApiKeyId, DomainError, Feature, FeatureId, FeatureStatus, Project, ProjectId,
};

/// Errors raised while loading a seed file
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse seed file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid seed data: {0}")]
    Invalid(#[from] DomainError),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub projects: Vec<SeedProject>,
    #[serde(default)]
    pub api_keys: Vec<SeedApiKey>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedProject {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<SeedFeature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedFeature {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: Option<String>,
    #[serde(default)]
    pub annotations: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedApiKey {
    pub id: String,
    pub name: String,
    pub key: String,
}

/// Counts of seeded entities
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub projects: usize,
    pub features: usize,
    pub api_keys: usize,
}

impl SeedFile {
    pub fn from_toml(content: &str) -> Result<Self, SeedError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml(&content)
    }

    /// Insert the seed into the service; file order becomes creation order
    pub async fn apply(&self, service: &WorkspaceService) -> Result<SeedSummary, SeedError> {
        let base = Utc::now();
        let mut tick = 0i64;
        let mut next_timestamp = || {
            tick += 1;
            base + Duration::milliseconds(tick)
        };
        let mut summary = SeedSummary::default();
        let workspace_id = service.workspace().id.clone();

        for seed in &self.projects {
            let id = ProjectId::new(&seed.id).map_err(DomainError::from)?;
            let project = Project::new(id, workspace_id.clone(), &seed.title)
                .with_description(&seed.description)
                .with_created_at(next_timestamp());
            let project = service.add_project(project).await?;
            summary.projects += 1;

            for seed_feature in &seed.features {
                let status = match &seed_feature.status {
                    Some(s) => s.parse::<FeatureStatus>().map_err(DomainError::from)?,
                    None => FeatureStatus::default(),
                };

                let feature = Feature::new(
                    FeatureId::new(&seed_feature.id).map_err(DomainError::from)?,
                    project.id().clone(),
                    &seed_feature.title,
                )
                .with_description(&seed_feature.description)
                .with_status(status)
                .with_annotations(&seed_feature.annotations)
                .with_created_at(next_timestamp());

                service.add_feature(feature).await?;
                summary.features += 1;
            }
        }

        for seed in &self.api_keys {
            let id = ApiKeyId::new(&seed.id).map_err(DomainError::from)?;
            service
                .api_key_service()
                .create_with_key(id, &seed.name, &seed.key)
                .await?;
            summary.api_keys += 1;
        }

        info!(
            projects = summary.projects,
            features = summary.features,
            api_keys = summary.api_keys,
            "Workspace seeded"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use super::*;
    use crate::domain::{Workspace, WorkspaceId};
    use crate::infrastructure::api_key::ApiKeyService;
    use crate::infrastructure::storage::InMemoryStorage;

    const SEED: &str = r#"
[[projects]]
id = "shop"
title = "Shop"
description = "Storefront rewrite"

[[projects.features]]
id = "checkout"
title = "Checkout flow"
status = "in_progress"
annotations = "Payment provider chosen"

[[projects.features]]
id = "cart"
title = "Cart"

[[projects]]
id = "billing"
title = "Billing"

[[api_keys]]
id = "agent"
name = "Coding agent"
key = "wsk_0123456789abcdefghijklmnop"
"#;

    fn create_service() -> WorkspaceService {
        let workspace_id = WorkspaceId::new("acme").unwrap();
        let api_keys = ApiKeyService::new(Arc::new(InMemoryStorage::new()), workspace_id.clone());
        WorkspaceService::new(
            Workspace::new(workspace_id, "Acme"),
            Arc::new(InMemoryStorage::new()),
            Arc::new(InMemoryStorage::new()),
            api_keys,
        )
    }

    #[tokio::test]
    async fn test_apply_seed() {
        let service = create_service();
        let seed = SeedFile::from_toml(SEED).unwrap();

        let summary = seed.apply(&service).await.unwrap();

        assert_eq!(
            summary,
            SeedSummary {
                projects: 2,
                features: 2,
                api_keys: 1,
            }
        );

        let projects = service.list_projects().await.unwrap();
        let ids: Vec<&str> = projects.iter().map(|p| p.id().as_str()).collect();
        assert_eq!(ids, vec!["shop", "billing"]);

        let context = service.project_context("shop").await.unwrap();
        assert_eq!(context.features[0].id().as_str(), "checkout");
        assert_eq!(context.features[0].status(), FeatureStatus::InProgress);
        assert_eq!(context.features[0].annotations(), "Payment provider chosen");
        assert_eq!(context.features[1].status(), FeatureStatus::Todo);

        let key = service
            .api_key_service()
            .validate("wsk_0123456789abcdefghijklmnop")
            .await
            .unwrap();
        assert!(key.is_some());
    }

    #[tokio::test]
    async fn test_apply_seed_invalid_status() {
        let service = create_service();
        let seed = SeedFile::from_toml(
            r#"
[[projects]]
id = "shop"
title = "Shop"

[[projects.features]]
id = "cart"
title = "Cart"
status = "shipped"
"#,
        )
        .unwrap();

        let err = seed.apply(&service).await.unwrap_err();
        assert!(matches!(err, SeedError::Invalid(DomainError::Validation { .. })));
    }

    #[test]
    fn test_parse_error() {
        let err = SeedFile::from_toml("[[projects]]\nid = 5").unwrap_err();
        assert!(matches!(err, SeedError::Parse(_)));
    }

    #[test]
    fn test_empty_seed() {
        let seed = SeedFile::from_toml("").unwrap();
        assert!(seed.projects.is_empty());
        assert!(seed.api_keys.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SEED.as_bytes()).unwrap();

        let seed = SeedFile::load(file.path()).unwrap();
        assert_eq!(seed.projects.len(), 2);
        assert_eq!(seed.api_keys[0].id, "agent");
    }

    #[test]
    fn test_load_missing_file() {
        let err = SeedFile::load("/nonexistent/seed.toml").unwrap_err();
        assert!(matches!(err, SeedError::Io { .. }));
    }
}
