//! Feature entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::FeatureStatus;
use crate::domain::project::ProjectId;
use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::validation::{validate_id, IdValidationError};

/// Feature identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FeatureId(String);

impl FeatureId {
    pub fn new(id: impl Into<String>) -> Result<Self, IdValidationError> {
        let id = id.into();
        validate_id("Feature", &id)?;
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FeatureId {
    type Error = IdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FeatureId> for String {
    fn from(id: FeatureId) -> Self {
        id.0
    }
}

impl std::fmt::Display for FeatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for FeatureId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

impl StorageEntity for Feature {
    type Key = FeatureId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

/// A trackable unit of work inside a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    id: FeatureId,
    project_id: ProjectId,
    title: String,
    description: String,
    status: FeatureStatus,
    /// Free-text notes left by whoever works on the feature
    annotations: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Feature {
    pub fn new(id: FeatureId, project_id: ProjectId, title: impl Into<String>) -> Self {
        let now = Utc::now();

        Self {
            id,
            project_id,
            title: title.into(),
            description: String::new(),
            status: FeatureStatus::default(),
            annotations: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_status(mut self, status: FeatureStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_annotations(mut self, annotations: impl Into<String>) -> Self {
        self.annotations = annotations.into();
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = created_at;
        self
    }

    // Getters

    pub fn id(&self) -> &FeatureId {
        &self.id
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> FeatureStatus {
        self.status
    }

    pub fn annotations(&self) -> &str {
        &self.annotations
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutations

    pub fn set_status(&mut self, status: FeatureStatus) {
        self.status = status;
        self.touch();
    }

    pub fn set_annotations(&mut self, annotations: impl Into<String>) {
        self.annotations = annotations.into();
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_feature() -> Feature {
        Feature::new(
            FeatureId::new("checkout").unwrap(),
            ProjectId::new("shop").unwrap(),
            "Checkout flow",
        )
    }

    #[test]
    fn test_new_feature_defaults() {
        let feature = create_feature();

        assert_eq!(feature.status(), FeatureStatus::Todo);
        assert_eq!(feature.annotations(), "");
        assert_eq!(feature.created_at(), feature.updated_at());
    }

    #[test]
    fn test_set_status_bumps_updated_at() {
        let mut feature = create_feature()
            .with_created_at(Utc::now() - chrono::Duration::hours(1));
        let before = feature.updated_at();

        feature.set_status(FeatureStatus::Done);

        assert_eq!(feature.status(), FeatureStatus::Done);
        assert!(feature.updated_at() > before);
    }

    #[test]
    fn test_set_annotations_accepts_empty() {
        let mut feature = create_feature().with_annotations("WIP");
        feature.set_annotations("");
        assert_eq!(feature.annotations(), "");
    }

    #[test]
    fn test_feature_wire_shape() {
        let feature = create_feature().with_status(FeatureStatus::InProgress);
        let json = serde_json::to_value(&feature).unwrap();

        assert_eq!(json["id"], "checkout");
        assert_eq!(json["projectId"], "shop");
        assert_eq!(json["status"], "in_progress");
        assert_eq!(json["annotations"], "");
        assert!(json.get("updatedAt").is_some());
    }
}
