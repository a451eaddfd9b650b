//! Domain layer - Workspace entities and the storage abstraction

pub mod api_key;
pub mod context;
pub mod error;
pub mod feature;
pub mod project;
pub mod storage;
pub mod validation;
pub mod workspace;

pub use api_key::{ApiKey, ApiKeyId, ApiKeyStatus};
pub use context::{FeatureSummary, ProjectContext, CLAUDE_API_PREFIX};
pub use error::DomainError;
pub use feature::{Feature, FeatureId, FeatureStatus, ParseFeatureStatusError};
pub use project::{Project, ProjectId};
pub use storage::{Modification, Storage, StorageEntity, StorageKey};
pub use validation::{validate_id, IdValidationError};
pub use workspace::{Workspace, WorkspaceId};
