//! Project context - everything an automation client needs to work a project

mod entity;

pub use entity::{FeatureSummary, ProjectContext, CLAUDE_API_PREFIX};
