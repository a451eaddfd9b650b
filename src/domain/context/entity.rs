use serde::{Deserialize, Serialize};

use crate::domain::feature::{Feature, FeatureStatus};
use crate::domain::project::Project;
use crate::domain::workspace::WorkspaceId;

/// Path under which the automation client endpoints are served
pub const CLAUDE_API_PREFIX: &str = "/claude";

/// Feature counts per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSummary {
    pub total: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub blocked: usize,
    pub done: usize,
}

impl FeatureSummary {
    pub fn from_features(features: &[Feature]) -> Self {
        features.iter().fold(Self::default(), |mut summary, feature| {
            summary.total += 1;
            match feature.status() {
                FeatureStatus::Todo => summary.todo += 1,
                FeatureStatus::InProgress => summary.in_progress += 1,
                FeatureStatus::Blocked => summary.blocked += 1,
                FeatureStatus::Done => summary.done += 1,
            }
            summary
        })
    }
}

/// A project with all of its features and working instructions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectContext {
    pub workspace_id: WorkspaceId,
    pub project: Project,
    pub features: Vec<Feature>,
    pub summary: FeatureSummary,
    pub instructions: String,
}

impl ProjectContext {
    /// Assemble the context; `features` keep the order they are given in
    pub fn new(workspace_id: WorkspaceId, project: Project, features: Vec<Feature>) -> Self {
        let summary = FeatureSummary::from_features(&features);
        let instructions = render_instructions(&project);

        Self {
            workspace_id,
            project,
            features,
            summary,
            instructions,
        }
    }
}

fn render_instructions(project: &Project) -> String {
    format!(
        "You are working on project '{title}' ({id}).\n\
         Pick features whose status is not 'done' and work through them one at a time.\n\
         Before starting a feature, set its status with POST {prefix}/features/{{feature_id}}/status \
         and body {{\"status\": \"in_progress\"}}.\n\
         Record progress notes, decisions and open questions with \
         POST {prefix}/features/{{feature_id}}/annotations and body {{\"annotations\": \"...\"}}; \
         the annotations replace the previous text.\n\
         When a feature is finished set its status to 'done'; if you cannot continue set it to 'blocked' \
         and explain why in the annotations.\n\
         Valid statuses: {statuses}.",
        title = project.title(),
        id = project.id(),
        prefix = CLAUDE_API_PREFIX,
        statuses = FeatureStatus::allowed_values(),
    )
}
