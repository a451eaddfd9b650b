use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::DomainError;

/// Progress state of a feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FeatureStatus {
    #[default]
    Todo,
    InProgress,
    Blocked,
    Done,
}

impl FeatureStatus {
    pub const ALL: [FeatureStatus; 4] = [
        FeatureStatus::Todo,
        FeatureStatus::InProgress,
        FeatureStatus::Blocked,
        FeatureStatus::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Blocked => "blocked",
            Self::Done => "done",
        }
    }

    /// Comma separated list of the accepted wire names
    pub fn allowed_values() -> String {
        Self::ALL
            .iter()
            .map(FeatureStatus::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for FeatureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("Invalid feature status '{value}'. Expected one of: {allowed}")]
pub struct ParseFeatureStatusError {
    pub value: String,
    pub allowed: String,
}

impl From<ParseFeatureStatusError> for DomainError {
    fn from(err: ParseFeatureStatusError) -> Self {
        DomainError::validation(err.to_string())
    }
}

impl FromStr for FeatureStatus {
    type Err = ParseFeatureStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseFeatureStatusError {
                value: s.to_string(),
                allowed: Self::allowed_values(),
            })
    }
}
