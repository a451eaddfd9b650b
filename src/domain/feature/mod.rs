//! Feature domain - trackable units with a status and free-text annotations

mod entity;
mod status;

pub use entity::{Feature, FeatureId};
pub use status::{FeatureStatus, ParseFeatureStatusError};
