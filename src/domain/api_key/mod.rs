//! API Key domain
//!
//! Keys authenticate automation clients against a single workspace.

mod entity;

pub use entity::{ApiKey, ApiKeyId, ApiKeyStatus};
