//! Workspace domain - the tenant that owns projects and API keys

mod entity;

pub use entity::{Workspace, WorkspaceId};
