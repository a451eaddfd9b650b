//! Workspace infrastructure - the in-memory service owning projects and features

mod seed;
mod service;

pub use seed::{SeedApiKey, SeedError, SeedFeature, SeedFile, SeedProject, SeedSummary};
pub use service::WorkspaceService;
